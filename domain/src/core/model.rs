//! Model family value object
//!
//! A [`ModelFamily`] names a hosted foundation model without committing to
//! the identifier used on the wire — the endpoint must be addressed through
//! a resolved inference profile, which the resolver derives from the family.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Foundation model families the assistant can address (Value Object).
///
/// The Nova families require inference profiles for cross-region routing;
/// `Custom` passes an arbitrary base identifier through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    NovaPro,
    NovaLite,
    NovaMicro,
    Custom(String),
}

impl ModelFamily {
    /// Short, human-facing name for this family.
    pub fn as_str(&self) -> &str {
        match self {
            ModelFamily::NovaPro => "nova-pro",
            ModelFamily::NovaLite => "nova-lite",
            ModelFamily::NovaMicro => "nova-micro",
            ModelFamily::Custom(s) => s,
        }
    }

    /// The direct (non-profile) model identifier for this family.
    pub fn base_identifier(&self) -> &str {
        match self {
            ModelFamily::NovaPro => "amazon.nova-pro-v1:0",
            ModelFamily::NovaLite => "amazon.nova-lite-v1:0",
            ModelFamily::NovaMicro => "amazon.nova-micro-v1:0",
            ModelFamily::Custom(s) => s,
        }
    }

    /// Whether this family accepts on-demand invocation with its direct
    /// identifier. Nova families do not — addressing them with a bare model
    /// identifier is the failure mode the resolver exists to avoid.
    pub fn supports_on_demand(&self) -> bool {
        matches!(self, ModelFamily::Custom(_))
    }
}

impl Default for ModelFamily {
    fn default() -> Self {
        ModelFamily::NovaPro
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "nova-pro" => ModelFamily::NovaPro,
            "nova-lite" => ModelFamily::NovaLite,
            "nova-micro" => ModelFamily::NovaMicro,
            other => ModelFamily::Custom(other.to_string()),
        })
    }
}

impl Serialize for ModelFamily {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelFamily {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("ModelFamily::from_str is infallible"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_families_round_trip() {
        for name in ["nova-pro", "nova-lite", "nova-micro"] {
            let family: ModelFamily = name.parse().unwrap();
            assert_eq!(family.to_string(), name);
        }
    }

    #[test]
    fn unknown_name_becomes_custom() {
        let family: ModelFamily = "my-fine-tune".parse().unwrap();
        assert_eq!(family, ModelFamily::Custom("my-fine-tune".to_string()));
        assert_eq!(family.base_identifier(), "my-fine-tune");
    }

    #[test]
    fn nova_families_require_profiles() {
        assert!(!ModelFamily::NovaPro.supports_on_demand());
        assert!(!ModelFamily::NovaLite.supports_on_demand());
        assert!(ModelFamily::Custom("x".into()).supports_on_demand());
    }

    #[test]
    fn base_identifier_for_nova_pro() {
        assert_eq!(
            ModelFamily::NovaPro.base_identifier(),
            "amazon.nova-pro-v1:0"
        );
    }
}
