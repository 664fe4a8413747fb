//! Inference profile value object
//!
//! The endpoint must be addressed with a resolved inference-profile
//! identifier, never a bare model identifier. An [`InferenceProfile`] is
//! created once by the resolver (or served from its cache) and never
//! mutated afterwards.

use crate::core::model::ModelFamily;
use serde::{Deserialize, Serialize};

/// A resolved routing identifier for a model family in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceProfile {
    pub model_family: ModelFamily,
    pub region: String,
    pub resolved_identifier: String,
}

impl InferenceProfile {
    pub fn new(
        model_family: ModelFamily,
        region: impl Into<String>,
        resolved_identifier: impl Into<String>,
    ) -> Self {
        Self {
            model_family,
            region: region.into(),
            resolved_identifier: resolved_identifier.into(),
        }
    }

    /// The cross-region profile identifier for a family by the well-known
    /// naming convention: a continent-level region-group prefix in front of
    /// the direct identifier (`us-east-1` → `us.amazon.nova-pro-v1:0`).
    pub fn cross_region_identifier(family: &ModelFamily, region: &str) -> String {
        format!(
            "{}.{}",
            region_group_prefix(region),
            family.base_identifier()
        )
    }
}

/// Derive the inference-profile region group from an AWS region string.
///
/// `us-east-1` → `us`, `eu-west-1` → `eu`, `ap-northeast-1` → `ap`, etc.
pub fn region_group_prefix(region: &str) -> &str {
    match region.split('-').next() {
        Some(prefix @ ("us" | "eu" | "ap" | "me" | "sa" | "ca" | "af")) => prefix,
        _ => "us", // safe fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_region_identifier_for_us_east_1() {
        let id = InferenceProfile::cross_region_identifier(&ModelFamily::NovaPro, "us-east-1");
        assert_eq!(id, "us.amazon.nova-pro-v1:0");
    }

    #[test]
    fn cross_region_identifier_for_eu_region() {
        let id = InferenceProfile::cross_region_identifier(&ModelFamily::NovaLite, "eu-west-1");
        assert_eq!(id, "eu.amazon.nova-lite-v1:0");
    }

    #[test]
    fn unknown_region_falls_back_to_us() {
        assert_eq!(region_group_prefix("moon-base-1"), "us");
    }

    #[test]
    fn profile_fields_are_preserved() {
        let profile =
            InferenceProfile::new(ModelFamily::NovaPro, "us-west-2", "us.amazon.nova-pro-v1:0");
        assert_eq!(profile.region, "us-west-2");
        assert_eq!(profile.resolved_identifier, "us.amazon.nova-pro-v1:0");
    }
}
