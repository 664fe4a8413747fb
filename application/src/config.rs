//! Execution parameters shared by the use cases.

use assistant_domain::ModelFamily;

/// Which model to address and how.
///
/// `profile_override`, when set, bypasses resolution entirely and is used
/// verbatim as the endpoint identifier.
#[derive(Debug, Clone, Default)]
pub struct ModelSelection {
    pub family: ModelFamily,
    pub profile_override: Option<String>,
}

impl ModelSelection {
    pub fn new(family: ModelFamily) -> Self {
        Self {
            family,
            profile_override: None,
        }
    }

    pub fn with_override(mut self, identifier: impl Into<String>) -> Self {
        self.profile_override = Some(identifier.into());
        self
    }
}
