//! Profile resolver port
//!
//! Resolving which identifier addresses a model family is an external
//! concern (it may require a discovery call to the endpoint), so the
//! application layer sees only this trait.

use assistant_domain::{ClassifiedError, InferenceProfile, ModelFamily};
use async_trait::async_trait;

/// Resolves the inference-profile identifier for a model family.
///
/// Preference order: explicit override (used verbatim), then the
/// cross-region profile convention, then the direct identifier. Results
/// for a given family are cacheable for the process lifetime; resolution
/// is idempotent.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve(
        &self,
        family: &ModelFamily,
        explicit_override: Option<&str>,
    ) -> Result<InferenceProfile, ClassifiedError>;
}
