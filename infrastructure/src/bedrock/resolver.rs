//! Inference profile resolution against the Bedrock control plane.
//!
//! Nova families are addressable only through an inference profile, so the
//! resolver confirms the cross-region naming convention against the
//! account's profile directory before using it. The directory call is
//! behind a trait to keep resolution logic testable without AWS.

use assistant_application::ProfileResolver;
use assistant_domain::{ClassifiedError, InferenceProfile, ModelFamily};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};

use super::classify::classify_sdk_error;

/// Read access to the account's inference-profile listing.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    async fn list_profile_identifiers(&self) -> Result<Vec<String>, ClassifiedError>;
}

/// Directory backed by the Bedrock `ListInferenceProfiles` API.
pub struct BedrockProfileDirectory {
    client: aws_sdk_bedrock::Client,
}

impl BedrockProfileDirectory {
    pub fn new(client: aws_sdk_bedrock::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileDirectory for BedrockProfileDirectory {
    async fn list_profile_identifiers(&self) -> Result<Vec<String>, ClassifiedError> {
        let output = self
            .client
            .list_inference_profiles()
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;
        Ok(output
            .inference_profile_summaries()
            .iter()
            .map(|summary| summary.inference_profile_id().to_string())
            .collect())
    }
}

/// Resolver caching one [`InferenceProfile`] per model family.
///
/// Resolution order: explicit override verbatim (never cached, never
/// checked against the directory), then the cross-region convention when
/// the directory confirms it, then the direct identifier for families that
/// support on-demand addressing. An unreachable directory downgrades the
/// convention check to a warning rather than failing the request.
pub struct BedrockProfileResolver<D> {
    directory: D,
    region: String,
    cache: RwLock<HashMap<String, InferenceProfile>>,
}

impl<D: ProfileDirectory> BedrockProfileResolver<D> {
    pub fn new(directory: D, region: impl Into<String>) -> Self {
        Self {
            directory,
            region: region.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    async fn resolve_uncached(
        &self,
        family: &ModelFamily,
    ) -> Result<InferenceProfile, ClassifiedError> {
        let convention = InferenceProfile::cross_region_identifier(family, &self.region);

        match self.directory.list_profile_identifiers().await {
            Ok(identifiers) => {
                if identifiers.iter().any(|id| id == &convention) {
                    debug!(identifier = %convention, "directory confirmed cross-region profile");
                    Ok(InferenceProfile::new(
                        family.clone(),
                        self.region.clone(),
                        convention,
                    ))
                } else if family.supports_on_demand() {
                    debug!(
                        identifier = %family.base_identifier(),
                        "no cross-region profile listed, using direct identifier"
                    );
                    Ok(InferenceProfile::new(
                        family.clone(),
                        self.region.clone(),
                        family.base_identifier(),
                    ))
                } else {
                    Err(ClassifiedError::profile_not_found(family, &self.region))
                }
            }
            Err(e) => {
                // Listing needs a separate permission; absence of it should
                // not block inference, so trust the convention.
                warn!(error = %e, "profile directory unreachable, trusting naming convention");
                Ok(InferenceProfile::new(
                    family.clone(),
                    self.region.clone(),
                    convention,
                ))
            }
        }
    }
}

#[async_trait]
impl<D: ProfileDirectory> ProfileResolver for BedrockProfileResolver<D> {
    async fn resolve(
        &self,
        family: &ModelFamily,
        explicit_override: Option<&str>,
    ) -> Result<InferenceProfile, ClassifiedError> {
        if let Some(identifier) = explicit_override.filter(|id| !id.is_empty()) {
            return Ok(InferenceProfile::new(
                family.clone(),
                self.region.clone(),
                identifier,
            ));
        }

        let key = family.to_string();
        if let Ok(cache) = self.cache.read()
            && let Some(profile) = cache.get(&key)
        {
            return Ok(profile.clone());
        }

        let profile = self.resolve_uncached(family).await?;
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, profile.clone());
        }
        Ok(profile)
    }
}
