//! Generation configuration
//!
//! The target endpoint rejects unknown inference parameters at transmission
//! time, so [`GenerationConfig`] is a closed structure: exactly two
//! recognized keys, validated at construction. Anything else fails locally
//! with `InvalidConfig` and an actionable message before a network call is
//! ever made.

use crate::core::error::ClassifiedError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// The closed set of generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl GenerationConfig {
    /// Construct a bounds-checked configuration.
    ///
    /// `max_output_tokens` must be positive; `temperature` must lie in
    /// `[0, 1]`.
    pub fn new(max_output_tokens: u32, temperature: f32) -> Result<Self, ClassifiedError> {
        if max_output_tokens == 0 {
            return Err(ClassifiedError::invalid_config(
                "max_output_tokens must be a positive integer",
            ));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ClassifiedError::invalid_config(format!(
                "temperature must be within [0, 1], got {}",
                temperature
            )));
        }
        Ok(Self {
            max_output_tokens,
            temperature,
        })
    }

    /// Build from loose string parameters, rejecting any unrecognized key.
    ///
    /// Unrecognized keys are not dropped silently — the endpoint would fail
    /// hard on them anyway, and a local check surfaces the problem with the
    /// offending key named.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, ClassifiedError> {
        let mut max_output_tokens = DEFAULT_MAX_OUTPUT_TOKENS;
        let mut temperature = DEFAULT_TEMPERATURE;

        for (key, value) in params {
            match key.as_str() {
                "max_output_tokens" => {
                    max_output_tokens = value.parse().map_err(|_| {
                        ClassifiedError::invalid_config(format!(
                            "max_output_tokens must be a positive integer, got '{}'",
                            value
                        ))
                    })?;
                }
                "temperature" => {
                    temperature = value.parse().map_err(|_| {
                        ClassifiedError::invalid_config(format!(
                            "temperature must be a number in [0, 1], got '{}'",
                            value
                        ))
                    })?;
                }
                other => {
                    return Err(ClassifiedError::invalid_config(format!(
                        "unrecognized generation parameter '{}'; supported: \
                         max_output_tokens, temperature",
                        other
                    )));
                }
            }
        }

        Self::new(max_output_tokens, temperature)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn valid_config_within_bounds() {
        let config = GenerationConfig::new(4000, 0.7).unwrap();
        assert_eq!(config.max_output_tokens, 4000);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn zero_max_tokens_rejected() {
        let err = GenerationConfig::new(0, 0.5).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConfig);
    }

    #[test]
    fn temperature_out_of_range_rejected() {
        assert!(GenerationConfig::new(100, 1.5).is_err());
        assert!(GenerationConfig::new(100, -0.1).is_err());
        assert!(GenerationConfig::new(100, 0.0).is_ok());
        assert!(GenerationConfig::new(100, 1.0).is_ok());
    }

    #[test]
    fn from_params_accepts_recognized_keys() {
        let mut params = BTreeMap::new();
        params.insert("max_output_tokens".to_string(), "2048".to_string());
        params.insert("temperature".to_string(), "0.3".to_string());
        let config = GenerationConfig::from_params(&params).unwrap();
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.temperature, 0.3);
    }

    #[test]
    fn from_params_rejects_unknown_key() {
        let mut params = BTreeMap::new();
        params.insert("top_p".to_string(), "0.9".to_string());
        let err = GenerationConfig::from_params(&params).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConfig);
        assert!(err.message.contains("top_p"));
    }

    #[test]
    fn from_params_defaults_when_empty() {
        let config = GenerationConfig::from_params(&BTreeMap::new()).unwrap();
        assert_eq!(config, GenerationConfig::default());
    }
}
