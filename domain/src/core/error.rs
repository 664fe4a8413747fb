//! The closed error taxonomy surfaced to callers.
//!
//! Every raw failure — AWS SDK errors, tool-server transport errors, local
//! validation failures — is mapped into a [`ClassifiedError`] before it
//! crosses a component boundary. Callers pattern-match on [`ErrorKind`]
//! instead of probing error strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a classified failure.
///
/// The set is closed: infrastructure adapters must map every raw error into
/// one of these variants. Anything unrecognized becomes [`Unknown`](ErrorKind::Unknown)
/// with `retryable = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No inference profile could be resolved for the model family + region.
    ProfileNotFound,
    /// The endpoint rejected our credentials or model access.
    AccessDenied,
    /// A generation parameter was out of bounds or unrecognized.
    InvalidConfig,
    /// The conversation violates strict role alternation.
    InvalidConversation,
    /// A tool server returned an empty or malformed success payload.
    ToolResponseInvalid,
    /// A network call exceeded its bounded wait, or the service signalled
    /// a transient condition (throttling, temporary unavailability).
    Timeout,
    /// Unrecognized raw error. Never assumed transient.
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::ProfileNotFound => "profile not found",
            ErrorKind::AccessDenied => "access denied",
            ErrorKind::InvalidConfig => "invalid config",
            ErrorKind::InvalidConversation => "invalid conversation",
            ErrorKind::ToolResponseInvalid => "tool response invalid",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unknown => "unknown error",
        };
        write!(f, "{}", s)
    }
}

/// A raw failure mapped into the closed taxonomy.
///
/// `retryable` tells the caller whether a repeat attempt is sane; the
/// invocation client retries a `Timeout` at most once itself, everything
/// else is surfaced as-is.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn profile_not_found(family: impl std::fmt::Display, region: &str) -> Self {
        Self::new(
            ErrorKind::ProfileNotFound,
            format!("no inference profile resolvable for {} in {}", family, region),
            false,
        )
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccessDenied, message, false)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, message, false)
    }

    pub fn invalid_conversation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConversation, message, false)
    }

    pub fn tool_response_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ToolResponseInvalid, message, false)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message, true)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message, false)
    }

    /// Operator-facing guidance for this failure class.
    ///
    /// Distinguishes "fix your input" from "retry later" from "fix your
    /// access" — the three classes need different troubleshooting, so they
    /// must never collapse into one generic string.
    pub fn advice(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidConfig | ErrorKind::InvalidConversation => {
                "fix the request input and try again"
            }
            ErrorKind::Timeout => "transient failure — retry in a moment",
            ErrorKind::AccessDenied | ErrorKind::ProfileNotFound => {
                "check AWS credentials, region, and model access"
            }
            ErrorKind::ToolResponseInvalid => {
                "the tool server returned unusable data; check its logs"
            }
            ErrorKind::Unknown => "unrecognized failure; not retried automatically",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_retryable_by_default() {
        let err = ClassifiedError::timeout("call exceeded 30s");
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(err.retryable);
    }

    #[test]
    fn unknown_is_never_retryable() {
        let err = ClassifiedError::unknown("mystery");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(!err.retryable);
    }

    #[test]
    fn advice_distinguishes_failure_classes() {
        let input = ClassifiedError::invalid_config("bad key").advice();
        let retry = ClassifiedError::timeout("slow").advice();
        let access = ClassifiedError::access_denied("nope").advice();
        assert_ne!(input, retry);
        assert_ne!(retry, access);
        assert_ne!(input, access);
    }

    #[test]
    fn profile_not_found_carries_family_and_region() {
        let err = ClassifiedError::profile_not_found("nova-pro", "us-east-1");
        assert!(err.message.contains("nova-pro"));
        assert!(err.message.contains("us-east-1"));
        assert!(!err.retryable);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = ClassifiedError::access_denied("not authorized on model");
        assert_eq!(err.to_string(), "access denied: not authorized on model");
    }
}
