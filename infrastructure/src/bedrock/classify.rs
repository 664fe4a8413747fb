//! Error classification for the Bedrock SDK
//!
//! Maps raw SDK failures into the closed [`ClassifiedError`] taxonomy.
//! Classification keys off the service error code rather than the
//! operation-specific error enums, so one mapping covers InvokeModel, the
//! streaming variant, and the control-plane discovery call. Anything
//! unrecognized becomes `Unknown` with `retryable = false` — transience is
//! never assumed.

use assistant_domain::ClassifiedError;
use aws_sdk_bedrockruntime::error::{ProvideErrorMetadata, SdkError};

/// Classify any Bedrock SDK error.
pub fn classify_sdk_error<E, R>(err: &SdkError<E, R>) -> ClassifiedError
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::TimeoutError(_) => {
            ClassifiedError::timeout("request to the model endpoint timed out")
        }
        SdkError::DispatchFailure(failure) => {
            if failure
                .as_connector_error()
                .is_some_and(|c| c.is_timeout())
            {
                ClassifiedError::timeout("connection to the model endpoint timed out")
            } else {
                ClassifiedError::unknown(format!("connection failure: {:?}", failure))
            }
        }
        SdkError::ServiceError(service_err) => {
            let inner = service_err.err();
            classify_error_code(
                inner.code().unwrap_or(""),
                inner.message().unwrap_or("no message from service"),
            )
        }
        SdkError::ConstructionFailure(_) => {
            ClassifiedError::invalid_config("failed to construct the request")
        }
        SdkError::ResponseError(_) => {
            ClassifiedError::unknown("endpoint returned an unparseable response")
        }
        _ => ClassifiedError::unknown("unrecognized SDK failure"),
    }
}

/// Classify a service error by its error code string.
///
/// Throttling and temporary unavailability are treated as transient and
/// share the `Timeout` kind with its `retryable = true` default; a repeat
/// attempt is sane for all of them and for nothing else here.
pub fn classify_error_code(code: &str, message: &str) -> ClassifiedError {
    match code {
        "AccessDeniedException" | "UnauthorizedException" => {
            ClassifiedError::access_denied(message)
        }
        "ResourceNotFoundException" | "ModelNotReadyException" => ClassifiedError::new(
            assistant_domain::ErrorKind::ProfileNotFound,
            message.to_string(),
            false,
        ),
        "ValidationException" | "SerializationException" => {
            ClassifiedError::invalid_config(message)
        }
        "ThrottlingException"
        | "ServiceUnavailableException"
        | "ModelTimeoutException"
        | "ServiceQuotaExceededException" => ClassifiedError::timeout(message),
        _ => ClassifiedError::unknown(format!("{}: {}", code, message)),
    }
}
