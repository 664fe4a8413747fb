//! Bedrock runtime adapter for the model invoker port.
//!
//! Serializes an already-built request body, addresses the endpoint with
//! the resolved inference-profile identifier, and bounds every network
//! wait. Transient failures are retried exactly once after a short delay;
//! everything else surfaces classified.

use assistant_application::ports::ModelInvoker;
use assistant_application::request::RequestBody;
use assistant_application::ReplyStream;
use assistant_domain::{ClassifiedError, InferenceProfile, ModelReply, StreamEvent};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::ResponseStream;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::classify::classify_sdk_error;

const CONTENT_TYPE: &str = "application/json";

/// Invoker backed by the Bedrock runtime API.
pub struct BedrockInvoker {
    client: aws_sdk_bedrockruntime::Client,
    request_timeout: Duration,
    retry_delay: Duration,
}

impl BedrockInvoker {
    pub fn new(
        client: aws_sdk_bedrockruntime::Client,
        request_timeout: Duration,
        retry_delay: Duration,
    ) -> Self {
        Self {
            client,
            request_timeout,
            retry_delay,
        }
    }

    async fn invoke_once(
        &self,
        body: &RequestBody,
        profile: &InferenceProfile,
    ) -> Result<ModelReply, ClassifiedError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| ClassifiedError::invalid_config(format!("unserializable body: {}", e)))?;

        let call = self
            .client
            .invoke_model()
            .model_id(&profile.resolved_identifier)
            .content_type(CONTENT_TYPE)
            .accept(CONTENT_TYPE)
            .body(Blob::new(payload))
            .send();

        let output = tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| {
                ClassifiedError::timeout(format!(
                    "model call exceeded {}s",
                    self.request_timeout.as_secs()
                ))
            })?
            .map_err(|e| classify_sdk_error(&e))?;

        let mut reply = parse_reply(output.body().as_ref())?;
        reply.model_id = Some(profile.resolved_identifier.clone());
        Ok(reply)
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(
        &self,
        body: &RequestBody,
        profile: &InferenceProfile,
    ) -> Result<ModelReply, ClassifiedError> {
        with_single_retry(self.retry_delay, || self.invoke_once(body, profile)).await
    }

    async fn invoke_streaming(
        &self,
        body: &RequestBody,
        profile: &InferenceProfile,
    ) -> Result<ReplyStream, ClassifiedError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| ClassifiedError::invalid_config(format!("unserializable body: {}", e)))?;

        let call = self
            .client
            .invoke_model_with_response_stream()
            .model_id(&profile.resolved_identifier)
            .content_type(CONTENT_TYPE)
            .accept(CONTENT_TYPE)
            .body(Blob::new(payload))
            .send();

        let output = tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| {
                ClassifiedError::timeout(format!(
                    "model call exceeded {}s",
                    self.request_timeout.as_secs()
                ))
            })?
            .map_err(|e| classify_sdk_error(&e))?;

        let (tx, rx) = mpsc::channel(32);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let mut events = output.body;

        tokio::spawn(async move {
            let mut full_text = String::new();
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("stream cancelled, dropping connection");
                        break;
                    }
                    next = events.recv() => match next {
                        Ok(Some(ResponseStream::Chunk(part))) => {
                            let Some(bytes) = part.bytes() else { continue };
                            let Some(delta) = parse_stream_chunk(bytes.as_ref()) else {
                                continue;
                            };
                            full_text.push_str(&delta);
                            if tx.send(StreamEvent::Delta(delta)).await.is_err() {
                                break;
                            }
                        }
                        Ok(Some(_)) => continue,
                        Ok(None) => {
                            let _ = tx.send(StreamEvent::Completed(full_text)).await;
                            break;
                        }
                        Err(e) => {
                            let _ = tx
                                .send(StreamEvent::Error(classify_sdk_error(&e)))
                                .await;
                            break;
                        }
                    }
                }
            }
        });

        Ok(ReplyStream::new(rx, cancel))
    }
}

/// Run an attempt, repeating it at most once and only for transient
/// failures. Everything else surfaces immediately.
async fn with_single_retry<F, Fut, T>(
    retry_delay: Duration,
    mut attempt: F,
) -> Result<T, ClassifiedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClassifiedError>>,
{
    match attempt().await {
        Ok(value) => Ok(value),
        Err(e) if e.retryable => {
            warn!(error = %e, "transient model failure, retrying once");
            tokio::time::sleep(retry_delay).await;
            attempt().await
        }
        Err(e) => Err(e),
    }
}

/// Parse a complete response body into a [`ModelReply`].
///
/// The response carries the assistant message under
/// `output.message.content[]`; text blocks are concatenated in order.
fn parse_reply(body: &[u8]) -> Result<ModelReply, ClassifiedError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ClassifiedError::unknown(format!("unparseable model response: {}", e)))?;

    let blocks = value["output"]["message"]["content"]
        .as_array()
        .ok_or_else(|| ClassifiedError::unknown("model response missing output message"))?;

    let text: String = blocks
        .iter()
        .filter_map(|block| block["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(ClassifiedError::unknown(
            "model response contained no text content",
        ));
    }
    Ok(ModelReply::new(text))
}

/// Extract the text delta from one streaming chunk, if it carries one.
///
/// Chunks without a `contentBlockDelta` member (message start/stop,
/// usage metadata) yield `None` and are skipped.
fn parse_stream_chunk(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    value["contentBlockDelta"]["delta"]["text"]
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn access_denied_is_not_retried() {
        let attempts = AtomicUsize::new(0);
        let result: Result<ModelReply, _> =
            with_single_retry(Duration::ZERO, || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(ClassifiedError::access_denied("not authorized on model"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failure_is_retried_exactly_once() {
        let attempts = AtomicUsize::new(0);
        let result = with_single_retry(Duration::ZERO, || async {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ClassifiedError::timeout("first attempt timed out"))
            } else {
                Ok(ModelReply::new("second attempt succeeded"))
            }
        })
        .await;

        assert_eq!(result.unwrap().text, "second attempt succeeded");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn repeated_timeout_surfaces_after_the_single_retry() {
        let attempts = AtomicUsize::new(0);
        let result: Result<ModelReply, _> =
            with_single_retry(Duration::ZERO, || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(ClassifiedError::timeout("still timing out"))
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind, assistant_domain::ErrorKind::Timeout);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn parse_reply_extracts_text() {
        let body = br#"{"output":{"message":{"role":"assistant","content":[{"text":"The answer."}]}},"stopReason":"end_turn"}"#;
        let reply = parse_reply(body).unwrap();
        assert_eq!(reply.text, "The answer.");
    }

    #[test]
    fn parse_reply_concatenates_multiple_blocks() {
        let body = br#"{"output":{"message":{"content":[{"text":"one "},{"text":"two"}]}}}"#;
        assert_eq!(parse_reply(body).unwrap().text, "one two");
    }

    #[test]
    fn parse_reply_rejects_missing_message() {
        let err = parse_reply(br#"{"usage":{"inputTokens":10}}"#).unwrap_err();
        assert_eq!(err.kind, assistant_domain::ErrorKind::Unknown);
    }

    #[test]
    fn parse_reply_rejects_garbage() {
        assert!(parse_reply(b"not json").is_err());
    }

    #[test]
    fn parse_stream_chunk_extracts_delta_text() {
        let chunk = br#"{"contentBlockDelta":{"delta":{"text":"partial"},"contentBlockIndex":0}}"#;
        assert_eq!(parse_stream_chunk(chunk), Some("partial".to_string()));
    }

    #[test]
    fn parse_stream_chunk_skips_lifecycle_events() {
        assert_eq!(parse_stream_chunk(br#"{"messageStart":{"role":"assistant"}}"#), None);
        assert_eq!(parse_stream_chunk(br#"{"messageStop":{"stopReason":"end_turn"}}"#), None);
    }
}
