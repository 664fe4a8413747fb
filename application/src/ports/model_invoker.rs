//! Model invoker port
//!
//! Defines how the application layer calls the hosted model endpoint.
//! Adapters live in the infrastructure layer. The invoker accepts an
//! already-built [`RequestBody`](crate::request::RequestBody) and the
//! resolved [`InferenceProfile`] — it never addresses the endpoint with a
//! bare model identifier.

use crate::request::RequestBody;
use assistant_domain::{ClassifiedError, InferenceProfile, ModelReply, StreamEvent};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Client for the model inference endpoint.
///
/// Implementations classify every raw failure into a [`ClassifiedError`]
/// and perform at most one silent retry, only for transient failures
/// (`retryable == true`); further retries are the caller's decision.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Send a request and block until the complete response is available.
    async fn invoke(
        &self,
        body: &RequestBody,
        profile: &InferenceProfile,
    ) -> Result<ModelReply, ClassifiedError>;

    /// Send a request with incremental delivery.
    ///
    /// The default implementation falls back to a complete call wrapped in
    /// a single `Completed` event, so non-streaming adapters work unchanged.
    async fn invoke_streaming(
        &self,
        body: &RequestBody,
        profile: &InferenceProfile,
    ) -> Result<ReplyStream, ClassifiedError> {
        let reply = self.invoke(body, profile).await?;
        let (tx, rx) = mpsc::channel(1);
        // Receiver may already be dropped; nothing to do then
        let _ = tx.send(StreamEvent::Completed(reply.text)).await;
        Ok(ReplyStream::new(rx, CancellationToken::new()))
    }
}

/// Handle for consuming an incremental model response.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and the cancellation token shared
/// with the producing task. The sequence is finite and non-restartable;
/// calling [`cancel`](Self::cancel) releases the underlying connection and
/// guarantees no fragment is produced after cancellation is observed.
pub struct ReplyStream {
    receiver: mpsc::Receiver<StreamEvent>,
    cancel: CancellationToken,
}

impl ReplyStream {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>, cancel: CancellationToken) -> Self {
        Self { receiver, cancel }
    }

    /// Receive the next event, or `None` once the stream is exhausted.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Signal the producer to stop. Pending fragments are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, ClassifiedError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => return Err(e),
            }
        }
        // Channel closed without a terminal event — return what we have
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collect_text_accumulates_deltas() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("Hello, ".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Delta("world".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Completed("Hello, world".to_string()))
            .await
            .unwrap();
        drop(tx);

        let stream = ReplyStream::new(rx, CancellationToken::new());
        assert_eq!(stream.collect_text().await.unwrap(), "Hello, world");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_error() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Error(ClassifiedError::timeout("mid-stream")))
            .await
            .unwrap();
        drop(tx);

        let stream = ReplyStream::new(rx, CancellationToken::new());
        let err = stream.collect_text().await.unwrap_err();
        assert_eq!(err.kind, assistant_domain::ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn cancel_trips_the_shared_token() {
        let (_tx, rx) = mpsc::channel::<StreamEvent>(1);
        let token = CancellationToken::new();
        let stream = ReplyStream::new(rx, token.clone());
        assert!(!token.is_cancelled());
        stream.cancel();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn producer_stops_once_cancellation_is_observed() {
        let (tx, rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        let producer_token = token.clone();

        // Producer in the shape adapters use: select over cancellation
        // and the next fragment.
        let producer = tokio::spawn(async move {
            let mut sent = 0u32;
            loop {
                tokio::select! {
                    _ = producer_token.cancelled() => break,
                    _ = tokio::task::yield_now() => {
                        if tx.send(StreamEvent::Delta(format!("d{}", sent))).await.is_err() {
                            break;
                        }
                        sent += 1;
                    }
                }
            }
            sent
        });

        let mut stream = ReplyStream::new(rx, token);
        assert!(stream.next_event().await.is_some());
        stream.cancel();

        // Whatever was buffered before cancellation may still drain, but
        // the channel closes without a fragment produced afterwards.
        let mut drained = 1u32; // the event consumed above
        while stream.next_event().await.is_some() {
            drained += 1;
        }
        let sent = producer.await.unwrap();
        assert!(drained <= sent);
        assert!(stream.next_event().await.is_none());
    }
}
