//! Normalized model output and streaming events.

use crate::core::error::ClassifiedError;
use serde::{Deserialize, Serialize};

/// A complete, normalized response from the model endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReply {
    /// The generated text.
    pub text: String,
    /// The identifier the response was attributed to, if reported.
    pub model_id: Option<String>,
}

impl ModelReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: None,
        }
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// An event in an incremental (streaming) model response.
///
/// The sequence is lazy, finite, and non-restartable: zero or more `Delta`
/// fragments followed by exactly one terminal event. After cancellation is
/// observed by the producer, no further event is emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A text fragment as it arrives.
    Delta(String),
    /// The stream finished; carries the full accumulated text.
    Completed(String),
    /// The stream failed mid-flight.
    Error(ClassifiedError),
}

impl StreamEvent {
    /// Returns true if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
