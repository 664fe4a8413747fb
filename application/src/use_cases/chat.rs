//! Chat use case.
//!
//! A plain conversational turn with no tool grounding. The conversation is
//! owned by the caller's session; turns are appended only after the model
//! call succeeds, so a failed call leaves the history untouched.

use crate::compose::ResponseComposer;
use crate::config::ModelSelection;
use crate::ports::model_invoker::ReplyStream;
use crate::ports::{ModelInvoker, ProfileResolver};
use crate::request::RequestBuilder;
use assistant_domain::{
    ClassifiedError, ComposedAnswer, Conversation, GenerationConfig, Turn,
};
use std::sync::Arc;
use tracing::info;

/// Use case for a single chat turn, complete or streaming.
pub struct RunChatUseCase {
    resolver: Arc<dyn ProfileResolver>,
    invoker: Arc<dyn ModelInvoker>,
}

impl RunChatUseCase {
    pub fn new(resolver: Arc<dyn ProfileResolver>, invoker: Arc<dyn ModelInvoker>) -> Self {
        Self { resolver, invoker }
    }

    /// Execute a chat turn and append both sides to the conversation.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        message: impl Into<String>,
        selection: &ModelSelection,
        generation: &GenerationConfig,
    ) -> Result<ComposedAnswer, ClassifiedError> {
        let message = message.into();
        info!(turns = conversation.len(), "chat turn");

        let mut working = conversation.clone();
        working.push_user(message.clone());
        let body = RequestBuilder::build(&working, None, generation)?;

        let profile = self
            .resolver
            .resolve(&selection.family, selection.profile_override.as_deref())
            .await?;

        let reply = self.invoker.invoke(&body, &profile).await?;

        conversation.push(Turn::user(message));
        conversation.push(Turn::assistant(reply.text.clone()));

        Ok(ResponseComposer::compose(None, &reply))
    }

    /// Execute a chat turn with incremental delivery.
    ///
    /// The user turn is appended immediately; the caller consumes the
    /// returned stream and is responsible for appending the assistant turn
    /// once the stream completes (or dropping it on cancellation).
    pub async fn execute_streaming(
        &self,
        conversation: &mut Conversation,
        message: impl Into<String>,
        selection: &ModelSelection,
        generation: &GenerationConfig,
    ) -> Result<ReplyStream, ClassifiedError> {
        let message = message.into();

        let mut working = conversation.clone();
        working.push_user(message.clone());
        let body = RequestBuilder::build(&working, None, generation)?;

        let profile = self
            .resolver
            .resolve(&selection.family, selection.profile_override.as_deref())
            .await?;

        let stream = self.invoker.invoke_streaming(&body, &profile).await?;
        conversation.push(Turn::user(message));
        Ok(stream)
    }
}
