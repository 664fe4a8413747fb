//! Repository research use case.
//!
//! Calls the research tool server for grounding data, then asks the model
//! for insights seeded with that data. The tool call is strictly sequenced
//! before the model call because its output feeds the request; a tool
//! failure degrades the answer (with a visible note) instead of aborting.

use crate::compose::ResponseComposer;
use crate::config::ModelSelection;
use crate::ports::{ModelInvoker, ProfileResolver, ToolGateway};
use crate::request::RequestBuilder;
use assistant_domain::{
    ClassifiedError, ComposedAnswer, Conversation, GenerationConfig, ToolRequest, ToolServer,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for [`RunResearchUseCase`].
#[derive(Debug, Clone)]
pub struct ResearchInput {
    pub repository_url: String,
    pub query: String,
    pub selection: ModelSelection,
    pub generation: GenerationConfig,
}

/// Use case for the repository research flow.
pub struct RunResearchUseCase {
    tools: Arc<dyn ToolGateway>,
    resolver: Arc<dyn ProfileResolver>,
    invoker: Arc<dyn ModelInvoker>,
}

impl RunResearchUseCase {
    pub fn new(
        tools: Arc<dyn ToolGateway>,
        resolver: Arc<dyn ProfileResolver>,
        invoker: Arc<dyn ModelInvoker>,
    ) -> Self {
        Self {
            tools,
            resolver,
            invoker,
        }
    }

    pub async fn execute(&self, input: ResearchInput) -> Result<ComposedAnswer, ClassifiedError> {
        info!(repository = %input.repository_url, "starting repository research");

        let request = ToolRequest::new(ToolServer::Research)
            .with_param("repository_url", &input.repository_url)
            .with_param("query", &input.query);

        // Tool before model: its output feeds the request body.
        let tool_result = self.tools.call(&request).await;
        if !tool_result.ok {
            warn!(
                error = ?tool_result.error,
                "research tool failed; continuing without grounding"
            );
        }

        let prompt = format!(
            "Based on the repository analysis, provide detailed insights about: {}",
            input.query
        );
        let conversation = Conversation::from_user(prompt);
        let body = RequestBuilder::build(&conversation, Some(&tool_result), &input.generation)?;

        let profile = self
            .resolver
            .resolve(&input.selection.family, input.selection.profile_override.as_deref())
            .await?;
        debug!(identifier = %profile.resolved_identifier, "resolved inference profile");

        let reply = self.invoker.invoke(&body, &profile).await?;
        Ok(ResponseComposer::compose(Some(&tool_result), &reply))
    }
}
