//! Documentation generation use case.
//!
//! Calls the doc-gen tool server with the code text and requested doc type,
//! then asks the model to enhance the generated documentation.

use crate::compose::ResponseComposer;
use crate::config::ModelSelection;
use crate::ports::{ModelInvoker, ProfileResolver, ToolGateway};
use crate::request::RequestBuilder;
use assistant_domain::{
    ClassifiedError, ComposedAnswer, Conversation, GenerationConfig, ToolRequest, ToolServer,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for [`RunDocGenUseCase`].
#[derive(Debug, Clone)]
pub struct DocGenInput {
    /// The code to document.
    pub code: String,
    /// Documentation type, e.g. "api", "readme", "inline", "tutorial".
    pub doc_type: String,
    pub selection: ModelSelection,
    pub generation: GenerationConfig,
}

/// Use case for the documentation generation flow.
pub struct RunDocGenUseCase {
    tools: Arc<dyn ToolGateway>,
    resolver: Arc<dyn ProfileResolver>,
    invoker: Arc<dyn ModelInvoker>,
}

impl RunDocGenUseCase {
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

    pub async fn execute(&self, input: DocGenInput) -> Result<ComposedAnswer, ClassifiedError> {
        info!(doc_type = %input.doc_type, "starting documentation generation");

        let request = ToolRequest::new(ToolServer::DocGen)
            .with_param("code", &input.code)
            .with_param("doc_type", &input.doc_type);

        let tool_result = self.tools.call(&request).await;
        if !tool_result.ok {
            warn!(
                error = ?tool_result.error,
                "doc-gen tool failed; continuing without generated docs"
            );
        }

        let prompt = format!(
            "Enhance this {} documentation with detailed explanations, usage \
             examples, and best practices.\n\nOriginal code:\n{}",
            input.doc_type, input.code
        );
        let conversation = Conversation::from_user(prompt);
        let body = RequestBuilder::build(&conversation, Some(&tool_result), &input.generation)?;

        let profile = self
            .resolver
            .resolve(&input.selection.family, input.selection.profile_override.as_deref())
            .await?;

        let reply = self.invoker.invoke(&body, &profile).await?;
        Ok(ResponseComposer::compose(Some(&tool_result), &reply))
    }
}
