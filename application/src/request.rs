//! Request builder
//!
//! Turns a [`Conversation`] plus an optional [`ToolResult`] and a
//! [`GenerationConfig`] into a protocol-correct request body for the model
//! endpoint. All validation happens here, locally, before any network call:
//! parameter bounds, strict role alternation, and the shape of the message
//! list.

use assistant_domain::{
    ClassifiedError, ContentBlock, Conversation, GenerationConfig, Role, ToolResult,
};
use serde::Serialize;

/// Wire-level request body.
///
/// Serializes to exactly the shape the endpoint accepts:
/// `{ "messages": [...], "inferenceConfig": { "maxOutputTokens", "temperature" } }`
/// — no extra keys, no omissions.
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub messages: Vec<ApiMessage>,
    #[serde(rename = "inferenceConfig")]
    pub inference_config: ApiInferenceConfig,
}

/// One role-tagged message in the request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub role: &'static str,
    pub content: Vec<ApiContentBlock>,
}

/// A single text content block on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ApiContentBlock {
    pub text: String,
}

/// The closed inference configuration section.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInferenceConfig {
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Builds protocol-correct request bodies.
pub struct RequestBuilder;

impl RequestBuilder {
    /// Build a request from a conversation, an optional tool result, and
    /// generation parameters.
    ///
    /// Fails with `InvalidConfig` if the parameters are out of bounds and
    /// with `InvalidConversation` if the conversation is empty, does not end
    /// on a user turn, or violates strict role alternation. No silent
    /// repair is attempted.
    ///
    /// A successful tool result is serialized into a leading content block
    /// of the final user turn so the model can ground its answer; a failed
    /// one contributes its error summary plus an explicit failure note.
    pub fn build(
        conversation: &Conversation,
        tool_result: Option<&ToolResult>,
        config: &GenerationConfig,
    ) -> Result<RequestBody, ClassifiedError> {
        // Re-check bounds: the struct fields are public, so a caller may
        // have bypassed the checked constructor.
        GenerationConfig::new(config.max_output_tokens, config.temperature)?;

        if conversation.is_empty() {
            return Err(ClassifiedError::invalid_conversation(
                "conversation has no turns",
            ));
        }
        if let Some(index) = conversation.first_alternation_violation() {
            return Err(ClassifiedError::invalid_conversation(format!(
                "turn {} breaks strict user/assistant alternation",
                index
            )));
        }
        let last = conversation.last().expect("non-empty checked above");
        if last.role != Role::User {
            return Err(ClassifiedError::invalid_conversation(
                "conversation must end with a user turn",
            ));
        }

        let last_index = conversation.len() - 1;
        let messages = conversation
            .turns()
            .iter()
            .enumerate()
            .map(|(index, turn)| {
                let mut content: Vec<ApiContentBlock> = Vec::new();
                if index == last_index {
                    if let Some(tool) = tool_result {
                        content.push(ApiContentBlock {
                            text: render_block(&tool_context_block(tool)),
                        });
                    }
                }
                content.extend(turn.content.iter().map(|block| ApiContentBlock {
                    text: render_block(block),
                }));
                ApiMessage {
                    role: turn.role.as_str(),
                    content,
                }
            })
            .collect();

        Ok(RequestBody {
            messages,
            inference_config: ApiInferenceConfig {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
            },
        })
    }
}

/// Render one domain content block into wire text. Tool-derived blocks get
/// a prefix naming their origin so the model knows the text is grounding
/// data rather than user prose.
fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Text(text) => text.clone(),
        ContentBlock::ToolFindings { server, data } => {
            format!("Findings from the {} tool:\n{}", server, data)
        }
    }
}

/// Turn a tool result into the leading content block of the final user
/// turn. A successful result becomes a provenance-tagged findings block;
/// a failed one contributes only its error summary as plain text — raw
/// transport internals never reach the prompt.
fn tool_context_block(tool: &ToolResult) -> ContentBlock {
    if tool.ok {
        let data = tool
            .data
            .as_ref()
            .map(|d| serde_json::to_string_pretty(d).unwrap_or_else(|_| d.to_string()))
            .unwrap_or_default();
        ContentBlock::ToolFindings {
            server: tool.server,
            data,
        }
    } else {
        ContentBlock::text(format!(
            "Note: the {} tool call failed and its findings are unavailable. \
             Error: {}",
            tool.server,
            tool.error_summary().unwrap_or_else(|| "unknown".to_string())
        ))
    }
}
