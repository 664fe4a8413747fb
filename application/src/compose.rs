//! Response composer
//!
//! Merges a tool result (if any) with the model's reply into a single
//! [`ComposedAnswer`], tagging every span with its provenance. A failed
//! tool call still yields an answer containing the model's text, prefixed
//! with a visible note that grounding data was unavailable — an ungrounded
//! answer is never presented as if it were grounded.

use assistant_domain::{
    ComposedAnswer, ModelReply, Provenance, ProvenanceSpan, ToolResult,
};

pub struct ResponseComposer;

impl ResponseComposer {
    pub fn compose(tool_result: Option<&ToolResult>, reply: &ModelReply) -> ComposedAnswer {
        let mut spans = Vec::new();

        if let Some(tool) = tool_result {
            if tool.ok {
                for finding in finding_entries(tool) {
                    spans.push(ProvenanceSpan::new(Provenance::Tool(tool.server), finding));
                }
            } else {
                spans.push(ProvenanceSpan::new(
                    Provenance::Note,
                    format!(
                        "[grounding unavailable] the {} tool call failed: {}",
                        tool.server,
                        tool.error_summary().unwrap_or_else(|| "unknown".to_string())
                    ),
                ));
            }
        }

        if !reply.text.is_empty() {
            spans.push(ProvenanceSpan::new(Provenance::Model, reply.text.clone()));
        }

        ComposedAnswer {
            tool_result: tool_result.cloned(),
            model_text: Some(reply.text.clone()),
            spans,
        }
    }
}

/// Split a successful tool payload into individual finding entries.
///
/// A `findings` array (or a top-level array) yields one span per element;
/// anything else becomes a single span with the serialized payload.
fn finding_entries(tool: &ToolResult) -> Vec<String> {
    let Some(data) = tool.data.as_ref() else {
        return Vec::new();
    };

    let list = match data {
        serde_json::Value::Array(items) => Some(items),
        serde_json::Value::Object(map) => map.get("findings").and_then(|v| v.as_array()),
        _ => None,
    };

    match list {
        Some(items) if !items.is_empty() => items.iter().map(render_entry).collect(),
        _ => vec![serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())],
    }
}

fn render_entry(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_domain::{ClassifiedError, ToolServer};

    #[test]
    fn findings_become_leading_tool_spans() {
        let tool = ToolResult::success(
            ToolServer::Research,
            serde_json::json!({
                "findings": [
                    "Repository structure analyzed",
                    "Key components identified",
                    "Dependencies mapped",
                ]
            }),
        );
        let reply = ModelReply::new("Here is my assessment.");
        let answer = ResponseComposer::compose(Some(&tool), &reply);

        // 3 tool-sourced spans followed by the model span
        assert_eq!(answer.tool_spans().count(), 3);
        assert_eq!(answer.model_spans().count(), 1);
        let last = answer.spans.last().unwrap();
        assert_eq!(last.source, Provenance::Model);
    }

    #[test]
    fn failed_tool_call_degrades_with_visible_note() {
        let tool = ToolResult::failure(
            ToolServer::Research,
            ClassifiedError::timeout("no response in 30s"),
        );
        let reply = ModelReply::new("Answer without grounding.");
        let answer = ResponseComposer::compose(Some(&tool), &reply);

        assert_eq!(answer.spans.len(), 2);
        assert_eq!(answer.spans[0].source, Provenance::Note);
        assert!(answer.spans[0].text.contains("grounding unavailable"));
        assert_eq!(answer.spans[1].text, "Answer without grounding.");
        assert_eq!(answer.model_text.as_deref(), Some("Answer without grounding."));
    }

    #[test]
    fn no_tool_result_yields_model_only_answer() {
        let reply = ModelReply::new("Plain chat answer.");
        let answer = ResponseComposer::compose(None, &reply);
        assert_eq!(answer.spans.len(), 1);
        assert_eq!(answer.spans[0].source, Provenance::Model);
        assert!(answer.tool_result.is_none());
    }

    #[test]
    fn non_list_payload_becomes_single_span() {
        let tool = ToolResult::success(
            ToolServer::DocGen,
            serde_json::json!({"documentation": "Generated api docs"}),
        );
        let reply = ModelReply::new("Enhanced docs follow.");
        let answer = ResponseComposer::compose(Some(&tool), &reply);
        assert_eq!(answer.tool_spans().count(), 1);
    }
}
