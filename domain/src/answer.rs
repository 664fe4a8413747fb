//! Composed answer with provenance
//!
//! The final result surfaced to the caller. Each span of the answer is
//! tagged with its origin so a reader can always tell tool findings apart
//! from model narrative — including the degraded case where grounding data
//! was unavailable.

use crate::tool::{ToolResult, ToolServer};
use serde::{Deserialize, Serialize};

/// Origin of an answer span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Produced by a tool server.
    Tool(ToolServer),
    /// Generated by the model.
    Model,
    /// A note injected by the composer itself (e.g. a degradation notice).
    Note,
}

/// A contiguous span of the answer with a single origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceSpan {
    pub source: Provenance,
    pub text: String,
}

impl ProvenanceSpan {
    pub fn new(source: Provenance, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }
}

/// The merged result of a tool call (if any) and a model response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedAnswer {
    pub tool_result: Option<ToolResult>,
    pub model_text: Option<String>,
    pub spans: Vec<ProvenanceSpan>,
}

impl ComposedAnswer {
    /// All spans that originated from a tool server.
    pub fn tool_spans(&self) -> impl Iterator<Item = &ProvenanceSpan> {
        self.spans
            .iter()
            .filter(|s| matches!(s.source, Provenance::Tool(_)))
    }

    /// All spans generated by the model.
    pub fn model_spans(&self) -> impl Iterator<Item = &ProvenanceSpan> {
        self.spans
            .iter()
            .filter(|s| matches!(s.source, Provenance::Model))
    }

    /// Flatten the answer into display text, one span per line group.
    pub fn render(&self) -> String {
        self.spans
            .iter()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_filters_by_provenance() {
        let answer = ComposedAnswer {
            tool_result: None,
            model_text: Some("narrative".to_string()),
            spans: vec![
                ProvenanceSpan::new(Provenance::Tool(ToolServer::Research), "finding 1"),
                ProvenanceSpan::new(Provenance::Tool(ToolServer::Research), "finding 2"),
                ProvenanceSpan::new(Provenance::Model, "narrative"),
            ],
        };
        assert_eq!(answer.tool_spans().count(), 2);
        assert_eq!(answer.model_spans().count(), 1);
    }

    #[test]
    fn render_joins_spans_in_order() {
        let answer = ComposedAnswer {
            tool_result: None,
            model_text: None,
            spans: vec![
                ProvenanceSpan::new(Provenance::Note, "note"),
                ProvenanceSpan::new(Provenance::Model, "text"),
            ],
        };
        assert_eq!(answer.render(), "note\ntext");
    }
}
