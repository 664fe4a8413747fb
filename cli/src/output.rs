//! Console rendering for composed answers.
//!
//! Tool findings are set apart from model narrative with a labelled
//! header, so the reader can always tell what came from a tool server.

use assistant_domain::{ComposedAnswer, Provenance};

/// Format an answer for the terminal, one block per span.
pub fn format_answer(answer: &ComposedAnswer) -> String {
    let mut blocks = Vec::with_capacity(answer.spans.len());
    for span in &answer.spans {
        match span.source {
            Provenance::Tool(server) => {
                blocks.push(format!("[{}]\n{}", server, span.text));
            }
            Provenance::Note => blocks.push(span.text.clone()),
            Provenance::Model => blocks.push(span.text.clone()),
        }
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_domain::{ProvenanceSpan, ToolServer};

    #[test]
    fn tool_spans_get_a_labelled_header() {
        let answer = ComposedAnswer {
            tool_result: None,
            model_text: Some("narrative".to_string()),
            spans: vec![
                ProvenanceSpan::new(Provenance::Tool(ToolServer::Research), "finding"),
                ProvenanceSpan::new(Provenance::Model, "narrative"),
            ],
        };
        let rendered = format_answer(&answer);
        assert!(rendered.starts_with("[research]\nfinding"));
        assert!(rendered.ends_with("narrative"));
    }

    #[test]
    fn notes_render_without_a_header() {
        let answer = ComposedAnswer {
            tool_result: None,
            model_text: None,
            spans: vec![ProvenanceSpan::new(
                Provenance::Note,
                "[grounding unavailable] the research tool call failed",
            )],
        };
        assert_eq!(
            format_answer(&answer),
            "[grounding unavailable] the research tool call failed"
        );
    }
}
