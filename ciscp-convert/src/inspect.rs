//! Per-line disposition preview for the `inspect` command.
//!
//! Shows what the pipeline would do with each statement without building
//! any rules: which filter check dropped it, whether it parses, and the
//! header context it was read under.

use cisco_acl_core::{parse_statement, AclDocument, AclType};
use serde::Serialize;

use crate::filter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "disposition")]
pub enum LineState {
    Keep,
    StandardAcl,
    Filtered { reason: &'static str },
    Malformed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDisposition {
    pub number: usize,
    pub acl_name: String,
    #[serde(flatten)]
    pub state: LineState,
    pub raw: String,
}

/// Classify every statement the way the pipeline's front half would.
pub fn inspect_lines(doc: &AclDocument) -> Vec<LineDisposition> {
    doc.lines
        .iter()
        .map(|line| {
            let state = if line.acl_type == AclType::Standard {
                LineState::StandardAcl
            } else if let Some(reason) = filter::classify(line) {
                LineState::Filtered {
                    reason: reason.code(),
                }
            } else {
                match parse_statement(&line.tokens) {
                    Ok(_) => LineState::Keep,
                    Err(err) => LineState::Malformed {
                        error: err.to_string(),
                    },
                }
            };
            LineDisposition {
                number: line.number,
                acl_name: line.acl_name.clone(),
                state,
                raw: line.raw.clone(),
            }
        })
        .collect()
}

/// Render dispositions as aligned text lines.
pub fn render_inspect(dispositions: &[LineDisposition]) -> String {
    let mut out = Vec::new();
    for d in dispositions {
        let state = match &d.state {
            LineState::Keep => "keep".to_string(),
            LineState::StandardAcl => "skip reason=standard_acl".to_string(),
            LineState::Filtered { reason } => format!("skip reason={reason}"),
            LineState::Malformed { error } => format!("malformed error=\"{error}\""),
        };
        out.push(format!("{:>4} [{}] {} :: {}", d.number, d.acl_name, state, d.raw));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use cisco_acl_core::parse;
    use pretty_assertions::assert_eq;

    use super::{inspect_lines, render_inspect, LineState};

    #[test]
    fn classifies_keep_filter_and_malformed_states() {
        let doc = parse(
            "ip access-list extended T\n\
             permit tcp host 10.1.1.1 any eq 80\n\
             permit tcp any any established\n\
             permit tcp host 10.1.1 any eq 80\n",
        )
        .expect("parse");
        let dispositions = inspect_lines(&doc);
        assert_eq!(dispositions.len(), 3);
        assert_eq!(dispositions[0].state, LineState::Keep);
        assert_eq!(
            dispositions[1].state,
            LineState::Filtered {
                reason: "established"
            }
        );
        assert!(matches!(dispositions[2].state, LineState::Malformed { .. }));
    }

    #[test]
    fn rendering_includes_line_number_and_acl_name() {
        let doc = parse("ip access-list extended EDGE\npermit ip any host 10.0.0.1\n")
            .expect("parse");
        let text = render_inspect(&inspect_lines(&doc));
        assert!(text.contains("[EDGE] keep"));
        assert!(text.contains("permit ip any host 10.0.0.1"));
    }
}
