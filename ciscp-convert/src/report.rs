use colored::Colorize;

use crate::summary::{render, TranslationSummary};
use crate::translate::{Finding, FindingSeverity};

/// Render findings for terminal output, errors red, warnings yellow.
pub fn render_findings(findings: &[Finding]) -> String {
    let mut out = Vec::new();
    for finding in findings {
        let line = match finding.severity {
            FindingSeverity::Error => {
                format!("ERROR {} {}", finding.code, finding.message).red().to_string()
            }
            FindingSeverity::Warning => {
                format!("WARN {} {}", finding.code, finding.message)
                    .yellow()
                    .to_string()
            }
        };
        out.push(line);
    }
    out.join("\n")
}

/// Render summary counters for terminal output.
pub fn render_summary(summary: &TranslationSummary) -> String {
    render(summary).cyan().to_string()
}
