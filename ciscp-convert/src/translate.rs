//! Pipeline orchestration: filter, parse, extract, build, deduplicate.
//!
//! The whole input is materialized before any output is produced, and both
//! accumulating buffers (object set and rulebase) are owned by the single
//! invocation. Re-running on the same input produces identical output; no
//! wall-clock or random state is consulted.

use cisco_acl_core::{parse_statement, AclDocument, AclType, ProtocolToken, RuleLine, SourceLine};
use serde::Serialize;

use crate::build::{build_rule, BuildError};
use crate::dedup::{Disposition, Rulebase, ShadowPolicy};
use crate::extract::{extract_objects, ObjectSet};
use crate::filter;
use crate::rules::NormalizedRule;
use crate::summary::TranslationSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Warning,
    Error,
}

/// One reportable observation from the pipeline, surfaced in the summary
/// output instead of interrupting the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: FindingSeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateOptions {
    pub shadow_policy: ShadowPolicy,
}

/// Everything one pipeline invocation produces.
#[derive(Debug, Clone)]
pub struct Translation {
    pub objects: ObjectSet,
    pub rules: Vec<NormalizedRule>,
    pub summary: TranslationSummary,
    pub findings: Vec<Finding>,
}

impl Translation {
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warning)
            .count()
    }
}

/// Run the full translation over a parsed ACL document.
pub fn translate(doc: &AclDocument, options: &TranslateOptions) -> Translation {
    let mut summary = TranslationSummary::default();
    let mut findings = Vec::new();

    // Filter, then parse the survivors into slot form. Filter-stage skips
    // happen before any candidate rule exists.
    let mut parsed: Vec<(&SourceLine, RuleLine)> = Vec::new();
    for line in &doc.lines {
        summary.statements += 1;
        if line.acl_type == AclType::Standard {
            summary.standard_skipped += 1;
            continue;
        }
        if let Some(reason) = filter::classify(line) {
            summary.filtered.bump(reason);
            continue;
        }
        match parse_statement(&line.tokens) {
            Ok(rule) => parsed.push((line, rule)),
            Err(err) => {
                summary.malformed += 1;
                findings.push(Finding {
                    severity: FindingSeverity::Warning,
                    code: "malformed_statement".to_string(),
                    message: format!("line {}: {err}: {}", line.number, line.raw),
                });
            }
        }
    }

    // Extraction runs to completion before any rule is built.
    let objects = extract_objects(parsed.iter().map(|(_, rule)| rule));
    summary.objects = objects.len();

    // One partitioning pass per protocol family; build order is ip first,
    // then icmp, then tcp/udp, so the shadow check sees any-service ip
    // rules before the narrower candidates they may cover.
    let mut ip: Vec<(&SourceLine, &RuleLine)> = Vec::new();
    let mut icmp: Vec<(&SourceLine, &RuleLine)> = Vec::new();
    let mut transport: Vec<(&SourceLine, &RuleLine)> = Vec::new();
    for (line, rule) in &parsed {
        match rule.protocol {
            ProtocolToken::Ip => ip.push((*line, rule)),
            ProtocolToken::Icmp => icmp.push((*line, rule)),
            // A source-port qualifier on a network source slips past the
            // filter checks for any/host sources, but it is just as
            // unrepresentable in the target rule model.
            ProtocolToken::Tcp | ProtocolToken::Udp if rule.source_port.is_some() => {
                summary.source_port_skipped += 1;
                findings.push(Finding {
                    severity: FindingSeverity::Warning,
                    code: "unsupported_source_port".to_string(),
                    message: format!(
                        "line {}: source-port qualifier cannot be represented: {}",
                        line.number, line.raw
                    ),
                });
            }
            ProtocolToken::Tcp | ProtocolToken::Udp => transport.push((*line, rule)),
            ProtocolToken::Other(ref keyword) => {
                summary.unsupported_protocol += 1;
                findings.push(Finding {
                    severity: FindingSeverity::Warning,
                    code: "unsupported_protocol".to_string(),
                    message: format!(
                        "line {}: protocol '{keyword}' has no translation: {}",
                        line.number, line.raw
                    ),
                });
            }
        }
    }

    let mut rulebase = Rulebase::new(options.shadow_policy);
    for (line, rule) in ip.into_iter().chain(icmp).chain(transport) {
        match build_rule(line, rule, &objects) {
            Ok(Some(candidate)) => match rulebase.push(candidate) {
                Disposition::Accepted => summary.accepted += 1,
                Disposition::AcceptedShadowed => {
                    summary.accepted += 1;
                    summary.shadow_kept += 1;
                    findings.push(Finding {
                        severity: FindingSeverity::Warning,
                        code: "shadowed_rule_kept".to_string(),
                        message: format!(
                            "line {}: kept although an ip any-service rule covers it: {}",
                            line.number, line.raw
                        ),
                    });
                }
                Disposition::Duplicate => summary.duplicates += 1,
                Disposition::Shadowed => summary.shadowed += 1,
                Disposition::EchoReply => summary.echo_reply_skipped += 1,
            },
            Ok(None) => summary.non_actionable += 1,
            Err(err @ BuildError::UnresolvedReference { .. }) => {
                summary.unresolved += 1;
                findings.push(Finding {
                    severity: FindingSeverity::Error,
                    code: "unresolved_reference".to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    Translation {
        objects,
        rules: rulebase.into_rules(),
        summary,
        findings,
    }
}
