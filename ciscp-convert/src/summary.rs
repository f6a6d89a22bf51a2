use serde::Serialize;

use crate::filter::SkipReason;

/// Per-reason counters for filter-stage drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub established: usize,
    pub ospf: usize,
    pub any_source_port: usize,
    pub host_source_port: usize,
    pub bare_any_any: usize,
}

impl FilterCounts {
    pub fn bump(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Established => self.established += 1,
            SkipReason::Ospf => self.ospf += 1,
            SkipReason::AnySourcePort => self.any_source_port += 1,
            SkipReason::HostSourcePort => self.host_source_port += 1,
            SkipReason::BareAnyAny => self.bare_any_any += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.established + self.ospf + self.any_source_port + self.host_source_port
            + self.bare_any_any
    }
}

/// Counters accumulated across one pipeline invocation.
///
/// Skips are reported, not treated as errors; only input-level failures
/// abort a run before a summary exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationSummary {
    /// Statements read from the input (headers, blanks and comments not
    /// counted).
    pub statements: usize,
    /// Lines belonging to standard ACLs, which have no protocol or port
    /// granularity to translate.
    pub standard_skipped: usize,
    pub filtered: FilterCounts,
    pub malformed: usize,
    pub unsupported_protocol: usize,
    /// tcp/udp statements dropped because a source-port qualifier survived
    /// the filter (network sources are not covered by its checks).
    pub source_port_skipped: usize,
    pub unresolved: usize,
    pub non_actionable: usize,
    pub duplicates: usize,
    pub shadowed: usize,
    /// Shadowed rules kept under the keep policy, flagged for review.
    pub shadow_kept: usize,
    pub echo_reply_skipped: usize,
    pub accepted: usize,
    pub objects: usize,
}

impl TranslationSummary {
    /// Everything that was read but did not become an accepted rule.
    pub fn skipped_total(&self) -> usize {
        self.standard_skipped
            + self.filtered.total()
            + self.malformed
            + self.unsupported_protocol
            + self.source_port_skipped
            + self.unresolved
            + self.non_actionable
            + self.duplicates
            + self.shadowed
            + self.echo_reply_skipped
    }
}

pub fn render(summary: &TranslationSummary) -> String {
    format!(
        "translate_summary statements={} accepted={} objects={} skipped={}\n\
         skip_detail standard={} filtered={} malformed={} unsupported={} source_port={} \
         unresolved={} non_actionable={} duplicates={} shadowed={} shadow_kept={} echo_reply={}",
        summary.statements,
        summary.accepted,
        summary.objects,
        summary.skipped_total(),
        summary.standard_skipped,
        summary.filtered.total(),
        summary.malformed,
        summary.unsupported_protocol,
        summary.source_port_skipped,
        summary.unresolved,
        summary.non_actionable,
        summary.duplicates,
        summary.shadowed,
        summary.shadow_kept,
        summary.echo_reply_skipped,
    )
}

#[cfg(test)]
mod tests {
    use super::{render, FilterCounts, TranslationSummary};
    use crate::filter::SkipReason;

    #[test]
    fn filter_counts_total_sums_every_reason() {
        let mut counts = FilterCounts::default();
        counts.bump(SkipReason::Established);
        counts.bump(SkipReason::Established);
        counts.bump(SkipReason::BareAnyAny);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn render_is_key_value_lines() {
        let summary = TranslationSummary {
            statements: 5,
            accepted: 3,
            objects: 4,
            echo_reply_skipped: 2,
            ..TranslationSummary::default()
        };
        let text = render(&summary);
        assert!(text.starts_with("translate_summary statements=5 accepted=3 objects=4 skipped=2"));
        assert!(text.contains("echo_reply=2"));
    }
}
