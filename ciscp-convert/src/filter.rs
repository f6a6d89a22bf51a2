//! Pre-translation rule filter.
//!
//! Drops statements that cannot be meaningfully translated before any
//! candidate rule is constructed. Checks run in a fixed order and the first
//! match wins. Each drop is counted, not treated as an error.

use cisco_acl_core::SourceLine;
use serde::Serialize;

/// Why a statement was excluded from translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Stateful `established` match has no one-line equivalent.
    Established,
    /// Routing-protocol traffic is excluded by policy.
    Ospf,
    /// Source `any` with a source-port qualifier cannot be represented
    /// faithfully.
    AnySourcePort,
    /// Source `host` with a source-port `eq` qualifier, same limitation.
    HostSourcePort,
    /// Bare four-token any-any statement carries no translatable intent
    /// beyond a default rule.
    BareAnyAny,
}

impl SkipReason {
    pub fn code(self) -> &'static str {
        match self {
            SkipReason::Established => "established",
            SkipReason::Ospf => "ospf",
            SkipReason::AnySourcePort => "any_source_port",
            SkipReason::HostSourcePort => "host_source_port",
            SkipReason::BareAnyAny => "bare_any_any",
        }
    }
}

/// Classify one statement; `None` means it survives the filter.
pub fn classify(line: &SourceLine) -> Option<SkipReason> {
    if line.has_token("established") {
        return Some(SkipReason::Established);
    }
    if line.has_token("ospf") {
        return Some(SkipReason::Ospf);
    }
    if line.token(2) == Some("any") && matches!(line.token(3), Some("eq") | Some("range")) {
        return Some(SkipReason::AnySourcePort);
    }
    if line.token(2) == Some("host") && line.token(4) == Some("eq") {
        return Some(SkipReason::HostSourcePort);
    }
    if line.tokens.len() == 4 {
        return Some(SkipReason::BareAnyAny);
    }
    None
}

#[cfg(test)]
mod tests {
    use cisco_acl_core::parse;

    use super::{classify, SkipReason};

    fn line(statement: &str) -> cisco_acl_core::SourceLine {
        let doc = parse(&format!("ip access-list extended T\n{statement}\n")).expect("parse");
        doc.lines.into_iter().next().expect("one statement")
    }

    #[test]
    fn drops_established_matches() {
        assert_eq!(
            classify(&line("permit tcp any host 10.0.0.1 eq 443 established")),
            Some(SkipReason::Established)
        );
    }

    #[test]
    fn drops_ospf_statements() {
        assert_eq!(
            classify(&line("permit ospf any any")),
            Some(SkipReason::Ospf)
        );
    }

    #[test]
    fn drops_any_source_with_source_port() {
        assert_eq!(
            classify(&line("permit tcp any eq 80 any")),
            Some(SkipReason::AnySourcePort)
        );
        assert_eq!(
            classify(&line("permit tcp any range 1024 2048 host 10.0.0.1")),
            Some(SkipReason::AnySourcePort)
        );
    }

    #[test]
    fn drops_host_source_with_source_port_eq() {
        assert_eq!(
            classify(&line("permit tcp host 10.1.1.1 eq 8080 any")),
            Some(SkipReason::HostSourcePort)
        );
    }

    #[test]
    fn drops_bare_any_any() {
        assert_eq!(
            classify(&line("permit ip any any")),
            Some(SkipReason::BareAnyAny)
        );
        // trailing log is stripped by the tokenizer, so this is bare too
        assert_eq!(
            classify(&line("deny ip any any log")),
            Some(SkipReason::BareAnyAny)
        );
    }

    #[test]
    fn first_matching_check_wins() {
        // established outranks the any-source check
        assert_eq!(
            classify(&line("permit tcp any eq 80 any established")),
            Some(SkipReason::Established)
        );
    }

    #[test]
    fn keeps_translatable_statements() {
        assert_eq!(
            classify(&line("permit tcp host 10.1.1.1 10.2.2.0 0.0.0.255 eq 443")),
            None
        );
        assert_eq!(classify(&line("permit tcp any any eq 22")), None);
        assert_eq!(classify(&line("permit ip any host 10.0.0.1")), None);
    }
}
