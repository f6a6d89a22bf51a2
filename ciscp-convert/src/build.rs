//! Rule construction.
//!
//! Maps one parsed statement onto a [`NormalizedRule`], resolving its
//! endpoints against the extracted object set. A reference with no matching
//! object is a hard, reported error identifying the offending line and
//! field, never a silently empty reference.

use cisco_acl_core::{Action, Endpoint, PortMatch, ProtocolToken, RuleLine, SourceLine};
use thiserror::Error;

use crate::extract::ObjectSet;
use crate::rules::{NormalizedRule, Protocol, RuleAction, RuleRef, Service};

/// Errors raised while building a rule from a filtered statement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("line {number}: {field} reference {object} not found in extracted object set: {raw}")]
    UnresolvedReference {
        number: usize,
        field: &'static str,
        object: String,
        raw: String,
    },
}

/// Build the normalized rule for one statement.
///
/// Returns `Ok(None)` for statements that survive the filter but still carry
/// no translatable intent: unsupported protocol keywords and degenerate
/// any/any/any candidates.
pub fn build_rule(
    line: &SourceLine,
    rule: &RuleLine,
    objects: &ObjectSet,
) -> Result<Option<NormalizedRule>, BuildError> {
    let protocol = match rule.protocol {
        ProtocolToken::Ip => Protocol::Ip,
        ProtocolToken::Icmp => Protocol::Icmp,
        ProtocolToken::Tcp => Protocol::Tcp,
        ProtocolToken::Udp => Protocol::Udp,
        ProtocolToken::Other(_) => return Ok(None),
    };

    let action = match rule.action {
        Action::Permit => RuleAction::Accept,
        Action::Deny => RuleAction::Drop,
    };

    let source = resolve(&rule.source, objects, line, "source")?;
    let destination = resolve(&rule.destination, objects, line, "destination")?;

    let service = match protocol {
        Protocol::Ip => Service::Any,
        Protocol::Icmp => rule
            .icmp_type
            .clone()
            .map(Service::IcmpType)
            .unwrap_or(Service::Any),
        Protocol::Tcp | Protocol::Udp => match &rule.destination_port {
            Some(PortMatch::Single { op, port }) => Service::Port {
                op: *op,
                port: port.clone(),
            },
            Some(PortMatch::Range { low, high }) => Service::PortRange {
                low: low.clone(),
                high: high.clone(),
            },
            None => Service::Any,
        },
    };

    // any/any/any matches everything and carries no intent beyond the
    // default rule, which downstream policy construction handles itself
    if source == RuleRef::Any && destination == RuleRef::Any && service.is_any() {
        return Ok(None);
    }

    Ok(Some(NormalizedRule {
        protocol,
        source,
        destination,
        service,
        action,
    }))
}

/// Map an endpoint slot to a rule reference via the object set.
fn resolve(
    endpoint: &Endpoint,
    objects: &ObjectSet,
    line: &SourceLine,
    field: &'static str,
) -> Result<RuleRef, BuildError> {
    let Some(object) = endpoint.object() else {
        return Ok(RuleRef::Any);
    };
    if !objects.contains(&object) {
        return Err(BuildError::UnresolvedReference {
            number: line.number,
            field,
            object: object.to_string(),
            raw: line.raw.clone(),
        });
    }
    Ok(RuleRef::Object(object))
}

#[cfg(test)]
mod tests {
    use cisco_acl_core::{parse, parse_statement};
    use pretty_assertions::assert_eq;

    use super::{build_rule, BuildError};
    use crate::extract::{extract_objects, ObjectSet};
    use crate::rules::{Protocol, RuleAction, RuleRef, Service};

    fn statement(s: &str) -> (cisco_acl_core::SourceLine, cisco_acl_core::RuleLine) {
        let doc = parse(&format!("ip access-list extended T\n{s}\n")).expect("parse");
        let line = doc.lines.into_iter().next().expect("one line");
        let rule = parse_statement(&line.tokens).expect("grammar");
        (line, rule)
    }

    fn build(s: &str) -> Option<crate::rules::NormalizedRule> {
        let (line, rule) = statement(s);
        let objects = extract_objects(std::iter::once(&rule));
        build_rule(&line, &rule, &objects).expect("build")
    }

    #[test]
    fn builds_tcp_rule_with_resolved_endpoints() {
        let rule = build("permit tcp host 10.1.1.1 10.2.2.0 0.0.0.255 eq 443").expect("rule");
        assert_eq!(rule.protocol, Protocol::Tcp);
        assert_eq!(rule.to_string(), "tcp 10.1.1.1/32 10.2.2.0/24 eq 443 accept");
    }

    #[test]
    fn ip_rule_carries_any_service() {
        let rule = build("deny ip host 10.1.1.1 any").expect("rule");
        assert_eq!(rule.service, Service::Any);
        assert_eq!(rule.action, RuleAction::Drop);
        assert_eq!(rule.destination, RuleRef::Any);
    }

    #[test]
    fn icmp_type_defaults_to_any() {
        let rule = build("permit icmp host 10.1.1.1 host 10.2.2.2").expect("rule");
        assert_eq!(rule.service, Service::Any);
    }

    #[test]
    fn icmp_type_token_becomes_service() {
        let rule = build("permit icmp any host 10.2.2.2 echo").expect("rule");
        assert_eq!(rule.service, Service::IcmpType("echo".to_string()));
    }

    #[test]
    fn transport_rule_without_port_is_emitted_with_any_service() {
        let rule = build("permit tcp host 10.1.1.1 host 10.2.2.2").expect("rule");
        assert_eq!(rule.service, Service::Any);
    }

    #[test]
    fn any_any_any_candidate_is_skipped() {
        assert_eq!(build("permit icmp any any"), None);
    }

    #[test]
    fn unsupported_protocol_yields_no_rule() {
        assert_eq!(build("permit gre host 10.1.1.1 host 10.2.2.2"), None);
    }

    #[test]
    fn dangling_reference_is_a_hard_error() {
        let (line, rule) = statement("permit ip host 10.1.1.1 any");
        let empty = ObjectSet::new();
        let err = build_rule(&line, &rule, &empty).expect_err("should fail");
        match err {
            BuildError::UnresolvedReference { number, field, object, .. } => {
                assert_eq!(number, 2);
                assert_eq!(field, "source");
                assert_eq!(object, "10.1.1.1/32");
            }
        }
    }
}
