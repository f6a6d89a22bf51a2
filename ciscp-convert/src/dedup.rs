//! Rule deduplication and any-rule shadow suppression.
//!
//! Candidates are checked against all previously accepted rules: structural
//! duplicates are dropped, and rules whose source/destination pair is
//! already covered by an accepted `ip`/any-service rule are shadowed.
//! Shadow suppression is a configurable policy; shadowed and duplicate
//! candidates are counted distinctly either way.

use serde::Serialize;

use crate::rules::{NormalizedRule, Protocol, Service};

/// What to do with a candidate shadowed by a broader any-service `ip` rule.
///
/// Suppression matches the source firewall's layer semantics (the any rule
/// already matches that traffic), but it can also drop a narrower explicit
/// drop rule, so keeping shadowed rules is available as a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowPolicy {
    #[default]
    Suppress,
    Keep,
}

/// Terminal state of one candidate rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Accepted,
    /// Accepted under [`ShadowPolicy::Keep`] although an any-service `ip`
    /// rule already covers its source/destination pair.
    AcceptedShadowed,
    Duplicate,
    Shadowed,
    /// Permitting echo-reply is meaningless under stateful inspection;
    /// these are skipped regardless of duplication status.
    EchoReply,
}

/// The accumulating list of accepted rules.
#[derive(Debug, Clone, Default)]
pub struct Rulebase {
    rules: Vec<NormalizedRule>,
    shadow_policy: ShadowPolicy,
}

impl Rulebase {
    pub fn new(shadow_policy: ShadowPolicy) -> Self {
        Rulebase {
            rules: Vec::new(),
            shadow_policy,
        }
    }

    /// Offer a candidate; each candidate reaches exactly one terminal state.
    pub fn push(&mut self, rule: NormalizedRule) -> Disposition {
        if rule.protocol == Protocol::Icmp && rule.service == Service::IcmpType("echo-reply".into())
        {
            return Disposition::EchoReply;
        }
        if self.rules.contains(&rule) {
            return Disposition::Duplicate;
        }
        if self.is_shadowed(&rule) {
            match self.shadow_policy {
                ShadowPolicy::Suppress => return Disposition::Shadowed,
                ShadowPolicy::Keep => {
                    self.rules.push(rule);
                    return Disposition::AcceptedShadowed;
                }
            }
        }
        self.rules.push(rule);
        Disposition::Accepted
    }

    /// An earlier `ip`/any-service rule with the same source and destination
    /// already matches this candidate's traffic.
    fn is_shadowed(&self, candidate: &NormalizedRule) -> bool {
        if candidate.protocol == Protocol::Ip {
            return false;
        }
        self.rules.iter().any(|r| {
            r.protocol == Protocol::Ip
                && r.service == Service::Any
                && r.source == candidate.source
                && r.destination == candidate.destination
        })
    }

    pub fn rules(&self) -> &[NormalizedRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<NormalizedRule> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
