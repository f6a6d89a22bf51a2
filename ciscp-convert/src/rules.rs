//! The normalized rule model: the protocol-agnostic unit of translated
//! filtering intent. Rules are created by the builder, filtered by the
//! deduplicator, and never mutated after creation.

use std::fmt;

use cisco_acl_core::{NetObject, PortOp};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ip,
    Icmp,
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Ip => "ip",
            Protocol::Icmp => "icmp",
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Accept,
    Drop,
}

impl RuleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleAction::Accept => "accept",
            RuleAction::Drop => "drop",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source or destination of a normalized rule: a network-object identity or
/// the any-sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRef {
    Any,
    Object(NetObject),
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleRef::Any => f.write_str("any"),
            RuleRef::Object(obj) => write!(f, "{obj}"),
        }
    }
}

impl Serialize for RuleRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Protocol-specific service descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Service {
    Any,
    /// ICMP type-code token as written in the ACL (`echo`, `echo-reply`, ...).
    IcmpType(String),
    Port {
        op: PortOp,
        port: String,
    },
    PortRange {
        low: String,
        high: String,
    },
}

impl Service {
    pub fn is_any(&self) -> bool {
        matches!(self, Service::Any)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Any => f.write_str("any"),
            Service::IcmpType(t) => f.write_str(t),
            Service::Port { op, port } => write!(f, "{} {port}", op.as_str()),
            Service::PortRange { low, high } => write!(f, "{low}-{high}"),
        }
    }
}

impl Serialize for Service {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One translated filtering statement.
///
/// Equality is structural over all five attributes; the deduplicator relies
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRule {
    pub protocol: Protocol,
    pub source: RuleRef,
    pub destination: RuleRef,
    pub service: Service,
    pub action: RuleAction,
}

impl fmt::Display for NormalizedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.protocol, self.source, self.destination, self.service, self.action
        )
    }
}
