//! Slot-based statement grammar for extended ACL rules.
//!
//! A rule statement is parsed left to right into named slots instead of
//! fixed numeric offsets, so an `any` endpoint never shifts the position of
//! the fields that follow it:
//!
//! ```text
//! <action> <protocol> <endpoint> [port-match] <endpoint> [port-match | icmp-type]
//! endpoint   := any | host <addr> | <addr> <wildcard>
//! port-match := (eq|lt|gt|neq) <port> | range <low> <high>
//! ```
//!
//! Wildcard masks are validated as contiguous inverted masks; a token is
//! never classified as a mask just because it starts with a zero octet.

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

use crate::addr::{wildcard_prefix, NetObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Permit,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolToken {
    Ip,
    Icmp,
    Tcp,
    Udp,
    /// Protocol keyword this grammar carries but the translation does not
    /// cover (gre, esp, ...).
    Other(String),
}

impl ProtocolToken {
    fn from_token(token: &str) -> Self {
        match token {
            "ip" => ProtocolToken::Ip,
            "icmp" => ProtocolToken::Icmp,
            "tcp" => ProtocolToken::Tcp,
            "udp" => ProtocolToken::Udp,
            other => ProtocolToken::Other(other.to_string()),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ProtocolToken::Tcp | ProtocolToken::Udp)
    }
}

impl fmt::Display for ProtocolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolToken::Ip => write!(f, "ip"),
            ProtocolToken::Icmp => write!(f, "icmp"),
            ProtocolToken::Tcp => write!(f, "tcp"),
            ProtocolToken::Udp => write!(f, "udp"),
            ProtocolToken::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Source or destination slot of a rule statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endpoint {
    Any,
    Host(Ipv4Addr),
    Network { addr: Ipv4Addr, prefix: u8 },
}

impl Endpoint {
    /// The network object this endpoint references, `None` for `any`.
    pub fn object(&self) -> Option<NetObject> {
        match *self {
            Endpoint::Any => None,
            Endpoint::Host(addr) => Some(NetObject::host(addr)),
            Endpoint::Network { addr, prefix } => Some(NetObject::network(addr, prefix)),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Endpoint::Any)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortOp {
    Eq,
    Lt,
    Gt,
    Neq,
}

impl PortOp {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "eq" => Some(PortOp::Eq),
            "lt" => Some(PortOp::Lt),
            "gt" => Some(PortOp::Gt),
            "neq" => Some(PortOp::Neq),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortOp::Eq => "eq",
            PortOp::Lt => "lt",
            PortOp::Gt => "gt",
            PortOp::Neq => "neq",
        }
    }
}

/// Port qualifier attached to an endpoint. Ports stay textual because IOS
/// accepts service names (`www`, `bootps`) as well as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PortMatch {
    Single { op: PortOp, port: String },
    Range { low: String, high: String },
}

/// One extended ACL statement parsed into named slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleLine {
    pub action: Action,
    pub protocol: ProtocolToken,
    pub source: Endpoint,
    pub source_port: Option<PortMatch>,
    pub destination: Endpoint,
    pub destination_port: Option<PortMatch>,
    pub icmp_type: Option<String>,
}

/// Errors for statements that do not match the extended rule grammar.
///
/// These are malformed-line errors: callers log and skip the statement,
/// they never abort the batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("statement ended while expecting {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("expected permit or deny, found '{token}'")]
    UnknownAction { token: String },
    #[error("'{token}' is not a valid IPv4 address")]
    BadAddress { token: String },
    #[error("'{token}' is not a contiguous wildcard mask")]
    BadWildcard { token: String },
}

/// Parse the tokens of one statement into a [`RuleLine`].
///
/// Tokens past the recognized slots (an unknown service operator, for
/// example) are ignored; the service is then simply absent.
pub fn parse_statement(tokens: &[String]) -> Result<RuleLine, GrammarError> {
    let mut cursor = Cursor { tokens, pos: 0 };

    let action = match cursor.next("permit or deny")? {
        "permit" => Action::Permit,
        "deny" => Action::Deny,
        other => {
            return Err(GrammarError::UnknownAction {
                token: other.to_string(),
            })
        }
    };
    let protocol = ProtocolToken::from_token(cursor.next("protocol keyword")?);

    let source = parse_endpoint(&mut cursor)?;
    let source_port = if protocol.is_transport() {
        parse_port_match(&mut cursor)?
    } else {
        None
    };
    let destination = parse_endpoint(&mut cursor)?;

    let mut destination_port = None;
    let mut icmp_type = None;
    match protocol {
        ProtocolToken::Tcp | ProtocolToken::Udp => {
            destination_port = parse_port_match(&mut cursor)?;
        }
        ProtocolToken::Icmp => {
            icmp_type = cursor.take().map(str::to_string);
        }
        ProtocolToken::Ip | ProtocolToken::Other(_) => {}
    }

    Ok(RuleLine {
        action,
        protocol,
        source,
        source_port,
        destination,
        destination_port,
        icmp_type,
    })
}

fn parse_endpoint(cursor: &mut Cursor<'_>) -> Result<Endpoint, GrammarError> {
    match cursor.next("source or destination")? {
        "any" => Ok(Endpoint::Any),
        "host" => {
            let token = cursor.next("host address")?;
            let addr = parse_addr(token)?;
            Ok(Endpoint::Host(addr))
        }
        token => {
            let addr = parse_addr(token)?;
            let mask_token = cursor.next("wildcard mask")?;
            let mask = parse_addr(mask_token)?;
            let prefix = wildcard_prefix(mask).ok_or_else(|| GrammarError::BadWildcard {
                token: mask_token.to_string(),
            })?;
            Ok(Endpoint::Network { addr, prefix })
        }
    }
}

fn parse_port_match(cursor: &mut Cursor<'_>) -> Result<Option<PortMatch>, GrammarError> {
    let Some(token) = cursor.peek() else {
        return Ok(None);
    };
    if token == "range" {
        cursor.take();
        let low = cursor.next("range low port")?.to_string();
        let high = cursor.next("range high port")?.to_string();
        return Ok(Some(PortMatch::Range { low, high }));
    }
    let Some(op) = PortOp::from_token(token) else {
        return Ok(None);
    };
    cursor.take();
    let port = cursor.next("port value")?.to_string();
    Ok(Some(PortMatch::Single { op, port }))
}

fn parse_addr(token: &str) -> Result<Ipv4Addr, GrammarError> {
    token.parse().map_err(|_| GrammarError::BadAddress {
        token: token.to_string(),
    })
}

struct Cursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn take(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, GrammarError> {
        self.take()
            .ok_or(GrammarError::UnexpectedEnd { expected })
    }
}
