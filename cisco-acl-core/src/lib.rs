//! Parsing primitives for Cisco IOS named extended access lists.

pub mod addr;
pub mod grammar;
pub mod line;
pub mod parser;

pub use addr::{wildcard_prefix, NetObject};
pub use grammar::{
    parse_statement, Action, Endpoint, GrammarError, PortMatch, PortOp, ProtocolToken, RuleLine,
};
pub use line::{AclDocument, AclType, SourceLine};
pub use parser::{parse, parse_file, ParseError};
