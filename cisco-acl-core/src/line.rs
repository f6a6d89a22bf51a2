use serde::Serialize;

/// Type of a named access list as declared on its header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AclType {
    Extended,
    Standard,
}

impl AclType {
    pub fn as_str(self) -> &'static str {
        match self {
            AclType::Extended => "extended",
            AclType::Standard => "standard",
        }
    }
}

/// One whitespace-tokenized ACL statement, immutable once built.
///
/// The header context (ACL name and type) is attached to every statement so
/// later stages never need to look back at preceding lines. The trailing
/// `log` keyword, which carries no translatable meaning, is already stripped
/// from `tokens`; `raw` keeps the untouched source text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub tokens: Vec<String>,
    pub acl_name: String,
    pub acl_type: AclType,
    /// 1-based line number in the input file.
    pub number: usize,
    pub raw: String,
}

impl SourceLine {
    /// Token at `idx`, or `None` past the end of the statement.
    pub fn token(&self, idx: usize) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    pub fn has_token(&self, needle: &str) -> bool {
        self.tokens.iter().any(|t| t == needle)
    }
}

/// A parsed ACL file: the ordered statements of one or more named ACLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AclDocument {
    pub lines: Vec<SourceLine>,
}

impl AclDocument {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
