use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::line::{AclDocument, AclType, SourceLine};

/// Errors that can occur while reading an ACL file into an [`AclDocument`].
///
/// These are input errors in the fatal class: a file that cannot be read or
/// that has no recognizable header yields no partial output. Statements that
/// merely fail the rule grammar are not parse errors; they surface later as
/// per-line findings.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the input file.
    #[error("failed to read ACL file: {0}")]
    Io(#[from] std::io::Error),
    /// A statement appeared before any `access-list` header line.
    #[error("line {number}: statement before any access-list header: {raw}")]
    MissingHeader { number: usize, raw: String },
    /// Header line did not declare a recognized ACL type.
    #[error("line {number}: unknown access-list type '{found}' (expected extended or standard)")]
    UnknownAclType { number: usize, found: String },
    /// Header line ended before the ACL type or name.
    #[error("line {number}: truncated access-list header: {raw}")]
    TruncatedHeader { number: usize, raw: String },
}

/// Parse ACL text into an [`AclDocument`].
///
/// Blank lines, `!`/`#` comment lines, and `remark` statements are dropped.
/// The `access-list <type> <name>` header (optionally preceded by an `ip`
/// token, as printed by `show running-config`) sets the name and type
/// attached to every following statement. A trailing `log` keyword is
/// stripped before the statement is stored.
pub fn parse(text: &str) -> Result<AclDocument, ParseError> {
    let mut lines = Vec::new();
    let mut header: Option<(AclType, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('!') || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
        if tokens.first().map(String::as_str) == Some("remark") {
            continue;
        }

        if let Some(pos) = header_keyword_position(&tokens) {
            header = Some(parse_header(&tokens, pos, number, trimmed)?);
            continue;
        }

        let Some((acl_type, acl_name)) = header.clone() else {
            return Err(ParseError::MissingHeader {
                number,
                raw: trimmed.to_string(),
            });
        };

        if tokens.last().map(String::as_str) == Some("log") {
            tokens.pop();
        }

        lines.push(SourceLine {
            tokens,
            acl_name,
            acl_type,
            number,
            raw: trimmed.to_string(),
        });
    }

    Ok(AclDocument { lines })
}

/// Parse an ACL file into an [`AclDocument`].
pub fn parse_file(path: &Path) -> Result<AclDocument, ParseError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Header lines carry `access-list` as the first token, or the second when
/// prefixed by `ip`.
fn header_keyword_position(tokens: &[String]) -> Option<usize> {
    match tokens.first().map(String::as_str) {
        Some("access-list") => Some(0),
        Some("ip") if tokens.get(1).map(String::as_str) == Some("access-list") => Some(1),
        _ => None,
    }
}

fn parse_header(
    tokens: &[String],
    keyword: usize,
    number: usize,
    raw: &str,
) -> Result<(AclType, String), ParseError> {
    let type_token = tokens
        .get(keyword + 1)
        .ok_or_else(|| ParseError::TruncatedHeader {
            number,
            raw: raw.to_string(),
        })?;
    let acl_type = match type_token.as_str() {
        "extended" => AclType::Extended,
        "standard" => AclType::Standard,
        other => {
            return Err(ParseError::UnknownAclType {
                number,
                found: other.to_string(),
            })
        }
    };
    let name = tokens
        .get(keyword + 2)
        .ok_or_else(|| ParseError::TruncatedHeader {
            number,
            raw: raw.to_string(),
        })?;
    Ok((acl_type, name.clone()))
}
