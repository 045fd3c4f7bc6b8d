//! Conventional-commit header grammar.
//!
//! Parsing is deliberately lenient about field contents so that individual
//! rules can report precisely: an empty type or subject, a wrongly-cased
//! scope and an unknown type all parse fine and fail their rules instead.
//! Only a header with no `type: subject` shape at all is a parse error.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Header grammar: `type(scope)!: subject` with scope and `!` optional.
/// The colon must be followed by a space or end the header.
#[allow(clippy::expect_used)]
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[A-Za-z]*)(?:\((?P<scope>[^()]*)\))?(?P<breaking>!)?:(?: (?P<subject>.*))?$")
        .expect("header pattern is valid")
});

/// Errors raised when a header has no conventional-commit shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The header is empty or whitespace only.
    #[error("commit header is empty")]
    EmptyHeader,

    /// The header does not match `type(scope): subject`.
    #[error("header {0:?} does not match the conventional commit format 'type(scope): subject'")]
    MalformedHeader(String),
}

/// A dissected commit header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// The commit type tag (may be empty; `type-empty` decides).
    pub commit_type: String,
    /// The scope, when a `(scope)` segment is present.
    pub scope: Option<String>,
    /// Whether the `!` breaking-change marker is present.
    pub breaking: bool,
    /// The subject text after the colon (may be empty; `subject-empty` decides).
    pub subject: String,
}

/// Parses the first line of a commit message into its parts.
pub fn parse_header(header: &str) -> Result<ParsedHeader, ParseError> {
    if header.trim().is_empty() {
        return Err(ParseError::EmptyHeader);
    }

    let captures = HEADER_RE
        .captures(header)
        .ok_or_else(|| ParseError::MalformedHeader(header.to_string()))?;

    Ok(ParsedHeader {
        commit_type: captures["type"].to_string(),
        scope: captures.name("scope").map(|m| m.as_str().to_string()),
        breaking: captures.name("breaking").is_some(),
        subject: captures
            .name("subject")
            .map_or_else(String::new, |m| m.as_str().to_string()),
    })
}

/// Returns the header (first line) of a full commit message.
pub fn message_header(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_header() {
        let parsed = parse_header("feat: add endpoint").unwrap();
        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.scope, None);
        assert!(!parsed.breaking);
        assert_eq!(parsed.subject, "add endpoint");
    }

    #[test]
    fn parse_header_with_scope() {
        let parsed = parse_header("fix(api): resolve timeout").unwrap();
        assert_eq!(parsed.commit_type, "fix");
        assert_eq!(parsed.scope, Some("api".to_string()));
        assert_eq!(parsed.subject, "resolve timeout");
    }

    #[test]
    fn parse_header_with_breaking_marker() {
        let parsed = parse_header("feat(core)!: drop legacy flag").unwrap();
        assert!(parsed.breaking);
        assert_eq!(parsed.scope, Some("core".to_string()));
    }

    #[test]
    fn parse_keeps_upper_case_fields() {
        // Case problems are rule violations, not parse errors
        let parsed = parse_header("Feat(API): Do Thing").unwrap();
        assert_eq!(parsed.commit_type, "Feat");
        assert_eq!(parsed.scope, Some("API".to_string()));
        assert_eq!(parsed.subject, "Do Thing");
    }

    #[test]
    fn parse_keeps_empty_subject() {
        let parsed = parse_header("feat: ").unwrap();
        assert_eq!(parsed.subject, "");
        let parsed = parse_header("feat:").unwrap();
        assert_eq!(parsed.subject, "");
    }

    #[test]
    fn parse_rejects_colon_without_space() {
        assert!(matches!(
            parse_header("feat:add endpoint"),
            Err(ParseError::MalformedHeader(_))
        ));
    }

    #[test]
    fn parse_keeps_empty_type() {
        let parsed = parse_header("(api): something").unwrap();
        assert_eq!(parsed.commit_type, "");
        assert_eq!(parsed.scope, Some("api".to_string()));
    }

    #[test]
    fn parse_rejects_empty_header() {
        assert_eq!(parse_header(""), Err(ParseError::EmptyHeader));
        assert_eq!(parse_header("   "), Err(ParseError::EmptyHeader));
    }

    #[test]
    fn parse_rejects_missing_colon() {
        assert!(matches!(
            parse_header("add endpoint without prefix"),
            Err(ParseError::MalformedHeader(_))
        ));
    }

    #[test]
    fn parse_rejects_nested_parens() {
        assert!(matches!(
            parse_header("feat((api)): nested"),
            Err(ParseError::MalformedHeader(_))
        ));
    }

    #[test]
    fn message_header_takes_first_line() {
        assert_eq!(message_header("feat: x\n\nbody"), "feat: x");
        assert_eq!(message_header(""), "");
    }
}
