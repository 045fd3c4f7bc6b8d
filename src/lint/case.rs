//! Case-style heuristics for subject and single-token fields.
//!
//! The subject styles are heuristic by nature; the exact patterns chosen
//! here are documented in DESIGN.md. The common thread: a subject that
//! opens with a capital letter in one of these shapes is not imperative
//! lower-case prose and gets rejected.

use crate::policy::rules::{CaseConvention, CaseStyle};

/// Whether a token contains no upper-case letters.
pub fn is_lower_case(s: &str) -> bool {
    !s.chars().any(char::is_uppercase)
}

/// Whether a token contains at least one letter and no lower-case letters.
pub fn is_upper_case(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}

/// Whether a token follows the given single-token case convention.
pub fn matches_convention(s: &str, convention: CaseConvention) -> bool {
    match convention {
        CaseConvention::LowerCase => is_lower_case(s),
        CaseConvention::UpperCase => is_upper_case(s),
    }
}

/// Whether a subject matches the given case style.
pub fn matches_style(subject: &str, style: CaseStyle) -> bool {
    match style {
        CaseStyle::SentenceCase => is_sentence_case(subject),
        CaseStyle::StartCase => is_start_case(subject),
        CaseStyle::PascalCase => is_pascal_case(subject),
        CaseStyle::UpperCase => is_upper_case(subject),
    }
}

/// Returns the styles from `styles` that `subject` matches, in order.
pub fn matching_styles(subject: &str, styles: &[CaseStyle]) -> Vec<CaseStyle> {
    styles
        .iter()
        .copied()
        .filter(|style| matches_style(subject, *style))
        .collect()
}

/// Sentence case: the first word starts with an upper-case letter and the
/// remainder of that word is lower-case ("Fix the parser", "Fix Bug").
fn is_sentence_case(subject: &str) -> bool {
    let Some(first_word) = subject.split_whitespace().next() else {
        return false;
    };

    let mut chars = first_word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_uppercase() && !chars.any(char::is_uppercase)
}

/// Start case: every whitespace-separated word begins with an upper-case
/// letter ("Fix The Parser").
fn is_start_case(subject: &str) -> bool {
    let mut words = subject.split_whitespace().peekable();
    if words.peek().is_none() {
        return false;
    }

    words.all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

/// Pascal case: a single whitespace-free token made of two or more
/// capitalized segments ("FixBug").
fn is_pascal_case(subject: &str) -> bool {
    let token = subject.trim();
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return false;
    }

    let uppercase = token.chars().filter(|c| c.is_uppercase()).count();
    let has_lowercase = token.chars().any(char::is_lowercase);

    token.chars().next().is_some_and(char::is_uppercase) && uppercase >= 2 && has_lowercase
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_case_tokens() {
        assert!(is_lower_case("api"));
        assert!(is_lower_case("api-v2"));
        assert!(is_lower_case(""));
        assert!(!is_lower_case("API"));
        assert!(!is_lower_case("Api"));
    }

    #[test]
    fn upper_case_tokens() {
        assert!(is_upper_case("WIP"));
        assert!(is_upper_case("FIX THE PARSER"));
        assert!(!is_upper_case("Fix"));
        assert!(!is_upper_case("123"));
        assert!(!is_upper_case(""));
    }

    #[test]
    fn sentence_case_subjects() {
        assert!(is_sentence_case("Fix the parser"));
        assert!(is_sentence_case("Fix Bug"));
        assert!(is_sentence_case("Add API endpoint"));
        assert!(!is_sentence_case("fix the parser"));
        assert!(!is_sentence_case("FIx the parser"));
        assert!(!is_sentence_case("FixBug"));
        assert!(!is_sentence_case(""));
    }

    #[test]
    fn start_case_subjects() {
        assert!(is_start_case("Fix The Parser"));
        assert!(is_start_case("Fix Bug."));
        assert!(is_start_case("Fix"));
        assert!(!is_start_case("Fix the parser"));
        assert!(!is_start_case("fix Bug"));
        assert!(!is_start_case(""));
    }

    #[test]
    fn pascal_case_subjects() {
        assert!(is_pascal_case("FixBug"));
        assert!(is_pascal_case("AddEndpoint"));
        assert!(!is_pascal_case("Fixbug"));
        assert!(!is_pascal_case("Fix Bug"));
        assert!(!is_pascal_case("FIXBUG"));
        assert!(!is_pascal_case("fixBug"));
    }

    #[test]
    fn matching_styles_reports_all_matches() {
        let styles = [
            CaseStyle::SentenceCase,
            CaseStyle::StartCase,
            CaseStyle::PascalCase,
            CaseStyle::UpperCase,
        ];

        assert_eq!(
            matching_styles("Fix Bug.", &styles),
            vec![CaseStyle::SentenceCase, CaseStyle::StartCase]
        );
        assert_eq!(
            matching_styles("WIP", &styles),
            vec![CaseStyle::StartCase, CaseStyle::UpperCase]
        );
        assert_eq!(matching_styles("add endpoint", &styles), Vec::new());
    }

    #[test]
    fn imperative_lower_case_matches_nothing() {
        let styles = [
            CaseStyle::SentenceCase,
            CaseStyle::StartCase,
            CaseStyle::PascalCase,
            CaseStyle::UpperCase,
        ];
        for subject in ["add endpoint", "fix Bug", "handle SIGINT cleanly"] {
            assert!(
                matching_styles(subject, &styles).is_empty(),
                "{subject:?} should be accepted"
            );
        }
    }
}
