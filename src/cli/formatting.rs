//! Shared display formatting for lint output.

use crate::lint::{MessageLintResult, Violation};
use crate::policy::rules::Severity;

/// Returns an ANSI-colored severity label with fixed-width padding.
pub(crate) fn format_severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31mERROR\x1b[0m  ",
        Severity::Warn => "\x1b[33mWARNING\x1b[0m",
        Severity::Off => "OFF    ",
    }
}

/// Returns an emoji icon representing a message lint result.
///
/// - Passing messages get a checkmark.
/// - Messages with errors or a parse failure get a cross.
/// - Messages with only warnings get a warning sign.
pub(crate) fn determine_result_icon(result: &MessageLintResult) -> &'static str {
    if result.passes {
        "\u{2705}"
    } else if result.has_errors() {
        "\u{274c}"
    } else {
        "\u{26a0}\u{fe0f} "
    }
}

/// Formats a single violation line for text output.
pub(crate) fn format_violation_line(violation: &Violation) -> String {
    format!(
        "   {} [{}] {}",
        format_severity_label(violation.severity),
        violation.rule,
        violation.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::MessageLintResult;
    use crate::policy::rules::RuleId;

    fn violation(severity: Severity) -> Violation {
        Violation {
            rule: RuleId::TypeEnum,
            severity,
            message: "type \"foo\" must be one of [feat, fix]".to_string(),
        }
    }

    #[test]
    fn severity_labels_are_padded() {
        // Same display width with the ANSI codes stripped
        let error = format_severity_label(Severity::Error).replace("\x1b[31m", "").replace("\x1b[0m", "");
        let warn = format_severity_label(Severity::Warn).replace("\x1b[33m", "").replace("\x1b[0m", "");
        assert_eq!(error.len(), warn.len());
    }

    #[test]
    fn icon_for_passing_result() {
        let result = MessageLintResult::new(None, "feat: x".to_string(), None, vec![]);
        assert_eq!(determine_result_icon(&result), "\u{2705}");
    }

    #[test]
    fn icon_for_error_result() {
        let result = MessageLintResult::new(
            None,
            "foo: x".to_string(),
            None,
            vec![violation(Severity::Error)],
        );
        assert_eq!(determine_result_icon(&result), "\u{274c}");
    }

    #[test]
    fn icon_for_warning_result() {
        let result = MessageLintResult::new(
            None,
            "feat: x".to_string(),
            None,
            vec![violation(Severity::Warn)],
        );
        assert_eq!(determine_result_icon(&result), "\u{26a0}\u{fe0f} ");
    }

    #[test]
    fn violation_line_contains_rule_id() {
        let line = format_violation_line(&violation(Severity::Error));
        assert!(line.contains("[type-enum]"));
        assert!(line.contains("must be one of"));
    }
}
