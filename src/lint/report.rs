//! Lint report types for commit message validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::policy::rules::{RuleId, Severity};

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule that was violated.
    pub rule: RuleId,
    /// Severity at which the rule is configured.
    pub severity: Severity,
    /// Explanation of the violation.
    pub message: String,
}

/// Result of linting a single commit message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLintResult {
    /// Commit hash (short form) when linting a git range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// The header that was linted.
    pub header: String,
    /// Grammar error, when the header has no conventional-commit shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    /// Rule violations, in rule-table order.
    pub violations: Vec<Violation>,
    /// Whether the message passes (no parse error, no error-severity violation).
    pub passes: bool,
}

impl MessageLintResult {
    /// Builds a result, deriving `passes` from the violations.
    pub fn new(
        hash: Option<String>,
        header: String,
        parse_error: Option<String>,
        violations: Vec<Violation>,
    ) -> Self {
        let passes = parse_error.is_none()
            && !violations.iter().any(|v| v.severity == Severity::Error);
        Self {
            hash,
            header,
            parse_error,
            violations,
            passes,
        }
    }

    /// Whether any violation is error severity.
    pub fn has_errors(&self) -> bool {
        self.parse_error.is_some()
            || self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    /// Whether any violation is warn severity.
    pub fn has_warnings(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Warn)
    }
}

/// Summary statistics for a lint report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintSummary {
    /// Total number of messages linted.
    pub total: usize,
    /// Number of messages that pass.
    pub passing: usize,
    /// Number of messages with blocking problems.
    pub failing: usize,
    /// Total error-severity violations (parse errors included).
    pub error_count: usize,
    /// Total warn-severity violations.
    pub warning_count: usize,
}

impl LintSummary {
    /// Creates a summary from a list of lint results.
    pub fn from_results(results: &[MessageLintResult]) -> Self {
        let total = results.len();
        let passing = results.iter().filter(|r| r.passes).count();
        let failing = total - passing;

        let mut error_count = 0;
        let mut warning_count = 0;

        for result in results {
            if result.parse_error.is_some() {
                error_count += 1;
            }
            for violation in &result.violations {
                match violation.severity {
                    Severity::Error => error_count += 1,
                    Severity::Warn => warning_count += 1,
                    Severity::Off => {}
                }
            }
        }

        Self {
            total,
            passing,
            failing,
            error_count,
            warning_count,
        }
    }
}

/// Complete lint report over one or more commit messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    /// Individual message results.
    pub results: Vec<MessageLintResult>,
    /// Summary statistics.
    pub summary: LintSummary,
}

impl LintReport {
    /// Creates a new report from message results.
    pub fn new(results: Vec<MessageLintResult>) -> Self {
        let summary = LintSummary::from_results(&results);
        Self { results, summary }
    }

    /// Checks if the report has any errors.
    pub fn has_errors(&self) -> bool {
        self.summary.error_count > 0
    }

    /// Checks if the report has any warnings.
    pub fn has_warnings(&self) -> bool {
        self.summary.warning_count > 0
    }

    /// Determines the process exit code for this report.
    ///
    /// Errors exit 1; with `strict`, warnings alone exit 2.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.has_errors() {
            1
        } else if strict && self.has_warnings() {
            2
        } else {
            0
        }
    }
}

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}
