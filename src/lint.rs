//! Commit message validation.
//!
//! The linter is a pure function over a header string and the loaded policy:
//! parse the header, evaluate each configured rule independently, and return
//! an ordered list of violations. A message is accepted when no
//! error-severity rule is violated; warn-severity violations are reported
//! but never block.

pub mod case;
pub mod parser;
pub mod report;

pub use parser::{parse_header, ParseError, ParsedHeader};
pub use report::{LintReport, LintSummary, MessageLintResult, OutputFormat, Violation};

use crate::policy::rules::RuleId;
use crate::policy::PolicyConfig;

/// Evaluates commit messages against a policy.
#[derive(Debug, Clone)]
pub struct Linter {
    config: PolicyConfig,
}

impl Linter {
    /// Creates a linter over the given policy.
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// The policy this linter evaluates against.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Lints a full commit message (only the header line is validated).
    pub fn lint_message(&self, message: &str) -> MessageLintResult {
        self.lint_header(parser::message_header(message))
    }

    /// Lints a single commit header.
    pub fn lint_header(&self, header: &str) -> MessageLintResult {
        match parser::parse_header(header) {
            Ok(parsed) => {
                let violations = self.evaluate_rules(header, &parsed);
                MessageLintResult::new(None, header.to_string(), None, violations)
            }
            Err(err) => {
                MessageLintResult::new(None, header.to_string(), Some(err.to_string()), vec![])
            }
        }
    }

    /// Evaluates every configured rule against a parsed header, in the fixed
    /// rule-table order.
    fn evaluate_rules(&self, header: &str, parsed: &ParsedHeader) -> Vec<Violation> {
        let rules = &self.config.rules;
        let mut violations = Vec::new();

        // type-enum: only meaningful for a non-empty type (type-empty covers
        // the empty case)
        let rule = &rules.type_enum;
        if rule.is_enabled() && !parsed.commit_type.is_empty() {
            let allowed = rule
                .value
                .clone()
                .unwrap_or_else(|| self.config.type_values());
            let in_set = allowed.iter().any(|t| t == &parsed.commit_type);
            if rule.violates(in_set) {
                violations.push(Violation {
                    rule: RuleId::TypeEnum,
                    severity: rule.severity,
                    message: format!(
                        "type {:?} must be one of [{}]",
                        parsed.commit_type,
                        allowed.join(", ")
                    ),
                });
            }
        }

        // type-case
        let rule = &rules.type_case;
        if rule.is_enabled() && !parsed.commit_type.is_empty() {
            if let Some(convention) = rule.value {
                let conforms = case::matches_convention(&parsed.commit_type, convention);
                if rule.violates(conforms) {
                    violations.push(Violation {
                        rule: RuleId::TypeCase,
                        severity: rule.severity,
                        message: format!("type {:?} must be lower-case", parsed.commit_type),
                    });
                }
            }
        }

        // type-empty
        let rule = &rules.type_empty;
        if rule.is_enabled() {
            let empty = parsed.commit_type.is_empty();
            if rule.violates(empty) {
                violations.push(Violation {
                    rule: RuleId::TypeEmpty,
                    severity: rule.severity,
                    message: "type may not be empty".to_string(),
                });
            }
        }

        // scope-case: only when a scope is present
        let rule = &rules.scope_case;
        if rule.is_enabled() {
            if let (Some(scope), Some(convention)) = (&parsed.scope, rule.value) {
                if !scope.is_empty() {
                    let conforms = case::matches_convention(scope, convention);
                    if rule.violates(conforms) {
                        violations.push(Violation {
                            rule: RuleId::ScopeCase,
                            severity: rule.severity,
                            message: format!("scope {scope:?} must be lower-case"),
                        });
                    }
                }
            }
        }

        // subject-case: reject subjects matching any configured style
        let rule = &rules.subject_case;
        if rule.is_enabled() && !parsed.subject.is_empty() {
            if let Some(styles) = &rule.value {
                let matched = case::matching_styles(&parsed.subject, styles);
                if rule.violates(!matched.is_empty()) {
                    let names: Vec<String> =
                        matched.iter().map(ToString::to_string).collect();
                    violations.push(Violation {
                        rule: RuleId::SubjectCase,
                        severity: rule.severity,
                        message: format!("subject must not be {}", names.join(", ")),
                    });
                }
            }
        }

        // subject-empty
        let rule = &rules.subject_empty;
        if rule.is_enabled() {
            let empty = parsed.subject.trim().is_empty();
            if rule.violates(empty) {
                violations.push(Violation {
                    rule: RuleId::SubjectEmpty,
                    severity: rule.severity,
                    message: "subject may not be empty".to_string(),
                });
            }
        }

        // subject-full-stop
        let rule = &rules.subject_full_stop;
        if rule.is_enabled() && !parsed.subject.is_empty() {
            let stop = rule.value.as_deref().unwrap_or(".");
            let ends_with_stop = parsed.subject.ends_with(stop);
            if rule.violates(ends_with_stop) {
                violations.push(Violation {
                    rule: RuleId::SubjectFullStop,
                    severity: rule.severity,
                    message: format!("subject may not end with {stop:?}"),
                });
            }
        }

        // header-max-length
        let rule = &rules.header_max_length;
        if rule.is_enabled() {
            let limit = rules.header_limit();
            let length = header.chars().count();
            if rule.violates(length <= limit) {
                violations.push(Violation {
                    rule: RuleId::HeaderMaxLength,
                    severity: rule.severity,
                    message: format!(
                        "header must not be longer than {limit} characters, current length is {length}"
                    ),
                });
            }
        }

        violations
    }
}
