//! The wizard stage machine.

use crate::policy::PolicyConfig;
use crate::wizard::error::WizardError;
use crate::wizard::prompt::PromptBackend;
use crate::wizard::{stage_order, Stage};

/// Accumulated answers for one wizard run.
#[derive(Debug, Clone, Default)]
pub struct WizardAnswers {
    /// The chosen commit type tag.
    pub commit_type: String,
    /// The chosen scope, if any.
    pub scope: Option<String>,
    /// The subject line.
    pub subject: String,
    /// Long body, if given.
    pub body: Option<String>,
    /// Breaking-change notes, if given.
    pub breaking: Option<String>,
    /// Footer (issue references), if given.
    pub footer: Option<String>,
    /// Set when the user picked "custom" at the scope stage.
    wants_custom_scope: bool,
}

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The user confirmed; here is the assembled commit message.
    Message(String),
    /// The user declined the confirmation; all answers are discarded.
    Aborted,
}

/// Drives the prompt stages against a backend.
pub struct WizardFlow<'a, B> {
    config: &'a PolicyConfig,
    backend: B,
    scope_hint: Option<String>,
}

impl<'a, B: PromptBackend> WizardFlow<'a, B> {
    /// Creates a flow over the given policy and prompt backend.
    pub fn new(config: &'a PolicyConfig, backend: B) -> Self {
        Self {
            config,
            backend,
            scope_hint: None,
        }
    }

    /// Pre-selects a scope in the scope list (e.g. derived from staged files).
    pub fn with_scope_hint(mut self, hint: Option<String>) -> Self {
        self.scope_hint = hint;
        self
    }

    /// Runs all stages in order and returns the outcome.
    pub fn run(&mut self) -> Result<WizardOutcome, WizardError> {
        let mut answers = WizardAnswers::default();

        for stage in stage_order(self.config.ask_for_breaking_change_first) {
            if self.is_skipped(stage, &answers) {
                continue;
            }

            match stage {
                Stage::Type => self.ask_type(&mut answers)?,
                Stage::Scope => self.ask_scope(&mut answers)?,
                Stage::CustomScope => self.ask_custom_scope(&mut answers)?,
                Stage::Subject => self.ask_subject(&mut answers)?,
                Stage::Body => {
                    answers.body = self.ask_optional(&self.config.messages.body.clone())?;
                }
                Stage::Breaking => {
                    answers.breaking =
                        self.ask_optional(&self.config.messages.breaking.clone())?;
                }
                Stage::Footer => {
                    answers.footer = self.ask_optional(&self.config.messages.footer.clone())?;
                }
                Stage::ConfirmCommit => {
                    let message = assemble_message(&answers, &self.config.breakline_char);
                    self.backend.notify(&format!("\n{message}\n"));
                    let confirmed = self
                        .backend
                        .confirm(&self.config.messages.confirm_commit, true)?;
                    return Ok(if confirmed {
                        WizardOutcome::Message(message)
                    } else {
                        WizardOutcome::Aborted
                    });
                }
            }
        }

        // Only reachable when confirmCommit itself is skipped
        Ok(WizardOutcome::Message(assemble_message(
            &answers,
            &self.config.breakline_char,
        )))
    }

    /// Whether a stage is skipped by configuration or by earlier answers.
    fn is_skipped(&self, stage: Stage, answers: &WizardAnswers) -> bool {
        if self.config.skip_questions.iter().any(|id| id == stage.id()) {
            return true;
        }

        match stage {
            // Only offered after picking "custom" at the scope stage
            Stage::CustomScope => !answers.wants_custom_scope,
            // Only offered for types that permit breaking changes
            Stage::Breaking => !self
                .config
                .allow_breaking_changes
                .contains(&answers.commit_type),
            // Nothing to select from
            Stage::Scope => self.config.scopes.is_empty() && !self.config.allow_custom_scopes,
            _ => false,
        }
    }

    fn ask_type(&mut self, answers: &mut WizardAnswers) -> Result<(), WizardError> {
        let items: Vec<String> = self
            .config
            .types
            .iter()
            .map(|t| format!("{}: {}", t.value, t.label))
            .collect();
        let index = self
            .backend
            .select(&self.config.messages.r#type.clone(), &items, 0)?;
        answers.commit_type = self.config.types[index].value.clone();
        Ok(())
    }

    fn ask_scope(&mut self, answers: &mut WizardAnswers) -> Result<(), WizardError> {
        let scope_count = self.config.scopes.len();
        let mut items: Vec<String> = self
            .config
            .scopes
            .iter()
            .map(|s| match &s.description {
                Some(description) => format!("{}: {}", s.name, description),
                None => s.name.clone(),
            })
            .collect();
        if self.config.allow_custom_scopes {
            items.push("custom".to_string());
        }
        items.push("(none)".to_string());

        let default = self
            .scope_hint
            .as_ref()
            .and_then(|hint| self.config.scopes.iter().position(|s| &s.name == hint))
            .unwrap_or(0);

        let index = self
            .backend
            .select(&self.config.messages.scope.clone(), &items, default)?;

        if index < scope_count {
            answers.scope = Some(self.config.scopes[index].name.clone());
        } else if self.config.allow_custom_scopes && index == scope_count {
            answers.wants_custom_scope = true;
        } else {
            answers.scope = None;
        }
        Ok(())
    }

    fn ask_custom_scope(&mut self, answers: &mut WizardAnswers) -> Result<(), WizardError> {
        let input = self
            .backend
            .input(&self.config.messages.custom_scope.clone(), true)?;
        let trimmed = input.trim();
        answers.scope = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(())
    }

    /// Asks for the subject, re-prompting the same stage while the input
    /// exceeds the configured limit.
    fn ask_subject(&mut self, answers: &mut WizardAnswers) -> Result<(), WizardError> {
        loop {
            let input = self
                .backend
                .input(&self.config.messages.subject.clone(), false)?;
            let subject = input.trim().to_string();
            match validate_subject(&subject, self.config.subject_limit) {
                Ok(()) => {
                    answers.subject = subject;
                    return Ok(());
                }
                Err(err) => self.backend.notify(&format!("✖ {err}")),
            }
        }
    }

    /// Asks an optional multi-line question; empty input means "no section".
    fn ask_optional(&mut self, prompt: &str) -> Result<Option<String>, WizardError> {
        let input = self.backend.input(prompt, true)?;
        let trimmed = input.trim();
        Ok(if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        })
    }
}

/// Rejects subjects longer than the configured limit.
pub fn validate_subject(subject: &str, limit: usize) -> Result<(), WizardError> {
    let length = subject.chars().count();
    if length > limit {
        return Err(WizardError::SubjectTooLong { length, limit });
    }
    Ok(())
}

/// Assembles the final commit message from the collected answers.
///
/// Sections are joined with blank lines; empty sections are omitted.
/// Multi-line answers use the breakline character to mark line breaks.
pub fn assemble_message(answers: &WizardAnswers, breakline_char: &str) -> String {
    let mut header = answers.commit_type.clone();
    if let Some(scope) = answers.scope.as_deref().filter(|s| !s.is_empty()) {
        header.push('(');
        header.push_str(scope);
        header.push(')');
    }
    header.push_str(": ");
    header.push_str(&answers.subject);

    let mut sections = vec![header];
    if let Some(body) = &answers.body {
        sections.push(split_breakline(body, breakline_char));
    }
    if let Some(breaking) = &answers.breaking {
        sections.push(format!(
            "BREAKING CHANGE: {}",
            split_breakline(breaking, breakline_char)
        ));
    }
    if let Some(footer) = &answers.footer {
        sections.push(split_breakline(footer, breakline_char));
    }

    sections.join("\n\n")
}

/// Replaces the breakline character with real line breaks.
fn split_breakline(text: &str, breakline_char: &str) -> String {
    if breakline_char.is_empty() {
        return text.to_string();
    }
    text.split(breakline_char).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PolicyConfig, ScopeEntry};
    use std::collections::VecDeque;

    /// Deterministic backend fed from canned answers.
    #[derive(Default)]
    struct Scripted {
        selects: VecDeque<usize>,
        inputs: VecDeque<String>,
        confirms: VecDeque<bool>,
        notices: Vec<String>,
    }

    impl Scripted {
        fn new(selects: &[usize], inputs: &[&str], confirms: &[bool]) -> Self {
            Self {
                selects: selects.iter().copied().collect(),
                inputs: inputs.iter().map(ToString::to_string).collect(),
                confirms: confirms.iter().copied().collect(),
                notices: Vec::new(),
            }
        }
    }

    impl PromptBackend for Scripted {
        fn select(
            &mut self,
            _prompt: &str,
            items: &[String],
            default: usize,
        ) -> Result<usize, WizardError> {
            assert!(default < items.len(), "default must be selectable");
            Ok(self.selects.pop_front().expect("unexpected select prompt"))
        }

        fn input(&mut self, _prompt: &str, _allow_empty: bool) -> Result<String, WizardError> {
            Ok(self.inputs.pop_front().expect("unexpected input prompt"))
        }

        fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<bool, WizardError> {
            Ok(self.confirms.pop_front().expect("unexpected confirm prompt"))
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn config_with_scopes() -> PolicyConfig {
        PolicyConfig {
            scopes: vec![
                ScopeEntry {
                    name: "api".to_string(),
                    description: None,
                    file_patterns: vec![],
                },
                ScopeEntry {
                    name: "ui".to_string(),
                    description: None,
                    file_patterns: vec![],
                },
            ],
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn minimal_run_assembles_header_only() {
        let config = config_with_scopes();
        // type=feat, scope=api; subject; empty body/breaking/footer; confirm
        let backend = Scripted::new(&[0, 0], &["add endpoint", "", "", ""], &[true]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(
            outcome,
            WizardOutcome::Message("feat(api): add endpoint".to_string())
        );
    }

    #[test]
    fn skipping_scope_omits_scope_segment() {
        let config = PolicyConfig {
            skip_questions: vec!["scope".to_string()],
            ..config_with_scopes()
        };
        let backend = Scripted::new(&[0], &["add endpoint", "", "", ""], &[true]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(
            outcome,
            WizardOutcome::Message("feat: add endpoint".to_string())
        );
    }

    #[test]
    fn custom_scope_path() {
        let config = config_with_scopes();
        // scope index 2 = "custom" (after the two configured scopes)
        let backend = Scripted::new(&[0, 2], &["parser", "add thing", "", "", ""], &[true]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(
            outcome,
            WizardOutcome::Message("feat(parser): add thing".to_string())
        );
    }

    #[test]
    fn none_scope_option_gives_no_scope() {
        let config = config_with_scopes();
        // scope index 3 = "(none)"
        let backend = Scripted::new(&[0, 3], &["add thing", "", "", ""], &[true]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(outcome, WizardOutcome::Message("feat: add thing".to_string()));
    }

    #[test]
    fn breaking_stage_gated_by_type() {
        let config = config_with_scopes();
        // docs (index 2) is not in allow_breaking_changes, so no breaking input
        let backend = Scripted::new(&[2, 3], &["describe the api", "", ""], &[true]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(
            outcome,
            WizardOutcome::Message("docs: describe the api".to_string())
        );
    }

    #[test]
    fn breaking_section_gets_prefix() {
        let config = config_with_scopes();
        let backend = Scripted::new(
            &[0, 3],
            &["drop old flag", "", "the --legacy flag is gone", ""],
            &[true],
        );
        let mut flow = WizardFlow::new(&config, backend);
        let WizardOutcome::Message(message) = flow.run().unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(
            message,
            "feat: drop old flag\n\nBREAKING CHANGE: the --legacy flag is gone"
        );
    }

    #[test]
    fn body_breakline_becomes_real_line_breaks() {
        let config = config_with_scopes();
        let backend = Scripted::new(
            &[0, 3],
            &["add thing", "first line|second line", "", ""],
            &[true],
        );
        let mut flow = WizardFlow::new(&config, backend);
        let WizardOutcome::Message(message) = flow.run().unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(message, "feat: add thing\n\nfirst line\nsecond line");
    }

    #[test]
    fn overlong_subject_reprompts_same_stage() {
        let config = PolicyConfig {
            subject_limit: 10,
            ..config_with_scopes()
        };
        let backend = Scripted::new(
            &[0, 3],
            &["this subject is much too long", "short one", "", "", ""],
            &[true],
        );
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(outcome, WizardOutcome::Message("feat: short one".to_string()));
        assert!(
            flow.backend.notices.iter().any(|n| n.contains("limit is 10")),
            "the rejection should be reported: {:?}",
            flow.backend.notices
        );
    }

    #[test]
    fn declined_confirmation_aborts() {
        let config = config_with_scopes();
        let backend = Scripted::new(&[0, 3], &["add thing", "", "", ""], &[false]);
        let mut flow = WizardFlow::new(&config, backend);
        assert_eq!(flow.run().unwrap(), WizardOutcome::Aborted);
    }

    #[test]
    fn breaking_first_reorders_questions() {
        let config = PolicyConfig {
            ask_for_breaking_change_first: true,
            ..config_with_scopes()
        };
        // Inputs arrive in stage order: breaking, subject, body, footer
        let backend = Scripted::new(
            &[0, 3],
            &["drops the v1 api", "add v2 api", "", ""],
            &[true],
        );
        let mut flow = WizardFlow::new(&config, backend);
        let WizardOutcome::Message(message) = flow.run().unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(
            message,
            "feat: add v2 api\n\nBREAKING CHANGE: drops the v1 api"
        );
    }

    #[test]
    fn scope_stage_skipped_when_nothing_to_select() {
        let config = PolicyConfig {
            scopes: vec![],
            allow_custom_scopes: false,
            ..PolicyConfig::default()
        };
        // No scope select at all: only the type select remains
        let backend = Scripted::new(&[0], &["add thing", "", "", ""], &[true]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(outcome, WizardOutcome::Message("feat: add thing".to_string()));
    }

    #[test]
    fn scope_hint_sets_default_selection() {
        let config = config_with_scopes();
        let backend = Scripted::new(&[0, 1], &["tweak layout", "", "", ""], &[true]);
        let mut flow =
            WizardFlow::new(&config, backend).with_scope_hint(Some("ui".to_string()));
        let outcome = flow.run().unwrap();
        assert_eq!(
            outcome,
            WizardOutcome::Message("feat(ui): tweak layout".to_string())
        );
    }

    #[test]
    fn skipping_confirm_returns_message_directly() {
        let config = PolicyConfig {
            skip_questions: vec!["confirmCommit".to_string(), "scope".to_string()],
            ..config_with_scopes()
        };
        let backend = Scripted::new(&[0], &["add thing", "", "", ""], &[]);
        let mut flow = WizardFlow::new(&config, backend);
        let outcome = flow.run().unwrap();
        assert_eq!(outcome, WizardOutcome::Message("feat: add thing".to_string()));
    }

    #[test]
    fn validate_subject_boundary() {
        assert!(validate_subject(&"a".repeat(72), 72).is_ok());
        let err = validate_subject(&"a".repeat(73), 72).unwrap_err();
        assert!(matches!(
            err,
            WizardError::SubjectTooLong {
                length: 73,
                limit: 72
            }
        ));
    }

    #[test]
    fn assemble_full_message_order() {
        let answers = WizardAnswers {
            commit_type: "fix".to_string(),
            scope: Some("api".to_string()),
            subject: "handle timeouts".to_string(),
            body: Some("retry twice|then give up".to_string()),
            breaking: Some("timeout unit is now seconds".to_string()),
            footer: Some("#12".to_string()),
            wants_custom_scope: false,
        };
        assert_eq!(
            assemble_message(&answers, "|"),
            "fix(api): handle timeouts\n\n\
             retry twice\nthen give up\n\n\
             BREAKING CHANGE: timeout unit is now seconds\n\n\
             #12"
        );
    }
}
