//! Core policy configuration types.
//!
//! All of these are immutable once loaded: the configuration is read at
//! startup and shared by reference for the lifetime of the process.

use globset::{Glob, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::rules::RuleSet;

/// A commit type the policy accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeEntry {
    /// Machine tag used in the commit header, e.g. `feat`.
    pub value: String,
    /// Human-readable text shown next to the tag during interactive authoring.
    pub label: String,
}

impl CommitTypeEntry {
    /// Creates a new type entry.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A suggested commit scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeEntry {
    /// Name of the scope.
    pub name: String,
    /// Human-readable description of the scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// File globs (relative to the repository root) that map to this scope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_patterns: Vec<String>,
}

/// Display text for each interactive prompt stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptMessages {
    /// Prompt for the commit type selection.
    pub r#type: String,
    /// Prompt for the scope selection.
    pub scope: String,
    /// Prompt for entering a custom scope.
    pub custom_scope: String,
    /// Prompt for the subject line.
    pub subject: String,
    /// Prompt for the long body.
    pub body: String,
    /// Prompt for breaking change notes.
    pub breaking: String,
    /// Prompt for the footer (issue references).
    pub footer: String,
    /// Final confirmation prompt.
    pub confirm_commit: String,
}

impl Default for PromptMessages {
    fn default() -> Self {
        Self {
            r#type: "Select the type of change that you're committing:".to_string(),
            scope: "Denote the SCOPE of this change (optional):".to_string(),
            custom_scope: "Denote the SCOPE of this change:".to_string(),
            subject: "Write a SHORT, IMPERATIVE tense description of the change:".to_string(),
            body: "Provide a LONGER description of the change (optional):".to_string(),
            breaking: "List any BREAKING CHANGES (optional):".to_string(),
            footer: "List any ISSUES CLOSED by this change (optional), e.g. #31, #34:"
                .to_string(),
            confirm_commit: "Are you sure you want to proceed with the commit above?".to_string(),
        }
    }
}

/// Errors raised by policy validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The policy declares no commit types at all.
    #[error("policy declares no commit types")]
    NoCommitTypes,

    /// The breakline character must be a single character.
    #[error("breaklineChar must be a single character, got {0:?}")]
    InvalidBreaklineChar(String),

    /// A skip-question id does not name a prompt stage.
    #[error("skipQuestions contains unknown stage id {0:?}")]
    UnknownStageId(String),
}

/// The complete, immutable commit policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Allowed commit types, in display order.
    pub types: Vec<CommitTypeEntry>,
    /// Suggested commit scopes, in display order.
    pub scopes: Vec<ScopeEntry>,
    /// Prompt texts for the interactive wizard.
    pub messages: PromptMessages,
    /// Whether the wizard offers a free-form custom scope.
    pub allow_custom_scopes: bool,
    /// Commit types for which the breaking-change question is asked.
    pub allow_breaking_changes: Vec<String>,
    /// Prompt-stage ids the wizard skips entirely.
    pub skip_questions: Vec<String>,
    /// Asks the breaking-change question before the subject question.
    pub ask_for_breaking_change_first: bool,
    /// Maximum subject length accepted by the wizard.
    pub subject_limit: usize,
    /// Character that marks a line break in multi-line prompt answers.
    pub breakline_char: String,
    /// The validation rule table.
    pub rules: RuleSet,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            types: default_commit_types(),
            scopes: Vec::new(),
            messages: PromptMessages::default(),
            allow_custom_scopes: true,
            allow_breaking_changes: vec!["feat".to_string(), "fix".to_string()],
            skip_questions: Vec::new(),
            ask_for_breaking_change_first: false,
            subject_limit: 72,
            breakline_char: "|".to_string(),
            rules: RuleSet::default(),
        }
    }
}

impl PolicyConfig {
    /// Returns the machine tags of all allowed commit types.
    pub fn type_values(&self) -> Vec<String> {
        self.types.iter().map(|t| t.value.clone()).collect()
    }

    /// Checks the policy for internal consistency.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.types.is_empty() {
            return Err(PolicyError::NoCommitTypes);
        }

        if self.breakline_char.chars().count() != 1 {
            return Err(PolicyError::InvalidBreaklineChar(
                self.breakline_char.clone(),
            ));
        }

        const STAGE_IDS: &[&str] = &[
            "type",
            "scope",
            "customScope",
            "subject",
            "body",
            "breaking",
            "footer",
            "confirmCommit",
        ];
        for id in &self.skip_questions {
            if !STAGE_IDS.contains(&id.as_str()) {
                return Err(PolicyError::UnknownStageId(id.clone()));
            }
        }

        Ok(())
    }
}

/// The built-in commit type table.
fn default_commit_types() -> Vec<CommitTypeEntry> {
    vec![
        CommitTypeEntry::new("feat", "A new feature"),
        CommitTypeEntry::new("fix", "A bug fix"),
        CommitTypeEntry::new("docs", "Documentation only changes"),
        CommitTypeEntry::new("style", "Code formatting changes"),
        CommitTypeEntry::new("refactor", "A change that neither fixes a bug nor adds a feature"),
        CommitTypeEntry::new("perf", "A change that improves performance"),
        CommitTypeEntry::new("test", "Adding or correcting tests"),
        CommitTypeEntry::new("chore", "Changes to the build process or auxiliary tooling"),
        CommitTypeEntry::new("revert", "Reverts a previous commit"),
        CommitTypeEntry::new("build", "Changes to the build system or external dependencies"),
        CommitTypeEntry::new("ci", "Changes to CI configuration files and scripts"),
    ]
}

/// Suggests a scope for a set of changed files using the scopes' file patterns.
///
/// The scope whose patterns match the most files wins; ties go to the scope
/// declared first. Returns `None` when no pattern matches or no scope declares
/// patterns.
pub fn suggest_scope(scopes: &[ScopeEntry], files: &[String]) -> Option<String> {
    let mut best: Option<(&ScopeEntry, usize)> = None;

    for scope in scopes {
        if scope.file_patterns.is_empty() {
            continue;
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &scope.file_patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => {
                    tracing::debug!("ignoring invalid glob {pattern:?} for scope {}: {err}", scope.name);
                }
            }
        }
        let Ok(set) = builder.build() else { continue };

        let matches = files.iter().filter(|f| set.is_match(f.as_str())).count();
        if matches > 0 && best.map_or(true, |(_, n)| matches > n) {
            best = Some((scope, matches));
        }
    }

    best.map(|(scope, _)| scope.name.clone())
}
