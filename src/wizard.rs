//! Interactive commit-authoring wizard.
//!
//! The wizard is a linear state machine over prompt stages: each stage asks
//! one question, answers accumulate, and the terminal stage confirms the
//! assembled message. There are no backward transitions; aborting discards
//! everything.

pub mod error;
pub mod flow;
pub mod prompt;

pub use error::WizardError;
pub use flow::{assemble_message, WizardAnswers, WizardFlow, WizardOutcome};
pub use prompt::{PromptBackend, TerminalPrompt};

/// A prompt stage of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Commit type selection.
    Type,
    /// Scope selection from the configured list.
    Scope,
    /// Free-form scope entry, offered when "custom" was selected.
    CustomScope,
    /// Subject line entry.
    Subject,
    /// Long body entry.
    Body,
    /// Breaking-change notes.
    Breaking,
    /// Footer (issue references).
    Footer,
    /// Final confirmation; terminal stage.
    ConfirmCommit,
}

impl Stage {
    /// The stage id as used in `skipQuestions`.
    pub fn id(self) -> &'static str {
        match self {
            Stage::Type => "type",
            Stage::Scope => "scope",
            Stage::CustomScope => "customScope",
            Stage::Subject => "subject",
            Stage::Body => "body",
            Stage::Breaking => "breaking",
            Stage::Footer => "footer",
            Stage::ConfirmCommit => "confirmCommit",
        }
    }
}

/// The forward-only stage order. With `ask_breaking_first` the breaking
/// question moves ahead of the subject question.
pub fn stage_order(ask_breaking_first: bool) -> [Stage; 8] {
    if ask_breaking_first {
        [
            Stage::Type,
            Stage::Scope,
            Stage::CustomScope,
            Stage::Breaking,
            Stage::Subject,
            Stage::Body,
            Stage::Footer,
            Stage::ConfirmCommit,
        ]
    } else {
        [
            Stage::Type,
            Stage::Scope,
            Stage::CustomScope,
            Stage::Subject,
            Stage::Body,
            Stage::Breaking,
            Stage::Footer,
            Stage::ConfirmCommit,
        ]
    }
}
