//! Wizard-specific error handling.

use thiserror::Error;

/// Errors raised while driving the interactive wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The subject exceeds the configured limit. The interactive flow
    /// recovers locally by re-prompting the same stage.
    #[error("subject is {length} characters, the limit is {limit}")]
    SubjectTooLong {
        /// Length of the rejected subject.
        length: usize,
        /// The configured subject limit.
        limit: usize,
    },

    /// The user declined the final confirmation or interrupted a prompt.
    /// All accumulated answers are discarded.
    #[error("commit aborted")]
    Aborted,

    /// A terminal prompt failed.
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
