//! Prompt backends for the wizard.
//!
//! The flow itself only talks to [`PromptBackend`], which keeps the stage
//! machine testable without a terminal. The real backend renders with
//! dialoguer.

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::wizard::error::WizardError;

/// A source of answers for the wizard's questions.
pub trait PromptBackend {
    /// Asks the user to pick one of `items`; returns the chosen index.
    fn select(&mut self, prompt: &str, items: &[String], default: usize)
        -> Result<usize, WizardError>;

    /// Asks for a line of text. Empty input is only accepted when
    /// `allow_empty` is set.
    fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String, WizardError>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, WizardError>;

    /// Shows a message without asking anything (previews, validation errors).
    fn notify(&mut self, message: &str);
}

/// Terminal backend rendering with dialoguer.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    /// Creates a terminal prompt backend with the default theme.
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBackend for TerminalPrompt {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, WizardError> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?;
        Ok(index)
    }

    fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String, WizardError> {
        let text: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()?;
        Ok(text)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, WizardError> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    fn notify(&mut self, message: &str) {
        println!("{}", style(message).dim());
    }
}
