//! CLI interface for commit-policy.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod config;
mod formatting;
pub mod help;
pub mod lint;
pub mod wizard;

/// commit-policy: conventional commit message linting and authoring.
#[derive(Parser)]
#[command(name = "commit-policy")]
#[command(about = "A conventional commit message linting and authoring toolkit", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Lints commit messages against the policy.
    Lint(lint::LintCommand),
    /// Interactively authors a commit message and creates the commit.
    Wizard(wizard::WizardCommand),
    /// Policy configuration management.
    Config(config::ConfigCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Lint(lint_cmd) => lint_cmd.execute(),
            Commands::Wizard(wizard_cmd) => wizard_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
            Commands::HelpAll(help_cmd) => help_cmd.execute(),
        }
    }
}
