//! Wizard command — interactive commit authoring.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::git::GitRepository;
use crate::lint::Linter;
use crate::policy::{load_policy, suggest_scope};
use crate::utils::preflight;
use crate::wizard::{TerminalPrompt, WizardFlow, WizardOutcome};

/// Wizard command options — interactively assembles a commit message.
#[derive(Parser)]
pub struct WizardCommand {
    /// Prints the assembled message instead of creating a commit.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the policy file (defaults to the standard resolution chain).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl WizardCommand {
    /// Executes the wizard command.
    pub fn execute(self) -> Result<()> {
        let (policy, source) = load_policy(self.config.as_deref())?;
        tracing::debug!("wizard using policy from {source}");

        // Fail fast before asking a single question
        let repo_context = if self.dry_run {
            None
        } else {
            let repo = GitRepository::open()
                .context("Failed to open git repository. Make sure you're in a git repository.")?;
            let context = preflight::check_wizard_prerequisites(&repo)?;
            println!(
                "\u{1f33f} On branch {} with {} staged file(s)",
                context.branch,
                context.staged_files.len()
            );
            Some((repo, context))
        };

        let scope_hint = repo_context
            .as_ref()
            .and_then(|(_, context)| suggest_scope(&policy.scopes, &context.staged_files));

        let mut flow =
            WizardFlow::new(&policy, TerminalPrompt::new()).with_scope_hint(scope_hint);
        let outcome = flow.run()?;

        let message = match outcome {
            WizardOutcome::Message(message) => message,
            WizardOutcome::Aborted => {
                println!("\u{2716} Commit aborted.");
                return Ok(());
            }
        };

        // The wizard and the linter enforce the same policy; a message that
        // fails here means the answers themselves break a rule
        let lint_result = Linter::new(policy).lint_message(&message);
        if !lint_result.passes {
            for violation in &lint_result.violations {
                eprintln!("{}", super::formatting::format_violation_line(violation));
            }
            anyhow::bail!("The assembled message violates the commit policy");
        }

        if self.dry_run {
            println!("{message}");
            return Ok(());
        }

        let (repo, context) = repo_context.context("repository context is present unless --dry-run")?;
        let oid = repo.create_commit(&message)?;
        let short = &oid.to_string()[..crate::git::SHORT_HASH_LEN];
        println!("\u{2705} Created commit {short} on {}", context.branch);

        Ok(())
    }
}
