//! Preflight validation checks for early failure detection.
//!
//! The wizard asks up to eight questions; nothing is more annoying than
//! answering all of them and then learning the commit cannot be created.
//! Commands call these checks first to fail fast with a clear message.

use anyhow::{bail, Result};

use crate::git::GitRepository;

/// Repository facts gathered before the wizard starts.
#[derive(Debug)]
pub struct WizardContext {
    /// Current branch name, or `HEAD` when detached.
    pub branch: String,
    /// Files staged for the commit.
    pub staged_files: Vec<String>,
}

/// Validates that a commit can actually be created before any question is
/// asked: we are inside a repository and something is staged.
pub fn check_wizard_prerequisites(repo: &GitRepository) -> Result<WizardContext> {
    let branch = repo
        .get_current_branch()
        .unwrap_or_else(|_| "HEAD".to_string());

    let staged_files = repo.staged_files()?;
    if staged_files.is_empty() {
        bail!(
            "Nothing is staged for commit.\n\
             Stage your changes first, e.g.:\n\
             - git add <file>\n\
             - git add -p"
        );
    }

    Ok(WizardContext {
        branch,
        staged_files,
    })
}
