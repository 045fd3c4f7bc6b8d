//! Policy configuration management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::policy::{load_policy, resolve_policy_path, POLICY_FILE_NAME};

/// Embedded starter policy written by `config init`.
pub const POLICY_TEMPLATE: &str = include_str!("../templates/commit-policy.yaml");

/// Policy configuration management.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Prints the resolved policy as YAML.
    Show(ShowCommand),
    /// Writes a starter .commit-policy.yaml to the current directory.
    Init(InitCommand),
    /// Prints which policy file would be used.
    Path(PathCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Path to the policy file (defaults to the standard resolution chain).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Init command options.
#[derive(Parser)]
pub struct InitCommand {
    /// Overwrites an existing policy file.
    #[arg(long)]
    pub force: bool,
}

/// Path command options.
#[derive(Parser)]
pub struct PathCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
            ConfigSubcommands::Init(init_cmd) => init_cmd.execute(),
            ConfigSubcommands::Path(path_cmd) => path_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let (policy, source) = load_policy(self.config.as_deref())?;
        println!("# Resolved from {source}");
        let yaml = serde_yaml::to_string(&policy).context("Failed to serialize policy")?;
        println!("{yaml}");
        Ok(())
    }
}

impl InitCommand {
    /// Executes the init command.
    pub fn execute(self) -> Result<()> {
        write_starter_policy(Path::new(POLICY_FILE_NAME), self.force)?;
        println!("\u{2705} Generated {POLICY_FILE_NAME}");
        Ok(())
    }
}

impl PathCommand {
    /// Executes the path command.
    pub fn execute(self) -> Result<()> {
        let source = resolve_policy_path(None);
        match source.path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(built-in defaults)"),
        }
        Ok(())
    }
}

/// Writes the embedded starter policy, refusing to clobber without `force`.
fn write_starter_policy(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            path.display()
        );
    }

    fs::write(path, POLICY_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyConfig;
    use tempfile::TempDir;

    #[test]
    fn template_parses_into_policy() {
        let policy: PolicyConfig = serde_yaml::from_str(POLICY_TEMPLATE).unwrap();
        assert_eq!(policy.types.len(), 11);
        assert_eq!(policy.subject_limit, 72);
        assert_eq!(policy.rules.header_limit(), 72);
        assert_eq!(policy.scopes.len(), 3);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn template_rules_match_builtin_defaults() {
        let policy: PolicyConfig = serde_yaml::from_str(POLICY_TEMPLATE).unwrap();
        let defaults = PolicyConfig::default();
        assert_eq!(
            policy.rules.type_case.severity,
            defaults.rules.type_case.severity
        );
        assert_eq!(
            policy.rules.subject_full_stop.value,
            defaults.rules.subject_full_stop.value
        );
        assert_eq!(
            policy.type_values(),
            defaults.type_values(),
            "template type table should match the built-in one"
        );
    }

    #[test]
    fn write_starter_policy_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(POLICY_FILE_NAME);

        write_starter_policy(&path, false).unwrap();
        assert!(path.exists());

        let result = write_starter_policy(&path, false);
        assert!(result.is_err(), "existing file must not be clobbered");

        assert!(write_starter_policy(&path, true).is_ok());
    }
}
