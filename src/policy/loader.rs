//! Policy file discovery and loading.
//!
//! Resolution order: explicit `--config` flag, the `COMMIT_POLICY_CONFIG`
//! environment variable (with fallback to the user settings file), a
//! `.commit-policy.yaml` in the current directory, a user-level
//! `~/.commit-policy/config.yaml`, and finally the built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::policy::types::PolicyConfig;
use crate::policy::{POLICY_ENV_VAR, POLICY_FILE_NAME};
use crate::utils::settings;

/// Where a loaded policy came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// Explicit `--config` flag.
    Flag(PathBuf),
    /// The `COMMIT_POLICY_CONFIG` environment variable.
    EnvVar(PathBuf),
    /// Repository-level `.commit-policy.yaml`.
    Repository(PathBuf),
    /// User-level `~/.commit-policy/config.yaml`.
    User(PathBuf),
    /// Built-in defaults; no file found.
    Defaults,
}

impl PolicySource {
    /// The file path behind this source, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            PolicySource::Flag(p)
            | PolicySource::EnvVar(p)
            | PolicySource::Repository(p)
            | PolicySource::User(p) => Some(p),
            PolicySource::Defaults => None,
        }
    }
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicySource::Flag(p) => write!(f, "{} (--config)", p.display()),
            PolicySource::EnvVar(p) => write!(f, "{} ({POLICY_ENV_VAR})", p.display()),
            PolicySource::Repository(p) => write!(f, "{} (repository)", p.display()),
            PolicySource::User(p) => write!(f, "{} (user)", p.display()),
            PolicySource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Resolves which policy file would be used, without reading it.
pub fn resolve_policy_path(explicit: Option<&Path>) -> PolicySource {
    if let Some(path) = explicit {
        return PolicySource::Flag(path.to_path_buf());
    }

    if let Some(path) = settings::get_env_var(POLICY_ENV_VAR) {
        return PolicySource::EnvVar(PathBuf::from(path));
    }

    let repo_file = PathBuf::from(POLICY_FILE_NAME);
    if repo_file.exists() {
        return PolicySource::Repository(repo_file);
    }

    if let Some(home) = dirs::home_dir() {
        let user_file = home.join(".commit-policy").join("config.yaml");
        if user_file.exists() {
            return PolicySource::User(user_file);
        }
    }

    PolicySource::Defaults
}

/// Loads the policy using the standard resolution chain.
pub fn load_policy(explicit: Option<&Path>) -> Result<(PolicyConfig, PolicySource)> {
    let source = resolve_policy_path(explicit);
    tracing::debug!("loading policy from {source}");

    let config = match source.path() {
        Some(path) => load_from_path(path)?,
        None => PolicyConfig::default(),
    };

    config
        .validate()
        .with_context(|| format!("Invalid policy from {source}"))?;

    Ok((config, source))
}

/// Loads a policy from a specific file. Missing fields take built-in defaults.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<PolicyConfig> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse policy file: {}", path.display()))
}
