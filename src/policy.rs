//! Policy configuration for commit message authoring and linting.

pub mod loader;
pub mod rules;
pub mod types;

pub use loader::{load_policy, resolve_policy_path, PolicySource};
pub use rules::{Applicability, CaseConvention, CaseStyle, Rule, RuleId, RuleSet, Severity};
pub use types::{suggest_scope, CommitTypeEntry, PolicyConfig, PromptMessages, ScopeEntry};

/// Name of the repository-level policy file.
pub const POLICY_FILE_NAME: &str = ".commit-policy.yaml";

/// Environment variable that overrides the policy file location.
pub const POLICY_ENV_VAR: &str = "COMMIT_POLICY_CONFIG";
