//! Git repository access.

pub mod repository;

pub use repository::{CommitSummary, GitRepository};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
