//! Git repository operations.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use git2::{Commit, Repository, Status, StatusOptions};
use serde::{Deserialize, Serialize};

/// Git repository wrapper.
pub struct GitRepository {
    repo: Repository,
}

/// The commit facts the linter needs: identity, author, and the header line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Full SHA-1 hash of the commit.
    pub hash: String,
    /// Commit author name and email address.
    pub author: String,
    /// Commit date in ISO format with timezone.
    pub date: DateTime<FixedOffset>,
    /// First line of the commit message.
    pub header: String,
}

impl CommitSummary {
    /// Builds a summary from a libgit2 commit.
    pub fn from_git_commit(commit: &Commit) -> Result<Self> {
        let hash = commit.id().to_string();

        let author = format!(
            "{} <{}>",
            commit.author().name().unwrap_or("Unknown"),
            commit.author().email().unwrap_or("unknown@example.com")
        );

        let timestamp = commit.author().when();
        let offset = FixedOffset::east_opt(timestamp.offset_minutes() * 60)
            .or_else(|| FixedOffset::east_opt(0))
            .context("Invalid timezone offset")?;
        let date = DateTime::from_timestamp(timestamp.seconds(), 0)
            .context("Invalid commit timestamp")?
            .with_timezone(&offset);

        let header = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        Ok(Self {
            hash,
            author,
            date,
            header,
        })
    }

    /// Short form of the commit hash.
    pub fn short_hash(&self) -> &str {
        let len = crate::git::SHORT_HASH_LEN;
        if self.hash.len() > len {
            &self.hash[..len]
        } else {
            &self.hash
        }
    }
}

impl GitRepository {
    /// Opens the repository at the current directory.
    pub fn open() -> Result<Self> {
        let repo = Repository::open(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Opens the repository at a specific path.
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Access to the underlying libgit2 repository.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Current branch name.
    pub fn get_current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;

        if let Some(name) = head.shorthand() {
            if name != "HEAD" {
                return Ok(name.to_string());
            }
        }

        anyhow::bail!("Repository is in detached HEAD state")
    }

    /// Files with changes staged in the index, relative to the repo root.
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options.include_untracked(false);

        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .context("Failed to get repository status")?;

        let staged_mask = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;

        let mut files = Vec::new();
        for entry in statuses.iter() {
            if entry.status().intersects(staged_mask) {
                if let Some(path) = entry.path() {
                    files.push(path.to_string());
                }
            }
        }

        Ok(files)
    }

    /// Whether anything is staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        Ok(!self.staged_files()?.is_empty())
    }

    /// Creates a commit from the current index on HEAD.
    pub fn create_commit(&self, message: &str) -> Result<git2::Oid> {
        let mut index = self.repo.index().context("Failed to get index")?;
        let tree_id = index.write_tree().context("Failed to write index tree")?;
        let tree = self
            .repo
            .find_tree(tree_id)
            .context("Failed to find index tree")?;

        let signature = self
            .repo
            .signature()
            .context("Failed to determine commit signature. Configure user.name and user.email")?;

        // Initial commits have no parent
        let parent = match self.repo.head() {
            Ok(head) => Some(
                head.peel_to_commit()
                    .context("Failed to peel HEAD to commit")?,
            ),
            Err(_) => None,
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .context("Failed to create commit")
    }

    /// Parses a commit range and returns the commits, oldest first.
    ///
    /// Accepts `HEAD`, a single revision, or an `a..b` range. Merge commits
    /// are skipped.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<CommitSummary>> {
        let mut commits = Vec::new();

        if range.contains("..") {
            let parts: Vec<&str> = range.split("..").collect();
            if parts.len() != 2 {
                anyhow::bail!("Invalid range format: {}", range);
            }

            let start_obj = self
                .repo
                .revparse_single(parts[0])
                .with_context(|| format!("Failed to parse start commit: {}", parts[0]))?;
            let end_obj = self
                .repo
                .revparse_single(parts[1])
                .with_context(|| format!("Failed to parse end commit: {}", parts[1]))?;

            let start_commit = start_obj
                .peel_to_commit()
                .context("Failed to peel start object to commit")?;
            let end_commit = end_obj
                .peel_to_commit()
                .context("Failed to peel end object to commit")?;

            // Walk from the end commit back to the start commit (exclusive)
            let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
            walker
                .push(end_commit.id())
                .context("Failed to push end commit")?;
            walker
                .hide(start_commit.id())
                .context("Failed to hide start commit")?;

            for oid in walker {
                let oid = oid.context("Failed to get commit OID from walker")?;
                let commit = self
                    .repo
                    .find_commit(oid)
                    .context("Failed to find commit")?;

                if commit.parent_count() > 1 {
                    continue;
                }

                commits.push(CommitSummary::from_git_commit(&commit)?);
            }

            // Chronological order, oldest first
            commits.reverse();
        } else {
            let obj = self
                .repo
                .revparse_single(range)
                .with_context(|| format!("Failed to parse commit: {}", range))?;
            let commit = obj
                .peel_to_commit()
                .context("Failed to peel object to commit")?;
            commits.push(CommitSummary::from_git_commit(&commit)?);
        }

        Ok(commits)
    }
}
