//! Lint command — validates commit messages against the policy.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::lint::{LintReport, LintSummary, Linter, MessageLintResult, OutputFormat};
use crate::policy::load_policy;

/// Lint command options — validates commit messages against the policy.
#[derive(Parser)]
pub struct LintCommand {
    /// Commit message to lint. Reads standard input when omitted and no
    /// other source is given.
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Lints the message stored in a file (e.g. .git/COMMIT_EDITMSG).
    #[arg(long, conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// Lints commits in a git range (e.g. main..HEAD, HEAD~3..HEAD).
    #[arg(long, value_name = "COMMIT_RANGE", conflicts_with_all = ["message", "file"])]
    pub range: Option<String>,

    /// Path to the policy file (defaults to the standard resolution chain).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Exits with error code if any issues found (including warnings).
    #[arg(long)]
    pub strict: bool,

    /// Only shows violations, suppresses progress output.
    #[arg(long)]
    pub quiet: bool,

    /// Includes passing messages in output (hidden by default).
    #[arg(long)]
    pub show_passing: bool,
}

impl LintCommand {
    /// Executes the lint command.
    pub fn execute(self) -> Result<()> {
        let output_format: OutputFormat = self.format.parse().unwrap_or(OutputFormat::Text);

        let (policy, source) = load_policy(self.config.as_deref())?;
        if !self.quiet && output_format == OutputFormat::Text {
            println!("\u{1f50d} Linting commit messages against {source}");
        }

        let linter = Linter::new(policy);
        let results = self.collect_results(&linter)?;
        let report = LintReport::new(results);

        self.output_report(&report, output_format)?;

        let exit_code = report.exit_code(self.strict);
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }

    /// Gathers lint results from the selected input source.
    fn collect_results(&self, linter: &Linter) -> Result<Vec<MessageLintResult>> {
        if let Some(message) = &self.message {
            return Ok(vec![linter.lint_message(message)]);
        }

        if let Some(path) = &self.file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read message file: {}", path.display()))?;
            let message = strip_comment_lines(&content);
            return Ok(vec![linter.lint_message(&message)]);
        }

        if let Some(range) = &self.range {
            return self.collect_range_results(linter, range);
        }

        // No source given: read the message from standard input
        let mut message = String::new();
        std::io::stdin()
            .read_to_string(&mut message)
            .context("Failed to read commit message from standard input")?;
        if message.trim().is_empty() {
            anyhow::bail!("No commit message provided (pass MESSAGE, --file or --range)");
        }
        Ok(vec![linter.lint_message(&message)])
    }

    /// Lints every commit header in a git range.
    fn collect_range_results(
        &self,
        linter: &Linter,
        range: &str,
    ) -> Result<Vec<MessageLintResult>> {
        let repo = crate::git::GitRepository::open()
            .context("Failed to open git repository. Make sure you're in a git repository.")?;

        let commits = repo.get_commits_in_range(range)?;

        if commits.is_empty() {
            eprintln!("error: no commits found in range");
            std::process::exit(3);
        }

        if !self.quiet {
            println!("\u{1f4ca} Found {} commits to lint", commits.len());
        }

        Ok(commits
            .iter()
            .map(|commit| {
                let mut result = linter.lint_header(&commit.header);
                result.hash = Some(commit.short_hash().to_string());
                result
            })
            .collect())
    }

    /// Outputs the lint report in the selected format.
    fn output_report(&self, report: &LintReport, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                self.output_text_report(report);
                Ok(())
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)
                    .context("Failed to serialize report to JSON")?;
                println!("{json}");
                Ok(())
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(report)
                    .context("Failed to serialize report to YAML")?;
                println!("{yaml}");
                Ok(())
            }
        }
    }

    /// Outputs the text format report.
    fn output_text_report(&self, report: &LintReport) {
        println!();

        for result in &report.results {
            if !should_display_result(result.passes, self.show_passing) {
                continue;
            }

            let icon = super::formatting::determine_result_icon(result);
            match &result.hash {
                Some(hash) => println!("{icon} {hash} - \"{}\"", result.header),
                None => println!("{icon} \"{}\"", result.header),
            }

            if let Some(parse_error) = &result.parse_error {
                println!(
                    "   {} {parse_error}",
                    super::formatting::format_severity_label(
                        crate::policy::rules::Severity::Error
                    )
                );
            }

            for violation in &result.violations {
                println!("{}", super::formatting::format_violation_line(violation));
            }

            println!();
        }

        println!("{}", format_summary_text(&report.summary));
    }
}

// --- Extracted pure functions ---

/// Returns whether a result should be displayed based on its pass status.
fn should_display_result(passes: bool, show_passing: bool) -> bool {
    !passes || show_passing
}

/// Removes `#` comment lines as found in git message files.
fn strip_comment_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the summary section of a lint report.
fn format_summary_text(summary: &LintSummary) -> String {
    format!(
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         Summary: {} messages linted\n\
         \x20 {} errors, {} warnings\n\
         \x20 {} passed, {} with issues",
        summary.total,
        summary.error_count,
        summary.warning_count,
        summary.passing,
        summary.failing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- should_display_result ---

    #[test]
    fn display_result_passing_hidden() {
        assert!(!should_display_result(true, false));
    }

    #[test]
    fn display_result_passing_shown() {
        assert!(should_display_result(true, true));
    }

    #[test]
    fn display_result_failing() {
        assert!(should_display_result(false, false));
        assert!(should_display_result(false, true));
    }

    // --- strip_comment_lines ---

    #[test]
    fn strip_comments_keeps_message() {
        let content = "feat: add endpoint\n\n# Please enter the commit message\n# Lines starting with '#' will be ignored\n";
        assert_eq!(strip_comment_lines(content), "feat: add endpoint\n");
    }

    #[test]
    fn strip_comments_on_clean_message() {
        assert_eq!(strip_comment_lines("fix: a\n\nbody"), "fix: a\n\nbody");
    }

    // --- format_summary_text ---

    #[test]
    fn summary_text_formatting() {
        let summary = LintSummary {
            total: 5,
            passing: 3,
            failing: 2,
            error_count: 1,
            warning_count: 4,
        };
        let result = format_summary_text(&summary);
        assert!(result.contains("5 messages linted"));
        assert!(result.contains("1 errors, 4 warnings"));
        assert!(result.contains("3 passed, 2 with issues"));
    }
}
