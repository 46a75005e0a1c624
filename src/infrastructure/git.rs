//! Commit metadata discovery from the local checkout

use crate::deploy::DeployError;
use crate::executor::{CommandInvocation, Runner};
use std::path::Path;

/// Author and message of `HEAD`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCommit {
    /// Author display name
    pub author_name: String,
    /// Full commit message
    pub message: String,
}

/// Parses `git log -1 --pretty=format:%an%x00%B` output
#[must_use]
pub fn parse_head_commit(stdout: &str) -> Option<HeadCommit> {
    let (author_name, message) = stdout.split_once('\0')?;
    Some(HeadCommit {
        author_name: author_name.trim().to_string(),
        message: message.trim_end().to_string(),
    })
}

/// Reads author and message of the checked-out commit
///
/// # Errors
///
/// Propagates runner errors; returns `DeployError::Config` if git printed
/// something unexpected.
pub fn head_commit<R: Runner>(runner: &R, cwd: &Path) -> Result<HeadCommit, DeployError> {
    let invocation =
        CommandInvocation::new("git", cwd).args(["log", "-1", "--pretty=format:%an%x00%B"]);
    let result = runner.run(&invocation)?;

    parse_head_commit(&result.stdout)
        .ok_or_else(|| DeployError::Config("unexpected `git log` output".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ProcessRunner;

    #[test]
    fn test_parse_head_commit() {
        let commit = parse_head_commit("Jane Doe\0Fix header\n\nDetails\n").unwrap();

        assert_eq!(commit.author_name, "Jane Doe");
        assert_eq!(commit.message, "Fix header\n\nDetails");
    }

    #[test]
    fn test_parse_rejects_unseparated_output() {
        assert!(parse_head_commit("fatal: not a git repository").is_none());
    }

    #[test]
    fn test_head_commit_outside_repository_fails() {
        let temp_dir = tempfile::tempdir().unwrap();

        // Either git is missing or the directory is not a repository.
        assert!(head_commit(&ProcessRunner::new(), temp_dir.path()).is_err());
    }
}
