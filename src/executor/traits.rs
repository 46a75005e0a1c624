//! Command execution traits
//!
//! This module defines the invocation/result types and the runner seam.

use crate::deploy::{DeployError, LaunchErrorKind};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Flag prefixes whose values never appear in logs or diagnostics
const SECRET_FLAGS: &[&str] = &["--token="];

/// Trait for running external programs
#[allow(clippy::missing_errors_doc)]
pub trait Runner: Send + Sync {
    /// Runs the invocation to completion
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, DeployError>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, DeployError> {
        (**self).run(invocation)
    }
}

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Program name, resolved on `PATH`
    pub program: String,

    /// Arguments, in order
    pub args: Vec<String>,

    /// Working directory
    pub cwd: PathBuf,

    /// Extra environment for this invocation only
    pub env: HashMap<String, String>,
}

impl CommandInvocation {
    /// Creates an invocation with no arguments
    #[must_use]
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: HashMap::new(),
        }
    }

    /// Appends arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an environment variable scoped to this invocation
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Shell-quoted command line with secret values masked
    #[must_use]
    pub fn command_line(&self) -> String {
        let words = std::iter::once(self.program.clone()).chain(self.args.iter().map(|arg| {
            SECRET_FLAGS
                .iter()
                .find(|prefix| arg.starts_with(*prefix))
                .map_or_else(|| arg.clone(), |prefix| format!("{prefix}***"))
        }));
        shell_words::join(words)
    }

    /// Builds the launch error for a failed spawn
    #[must_use]
    pub fn launch_error(&self, err: &std::io::Error) -> DeployError {
        DeployError::LaunchFailed {
            kind: LaunchErrorKind::from_io(err),
            os_code: err.raw_os_error(),
            message: err.to_string(),
            command: self.command_line(),
            cwd: self.cwd.clone(),
        }
    }
}

/// Result of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code
    pub code: i32,

    /// Standard output
    pub stdout: String,

    /// Standard error
    pub stderr: String,

    /// Command line, secrets masked
    pub command: String,

    /// Working directory
    pub cwd: PathBuf,

    /// Duration of execution
    pub duration: Duration,
}

impl CommandResult {
    /// Returns true if command succeeded (exit code 0)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}
