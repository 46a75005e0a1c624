//! Deployment CLI installation

use crate::deploy::{DEFAULT_CLI, DeployError};
use crate::executor::{CommandInvocation, CommandResult, Runner};
use std::path::Path;

/// Package manager used to install the CLI
const NPM: &str = "npm";

/// Builds the `npm install -g vercel[@version]` invocation
#[must_use]
pub fn install_invocation(version: Option<&str>, cwd: &Path) -> CommandInvocation {
    let package = match version {
        Some(version) if !version.is_empty() => format!("{DEFAULT_CLI}@{version}"),
        _ => DEFAULT_CLI.to_string(),
    };
    CommandInvocation::new(NPM, cwd).args(["install", "-g", package.as_str()])
}

/// Installs the deployment CLI globally
///
/// # Errors
///
/// Propagates the runner error when `npm` is missing or fails.
pub fn install_cli<R: Runner>(
    runner: &R,
    version: Option<&str>,
    cwd: &Path,
) -> Result<CommandResult, DeployError> {
    let invocation = install_invocation(version, cwd);
    tracing::info!(command = %invocation.command_line(), "Installing Vercel CLI");
    runner.run(&invocation)
}
