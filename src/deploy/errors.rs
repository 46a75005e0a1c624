//! Error types for the deployment flow

use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// Why a program could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchErrorKind {
    /// The executable was not found on `PATH`
    NotFound,
    /// The executable exists but may not be executed
    PermissionDenied,
    /// Any other OS-level failure
    Other,
}

impl LaunchErrorKind {
    /// Classifies an I/O error returned by `spawn`
    #[must_use]
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

/// Errors that can occur while deploying
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// The program could not be started at all
    #[error("Failed to launch `{command}`: {message}")]
    LaunchFailed {
        /// Classification of the OS error.
        kind: LaunchErrorKind,
        /// Raw OS error code, when the OS reported one.
        os_code: Option<i32>,
        /// Message of the underlying OS error.
        message: String,
        /// Reconstructed command line.
        command: String,
        /// Working directory the program was started in.
        cwd: PathBuf,
    },

    /// The program ran and exited non-zero
    #[error("Command `{command}` failed with exit code {code}")]
    CommandFailed {
        /// Exit code, `-1` when the process was killed by a signal.
        code: i32,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
        /// Reconstructed command line.
        command: String,
        /// Working directory the program ran in.
        cwd: PathBuf,
    },

    /// The deploy succeeded but no URL was printed
    #[error("Could not parse deployment URL from CLI output")]
    UrlNotFound {
        /// Standard output that was scanned.
        stdout: String,
    },

    /// Alias assignment or status lookup was attempted before a deploy
    #[error("No deployment URL available, deploy must succeed first")]
    MissingDeploymentUrl,

    /// Deployment status lookup failed
    #[error("Deployment lookup failed: {message}")]
    Lookup {
        /// HTTP status, absent for transport errors.
        status: Option<u16>,
        /// Error description.
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for DeployError {
    fn from(err: reqwest::Error) -> Self {
        Self::Lookup {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl DeployError {
    /// Exit code of a failed command, if this error came from one
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Multi-line operator report for subprocess failures.
    ///
    /// Returns `None` for errors that carry no process diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Option<String> {
        let mut out = String::new();
        match self {
            Self::LaunchFailed {
                kind,
                os_code,
                message,
                command,
                cwd,
            } => {
                let _ = writeln!(out, "Command: {command}");
                let _ = writeln!(out, "Working directory: {}", cwd.display());
                match os_code {
                    Some(code) => {
                        let _ = writeln!(out, "OS error {code}: {message}");
                    }
                    None => {
                        let _ = writeln!(out, "OS error: {message}");
                    }
                }
                match kind {
                    LaunchErrorKind::NotFound => {
                        out.push_str("The program is not installed or not found in PATH\n");
                    }
                    LaunchErrorKind::PermissionDenied => {
                        out.push_str("Permission denied when trying to execute the program\n");
                    }
                    LaunchErrorKind::Other => {}
                }
            }
            Self::CommandFailed {
                code,
                stdout,
                stderr,
                command,
                cwd,
            } => {
                let _ = writeln!(out, "Command: {command}");
                let _ = writeln!(out, "Exit code: {code}");
                let _ = writeln!(out, "Working directory: {}", cwd.display());
                let _ = writeln!(out, "Error output:\n{stderr}");
                let _ = writeln!(out, "Standard output:\n{stdout}");
            }
            Self::UrlNotFound { stdout } => {
                let _ = writeln!(out, "Standard output:\n{stdout}");
            }
            _ => return None,
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_kind_from_io() {
        let not_found = std::io::Error::from(std::io::ErrorKind::NotFound);
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let other = std::io::Error::from(std::io::ErrorKind::Interrupted);

        assert_eq!(LaunchErrorKind::from_io(&not_found), LaunchErrorKind::NotFound);
        assert_eq!(
            LaunchErrorKind::from_io(&denied),
            LaunchErrorKind::PermissionDenied
        );
        assert_eq!(LaunchErrorKind::from_io(&other), LaunchErrorKind::Other);
    }

    #[test]
    fn test_command_failed_diagnostics() {
        let err = DeployError::CommandFailed {
            code: 1,
            stdout: "partial".to_string(),
            stderr: "Error: no project".to_string(),
            command: "vercel --token=*** --prod".to_string(),
            cwd: PathBuf::from("/work"),
        };

        assert_eq!(err.exit_code(), Some(1));
        let report = err.diagnostics().unwrap();
        assert!(report.contains("Exit code: 1"));
        assert!(report.contains("Error: no project"));
        assert!(report.contains("Working directory: /work"));
    }

    #[test]
    fn test_not_found_hint() {
        let err = DeployError::LaunchFailed {
            kind: LaunchErrorKind::NotFound,
            os_code: Some(2),
            message: "No such file or directory".to_string(),
            command: "vercel".to_string(),
            cwd: PathBuf::from("."),
        };

        assert_eq!(err.exit_code(), None);
        assert!(err.diagnostics().unwrap().contains("not found in PATH"));
    }

    #[test]
    fn test_other_launch_error_has_no_hint() {
        let err = DeployError::LaunchFailed {
            kind: LaunchErrorKind::Other,
            os_code: Some(7),
            message: "Argument list too long".to_string(),
            command: "vercel".to_string(),
            cwd: PathBuf::from("."),
        };

        let report = err.diagnostics().unwrap();
        assert!(!report.contains("PATH"));
        assert!(!report.contains("Permission denied"));
    }

    #[test]
    fn test_missing_url_has_no_diagnostics() {
        assert!(DeployError::MissingDeploymentUrl.diagnostics().is_none());
    }
}
