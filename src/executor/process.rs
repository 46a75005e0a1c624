//! Subprocess execution with incremental output capture
//!
//! The child's stdout and stderr are drained by two reader threads while the
//! process runs, so a chatty CLI never blocks on a full pipe buffer. Each
//! chunk is appended to a shared buffer as it arrives and, when echo is
//! enabled, forwarded to this process's own stdout/stderr so CI logs show
//! progress live.

use super::traits::{CommandInvocation, CommandResult, Runner};
use crate::deploy::DeployError;
use parking_lot::Mutex;
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

const CHUNK_SIZE: usize = 8192;

/// Where a drained stream is mirrored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Echo {
    Stdout,
    Stderr,
}

impl Echo {
    fn write(self, chunk: &[u8]) {
        // Mirroring is best effort; a closed parent stream must not abort capture.
        let _ = match self {
            Self::Stdout => io::stdout().lock().write_all(chunk),
            Self::Stderr => io::stderr().lock().write_all(chunk),
        };
    }
}

/// Runner that spawns real processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    echo: bool,
}

impl ProcessRunner {
    /// Creates a runner that captures output silently
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors child output to this process's stdout/stderr
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Runner for ProcessRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, DeployError> {
        let command = invocation.command_line();

        if !invocation.cwd.is_dir() {
            return Err(DeployError::LaunchFailed {
                kind: crate::deploy::LaunchErrorKind::Other,
                os_code: None,
                message: format!(
                    "working directory {} does not exist",
                    invocation.cwd.display()
                ),
                command,
                cwd: invocation.cwd.clone(),
            });
        }

        tracing::debug!(command = %command, cwd = %invocation.cwd.display(), "Executing command");

        let start = Instant::now();

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| invocation.launch_error(&e))?;

        let stdout_buf = Arc::new(Mutex::new(Vec::new()));
        let stderr_buf = Arc::new(Mutex::new(Vec::new()));

        let stdout_thread = child.stdout.take().map(|pipe| {
            drain(
                pipe,
                Arc::clone(&stdout_buf),
                self.echo.then_some(Echo::Stdout),
            )
        });
        let stderr_thread = child.stderr.take().map(|pipe| {
            drain(
                pipe,
                Arc::clone(&stderr_buf),
                self.echo.then_some(Echo::Stderr),
            )
        });

        let status = child.wait();

        for handle in [stdout_thread, stderr_thread].into_iter().flatten() {
            if handle.join().is_err() {
                tracing::warn!(command = %command, "Output reader thread panicked");
            }
        }

        let status = status?;
        let stdout = String::from_utf8_lossy(&stdout_buf.lock()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_buf.lock()).into_owned();
        let code = status.code().unwrap_or(-1);
        let duration = start.elapsed();

        tracing::debug!(
            command = %command,
            exit_code = code,
            duration_ms = duration.as_millis(),
            "Command finished"
        );

        if code != 0 {
            return Err(DeployError::CommandFailed {
                code,
                stdout,
                stderr,
                command,
                cwd: invocation.cwd.clone(),
            });
        }

        Ok(CommandResult {
            code,
            stdout,
            stderr,
            command,
            cwd: invocation.cwd.clone(),
            duration,
        })
    }
}

/// Appends everything read from `pipe` to `buffer` until EOF
fn drain<R>(mut pipe: R, buffer: Arc<Mutex<Vec<u8>>>, echo: Option<Echo>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    buffer.lock().extend_from_slice(&chunk[..n]);
                    if let Some(target) = echo {
                        target.write(&chunk[..n]);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed reading child output");
                    break;
                }
            }
        }
    })
}
