//! Subprocess execution behind a small trait so callers and tests can swap it.

use crate::invocation::Invocation;
use crate::GitStampError;
use std::ffi::OsStr;
use std::future::Future;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Shell used when none is configured
pub const DEFAULT_SHELL: &str = if cfg!(windows) { "cmd" } else { "sh" };

/// Runs an [`Invocation`] and returns its raw stdout.
///
/// Implementations report a non-zero exit as `CommandFailed` and a spawn
/// error as `Launch`. Output is returned untouched; trimming happens in the
/// runner.
pub trait Executor: Send + Sync + 'static {
    /// Block until the subprocess exits.
    fn execute(&self, invocation: &Invocation) -> crate::Result<String>;

    /// Run the subprocess without blocking the calling thread.
    fn execute_async(
        &self,
        invocation: Invocation,
    ) -> impl Future<Output = crate::Result<String>> + Send;
}

/// Hands the joined command line to a shell: `<shell> /C <line>` for
/// `cmd`, `<shell> -c <line>` for everything else.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    fn shell_command(&self, line: &OsStr) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg(shell_flag(&self.shell))
            .arg(line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl Executor for ShellExecutor {
    fn execute(&self, invocation: &Invocation) -> crate::Result<String> {
        let line = invocation.to_string();
        debug!(command = %line, mode = "blocking", "Running git command");

        let output = self
            .shell_command(&invocation.command_line())
            .output()
            .map_err(|source| GitStampError::Launch {
                command: line.clone(),
                source,
            })?;
        collect(line, output)
    }

    fn execute_async(
        &self,
        invocation: Invocation,
    ) -> impl Future<Output = crate::Result<String>> + Send {
        let line = invocation.to_string();
        let mut cmd =
            tokio::process::Command::from(self.shell_command(&invocation.command_line()));
        async move {
            debug!(command = %line, mode = "async", "Running git command");
            let output = cmd
                .output()
                .await
                .map_err(|source| GitStampError::Launch {
                    command: line.clone(),
                    source,
                })?;
            collect(line, output)
        }
    }
}

fn shell_flag(shell: &str) -> &'static str {
    let name = Path::new(shell)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(shell);
    if name.eq_ignore_ascii_case("cmd") {
        "/C"
    } else {
        "-c"
    }
}

fn collect(command: String, output: Output) -> crate::Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        debug!(command = %command, status = ?output.status.code(), stderr = %stderr, "Git command failed");
        return Err(GitStampError::CommandFailed {
            command,
            code: output.status.code(),
            stderr,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
