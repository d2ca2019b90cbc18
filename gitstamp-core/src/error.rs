//! Error types for gitstamp operations

use std::io;

/// Message for a missing or empty repository directory.
pub const NO_DIRECTORY: &str = "no git repository directory provided.";

/// Message for a missing or empty command template.
pub const NO_COMMAND: &str = "no command provided. Please provide valid git command options.";

/// Coarse classification of a [`GitStampError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any subprocess was launched
    InvalidArgument,
    /// git exited non-zero or could not be launched
    ExecutionFailure,
    /// Configuration or runtime plumbing
    Other,
}

#[derive(Debug, thiserror::Error)]
pub enum GitStampError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("Command failed ({}): {command}\n{stderr}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Background task failed: {0}")]
    Join(String),
}

impl GitStampError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::CommandFailed { .. } | Self::Launch { .. } => ErrorKind::ExecutionFailure,
            Self::ConfigParse(_) | Self::Io(_) | Self::Join(_) => ErrorKind::Other,
        }
    }

    /// Diagnostic text reported by git, if the failure came from the subprocess.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for GitStampError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
