//! Command line assembly and output normalization.

use crate::error::{NO_COMMAND, NO_DIRECTORY};
use crate::GitStampError;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// A git call scoped to one working tree.
///
/// Renders as `<program> --git-dir=<dir>/.git --work-tree=<dir> <command>`.
/// The command template is kept verbatim, so it may carry several
/// space-separated tokens, quotes or shell metacharacters. Directory
/// segments keep their raw OS bytes; `Display` is for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    git_dir: PathBuf,
    work_tree: PathBuf,
    command: String,
}

impl Invocation {
    /// Validate inputs and assemble the invocation.
    ///
    /// Fails with `InvalidArgument` when either the directory or the command
    /// is empty. Existence of the directory is left to git.
    pub fn new(program: &str, directory: &Path, command: &str) -> crate::Result<Self> {
        if directory.as_os_str().is_empty() {
            return Err(GitStampError::InvalidArgument(NO_DIRECTORY));
        }
        if command.is_empty() {
            return Err(GitStampError::InvalidArgument(NO_COMMAND));
        }

        Ok(Self {
            program: program.to_string(),
            git_dir: directory.join(".git"),
            work_tree: directory.to_path_buf(),
            command: command.to_string(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// The four segments joined with single spaces, byte for byte.
    pub fn command_line(&self) -> OsString {
        let mut line = OsString::from(&self.program);
        line.push(" --git-dir=");
        line.push(&self.git_dir);
        line.push(" --work-tree=");
        line.push(&self.work_tree);
        line.push(" ");
        line.push(&self.command);
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --git-dir={} --work-tree={} {}",
            self.program,
            self.git_dir.display(),
            self.work_tree.display(),
            self.command
        )
    }
}

/// Strip trailing whitespace, carriage returns and line feeds.
pub fn normalize_output(raw: &str) -> String {
    raw.trim_end().to_string()
}
