//! gitstamp core - read commit, version and branch info from git
//!
//! Every query is a single `git --git-dir=<dir>/.git --work-tree=<dir> <command>`
//! invocation whose stdout is returned with trailing whitespace removed.

pub mod config;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod preset;
pub mod runner;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{ErrorKind, GitStampError};
pub use executor::{Executor, ShellExecutor, DEFAULT_SHELL};
pub use invocation::{normalize_output, Invocation};
pub use preset::{
    branch, hash, last_commit_by, last_commit_on, run, version, Preset, Stamp, BRANCH, HASH,
    LAST_COMMIT_BY, LAST_COMMIT_ON, VERSION,
};
pub use runner::CommandRunner;

/// Result type alias for gitstamp operations
pub type Result<T> = std::result::Result<T, GitStampError>;
