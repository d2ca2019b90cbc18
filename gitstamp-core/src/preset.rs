//! Named queries with their default command templates.

use crate::runner::CommandRunner;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Current commit identifier
pub const HASH: &str = "rev-parse HEAD";
/// Tag, hash and dirty-suffix composite
pub const VERSION: &str = "describe --always --tags --dirty";
/// Current branch name
pub const BRANCH: &str = "rev-parse --abbrev-ref HEAD";
/// Committer date of the last commit, in git's default date format
pub const LAST_COMMIT_ON: &str = "log -1 --pretty=format:%cd";
/// Author of the last commit as `Name <email>`
pub const LAST_COMMIT_BY: &str = r#"log -1 --pretty=format:"%an <%ae>""#;

/// One of the five built-in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Hash,
    Version,
    Branch,
    LastCommitOn,
    LastCommitBy,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Hash,
        Preset::Version,
        Preset::Branch,
        Preset::LastCommitOn,
        Preset::LastCommitBy,
    ];

    /// Built-in template, independent of any [`Config`](crate::Config) override
    pub fn default_command(self) -> &'static str {
        match self {
            Preset::Hash => HASH,
            Preset::Version => VERSION,
            Preset::Branch => BRANCH,
            Preset::LastCommitOn => LAST_COMMIT_ON,
            Preset::LastCommitBy => LAST_COMMIT_BY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Hash => "hash",
            Preset::Version => "version",
            Preset::Branch => "branch",
            Preset::LastCommitOn => "last_commit_on",
            Preset::LastCommitBy => "last_commit_by",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All five presets read from one working tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stamp {
    pub hash: String,
    pub version: String,
    pub branch: String,
    pub last_commit_on: String,
    pub last_commit_by: String,
}

impl Stamp {
    pub fn get(&self, preset: Preset) -> &str {
        match preset {
            Preset::Hash => &self.hash,
            Preset::Version => &self.version,
            Preset::Branch => &self.branch,
            Preset::LastCommitOn => &self.last_commit_on,
            Preset::LastCommitBy => &self.last_commit_by,
        }
    }
}

// Blocking shorthands over a default `CommandRunner` (shell executor,
// built-in templates). `command: None` selects the preset's default.

/// Run an arbitrary template against `directory`.
pub fn run(directory: impl AsRef<Path>, command: &str) -> crate::Result<String> {
    CommandRunner::default().run(directory, command)
}

pub fn hash(directory: impl AsRef<Path>, command: Option<&str>) -> crate::Result<String> {
    CommandRunner::default().hash(directory, command)
}

pub fn version(directory: impl AsRef<Path>, command: Option<&str>) -> crate::Result<String> {
    CommandRunner::default().version(directory, command)
}

pub fn branch(directory: impl AsRef<Path>, command: Option<&str>) -> crate::Result<String> {
    CommandRunner::default().branch(directory, command)
}

pub fn last_commit_on(directory: impl AsRef<Path>, command: Option<&str>) -> crate::Result<String> {
    CommandRunner::default().last_commit_on(directory, command)
}

pub fn last_commit_by(directory: impl AsRef<Path>, command: Option<&str>) -> crate::Result<String> {
    CommandRunner::default().last_commit_by(directory, command)
}
