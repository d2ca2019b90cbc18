//! Configuration for gitstamp

use crate::executor::DEFAULT_SHELL;
use crate::preset::{Preset, BRANCH, HASH, LAST_COMMIT_BY, LAST_COMMIT_ON, VERSION};
use crate::GitStampError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# gitstamp configuration

[git]
# Executable placed first in every command line
program = "git"
# Shell that interprets the joined command line; defaults to "sh"
# ("cmd" on Windows). `cmd` gets `/C`, any other shell gets `-c`.
# shell = "sh"

[commands]
# Default templates used when a preset is called without an override
hash = "rev-parse HEAD"
version = "describe --always --tags --dirty"
branch = "rev-parse --abbrev-ref HEAD"
last_commit_on = "log -1 --pretty=format:%cd"
last_commit_by = 'log -1 --pretty=format:"%an <%ae>"'
"#;

/// gitstamp configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_shell")]
    pub shell: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_hash")]
    pub hash: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_last_commit_on")]
    pub last_commit_on: String,
    #[serde(default = "default_last_commit_by")]
    pub last_commit_by: String,
}

// Default value functions
fn default_program() -> String {
    "git".to_string()
}
fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}
fn default_hash() -> String {
    HASH.to_string()
}
fn default_version() -> String {
    VERSION.to_string()
}
fn default_branch() -> String {
    BRANCH.to_string()
}
fn default_last_commit_on() -> String {
    LAST_COMMIT_ON.to_string()
}
fn default_last_commit_by() -> String {
    LAST_COMMIT_BY.to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            shell: default_shell(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            hash: default_hash(),
            version: default_version(),
            branch: default_branch(),
            last_commit_on: default_last_commit_on(),
            last_commit_by: default_last_commit_by(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| GitStampError::ConfigParse(e.to_string()))
    }

    /// Template a preset uses when the caller gives no override
    pub fn command_for(&self, preset: Preset) -> &str {
        match preset {
            Preset::Hash => &self.commands.hash,
            Preset::Version => &self.commands.version,
            Preset::Branch => &self.commands.branch,
            Preset::LastCommitOn => &self.commands.last_commit_on,
            Preset::LastCommitBy => &self.commands.last_commit_by,
        }
    }
}
