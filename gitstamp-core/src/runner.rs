//! Validates, assembles and executes scoped git invocations.

use crate::config::Config;
use crate::executor::{Executor, ShellExecutor};
use crate::invocation::{normalize_output, Invocation};
use crate::preset::{Preset, Stamp};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs command templates against a working tree.
///
/// Cloning is cheap; clones share the executor and configuration.
#[derive(Debug)]
pub struct CommandRunner<E = ShellExecutor> {
    executor: Arc<E>,
    config: Arc<Config>,
}

impl<E> Clone for CommandRunner<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: Arc::clone(&self.config),
        }
    }
}

impl CommandRunner<ShellExecutor> {
    /// Shell executor and built-in templates
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Shell executor using the configured shell
    pub fn from_config(config: Config) -> Self {
        let executor = ShellExecutor::new(config.git.shell.clone());
        Self::with_executor(executor, config)
    }
}

impl Default for CommandRunner<ShellExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Executor> CommandRunner<E> {
    pub fn with_executor(executor: E, config: Config) -> Self {
        Self {
            executor: Arc::new(executor),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Validate inputs and build the invocation without running it.
    pub fn invocation(
        &self,
        directory: impl AsRef<Path>,
        command: &str,
    ) -> crate::Result<Invocation> {
        Invocation::new(&self.config.git.program, directory.as_ref(), command)
    }

    /// Run `command` in `directory`, blocking until git exits.
    pub fn run(&self, directory: impl AsRef<Path>, command: &str) -> crate::Result<String> {
        let invocation = self.invocation(directory, command)?;
        let raw = self.executor.execute(&invocation)?;
        Ok(normalize_output(&raw))
    }

    /// Non-blocking form of [`run`](Self::run).
    pub async fn run_async(
        &self,
        directory: impl AsRef<Path>,
        command: &str,
    ) -> crate::Result<String> {
        let invocation = self.invocation(directory, command)?;
        let raw = self.executor.execute_async(invocation).await?;
        Ok(normalize_output(&raw))
    }

    /// Run on a spawned task and hand the outcome to `handler`.
    ///
    /// The handler is called exactly once, from the spawned task, so never
    /// before this method returns. Validation errors are delivered the same
    /// way.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn run_with_callback<F>(
        &self,
        directory: impl AsRef<Path>,
        command: &str,
        handler: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(crate::Result<String>) + Send + 'static,
    {
        let runner = self.clone();
        let directory = directory.as_ref().to_path_buf();
        let command = command.to_string();
        tokio::spawn(async move {
            let result = runner.run_async(&directory, &command).await;
            handler(result);
        })
    }

    /// Run a preset, falling back to its configured template when `command`
    /// is `None`.
    pub fn preset(
        &self,
        preset: Preset,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        let command = command.unwrap_or_else(|| self.config.command_for(preset));
        self.run(directory, command)
    }

    pub async fn preset_async(
        &self,
        preset: Preset,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        let command = command.unwrap_or_else(|| self.config.command_for(preset));
        self.run_async(directory, command).await
    }

    /// Callback form of [`preset`](Self::preset); see
    /// [`run_with_callback`](Self::run_with_callback).
    pub fn preset_with_callback<F>(
        &self,
        preset: Preset,
        directory: impl AsRef<Path>,
        command: Option<&str>,
        handler: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(crate::Result<String>) + Send + 'static,
    {
        let command = command.unwrap_or_else(|| self.config.command_for(preset));
        self.run_with_callback(directory, command, handler)
    }

    pub fn hash(&self, directory: impl AsRef<Path>, command: Option<&str>) -> crate::Result<String> {
        self.preset(Preset::Hash, directory, command)
    }

    pub fn version(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset(Preset::Version, directory, command)
    }

    pub fn branch(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset(Preset::Branch, directory, command)
    }

    pub fn last_commit_on(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset(Preset::LastCommitOn, directory, command)
    }

    pub fn last_commit_by(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset(Preset::LastCommitBy, directory, command)
    }

    pub async fn hash_async(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset_async(Preset::Hash, directory, command).await
    }

    pub async fn version_async(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset_async(Preset::Version, directory, command).await
    }

    pub async fn branch_async(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset_async(Preset::Branch, directory, command).await
    }

    pub async fn last_commit_on_async(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset_async(Preset::LastCommitOn, directory, command)
            .await
    }

    pub async fn last_commit_by_async(
        &self,
        directory: impl AsRef<Path>,
        command: Option<&str>,
    ) -> crate::Result<String> {
        self.preset_async(Preset::LastCommitBy, directory, command)
            .await
    }

    /// All five presets with their default templates, run concurrently.
    pub async fn stamp(&self, directory: impl AsRef<Path>) -> crate::Result<Stamp> {
        let directory = directory.as_ref();
        let (hash, version, branch, last_commit_on, last_commit_by) = tokio::try_join!(
            self.hash_async(directory, None),
            self.version_async(directory, None),
            self.branch_async(directory, None),
            self.last_commit_on_async(directory, None),
            self.last_commit_by_async(directory, None)
        )?;
        Ok(Stamp {
            hash,
            version,
            branch,
            last_commit_on,
            last_commit_by,
        })
    }
}
