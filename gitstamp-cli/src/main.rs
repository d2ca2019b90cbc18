//! gitstamp CLI - print commit, version and branch info for a git working tree

mod logging;

use clap::{Parser, Subcommand};
use gitstamp_core::{CommandRunner, Config, GitStampError, Preset};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".gitstamp.toml";

#[derive(Parser)]
#[command(name = "gitstamp")]
#[command(about = "Print commit, version and branch info from git", long_about = None)]
struct Cli {
    /// Working tree to query (default: nearest ancestor containing .git)
    #[arg(long, global = true, env = "GITSTAMP_DIR")]
    dir: Option<PathBuf>,

    /// Config file (default: <dir>/.gitstamp.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current commit hash
    Hash {
        /// Override the git command template
        #[arg(long)]
        command: Option<String>,
    },

    /// Tag-based version with dirty suffix
    Version {
        /// Override the git command template
        #[arg(long)]
        command: Option<String>,
    },

    /// Current branch name
    Branch {
        /// Override the git command template
        #[arg(long)]
        command: Option<String>,
    },

    /// Date of the last commit
    LastCommitOn {
        /// Override the git command template
        #[arg(long)]
        command: Option<String>,
    },

    /// Author of the last commit
    LastCommitBy {
        /// Override the git command template
        #[arg(long)]
        command: Option<String>,
    },

    /// Run an arbitrary git command template (e.g. `raw log -1 --format=%s`)
    Raw {
        /// Template tokens, joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        template: Vec<String>,
    },

    /// All presets at once
    All,
}

impl Commands {
    fn preset(&self) -> Option<(Preset, Option<&str>)> {
        match self {
            Commands::Hash { command } => Some((Preset::Hash, command.as_deref())),
            Commands::Version { command } => Some((Preset::Version, command.as_deref())),
            Commands::Branch { command } => Some((Preset::Branch, command.as_deref())),
            Commands::LastCommitOn { command } => {
                Some((Preset::LastCommitOn, command.as_deref()))
            }
            Commands::LastCommitBy { command } => {
                Some((Preset::LastCommitBy, command.as_deref()))
            }
            Commands::Raw { .. } | Commands::All => None,
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        if cli.json {
            eprintln!("{}", to_json(&error_json(&e)));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Error envelope printed to stderr under `--json`
fn error_json(e: &GitStampError) -> serde_json::Value {
    match e {
        GitStampError::CommandFailed { code, stderr, .. } => serde_json::json!({
            "code": "command_failed",
            "message": e.to_string(),
            "exit_code": code,
            "stderr": stderr,
        }),
        GitStampError::InvalidArgument(msg) => {
            serde_json::json!({ "code": "invalid_argument", "message": msg })
        }
        _ => serde_json::json!({ "code": "error", "message": e.to_string() }),
    }
}

async fn run(cli: &Cli) -> gitstamp_core::Result<()> {
    let dir = detect_repo_root(cli.dir.clone())?;
    let config = load_config(cli.config.as_deref(), &dir)?;
    let runner = CommandRunner::from_config(config);
    tracing::debug!(dir = %dir.display(), "Resolved working tree");

    match &cli.command {
        Commands::All => {
            let stamp = runner.stamp(&dir).await?;
            if cli.json {
                println!("{}", to_json(&stamp));
            } else {
                print_stamp(&stamp);
            }
        }
        Commands::Raw { template } => {
            let output = runner.run_async(&dir, &template.join(" ")).await?;
            print_value("output", &output, cli.json);
        }
        command => {
            if let Some((preset, template)) = command.preset() {
                let output = runner.preset_async(preset, &dir, template).await?;
                print_value(preset.name(), &output, cli.json);
            }
        }
    }
    Ok(())
}

fn value_json(name: &str, value: &str) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    object.insert(name.to_string(), value.into());
    serde_json::Value::Object(object)
}

fn print_value(name: &str, value: &str, json: bool) {
    if json {
        println!("{}", to_json(&value_json(name, value)));
    } else {
        println!("{}", value);
    }
}

fn print_stamp(stamp: &gitstamp_core::Stamp) {
    use colored::Colorize;

    for preset in Preset::ALL {
        println!("{}: {}", preset.name().cyan(), stamp.get(preset));
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn load_config(explicit: Option<&Path>, dir: &Path) -> gitstamp_core::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "Loading config");
        return Config::load(&candidate);
    }
    Ok(Config::default())
}

fn detect_repo_root(override_path: Option<PathBuf>) -> gitstamp_core::Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }

    // Walk up from current directory looking for .git
    let mut current = std::env::current_dir()?;
    loop {
        if current.join(".git").exists() {
            return Ok(current);
        }
        if !current.pop() {
            // No parent, use current directory and let git report the error
            return Ok(std::env::current_dir()?);
        }
    }
}
