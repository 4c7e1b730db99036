//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ctxsync - Detect external file changes during AI agent sessions
///
/// Hook subcommands read one JSON payload from stdin and stay silent
/// unless they have something to report.
#[derive(Parser, Debug)]
#[command(name = "ctxsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CTXSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .ctxsync.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hook: record a file the agent read or wrote (PostToolUse)
    Record,

    /// Hook: report files changed since they were recorded (UserPromptSubmit)
    Detect,

    /// Hook: clear or keep the cache at session boundaries (SessionStart, SessionEnd)
    Lifecycle,

    /// Hook: lint an edited file (PostToolUse)
    Lint,

    /// Inspect or reset a project's file cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Print the hook configuration block for the orchestrator
    Hooks,
}

impl Commands {
    /// Whether this subcommand is an orchestrator hook reading stdin
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Record | Self::Detect | Self::Lifecycle | Self::Lint)
    }
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for cache list
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List recorded files
    List {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Run a drift check and print the result
    Check {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Delete the cache directory
    Clear {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },
}
