//! ctxsync - File change detection for AI agent sessions
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use ctxsync::cli::{commands, Cli, Commands};
use ctxsync::config::{Config, ConfigManager};
use ctxsync::error::{CtxsyncError, CtxsyncResult};
use ctxsync::hook::HookInput;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize logging on stderr: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("ctxsync=warn"),
        1 => EnvFilter::new("ctxsync=info"),
        _ => EnvFilter::new("ctxsync=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> CtxsyncResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Hooks read their payload first so config is found from the project root
    if cli.command.is_hook() {
        return run_hook(cli, &config_manager).await;
    }

    let cwd = if cli.no_local {
        None
    } else {
        Some(
            std::env::current_dir()
                .map_err(|e| CtxsyncError::io("getting current directory", e))?,
        )
    };
    let local_config_path = local_config(cli.no_local, cwd.as_deref());

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    init_logging(cli.verbose, &config);
    if let Some(ref path) = local_config_path {
        debug!("Using local config: {}", path.display());
    }

    match cli.command {
        Commands::Cache(args) => commands::cache(args).await,
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
        Commands::Hooks => commands::hooks(&config).await,
        hook => unreachable!("{:?} handled by run_hook", hook),
    }
}

/// Nearest `.ctxsync.toml` above `start`, unless discovery is disabled
fn local_config(no_local: bool, start: Option<&Path>) -> Option<PathBuf> {
    if no_local {
        return None;
    }
    start.and_then(ConfigManager::find_local_config)
}

/// Run a hook subcommand
///
/// Hooks never fail on bad input: an unusable payload is a silent skip and
/// a broken config falls back to defaults with a warning.
async fn run_hook(cli: Cli, manager: &ConfigManager) -> CtxsyncResult<()> {
    let payload = HookInput::read_stdin().await;

    // Lifecycle reads no settings
    let (config, config_error) = if matches!(cli.command, Commands::Lifecycle) {
        (Config::default(), None)
    } else {
        let root = payload
            .as_ref()
            .ok()
            .and_then(|input| input.project_root().ok());
        let start = root.or_else(|| std::env::current_dir().ok());
        let local_config_path = local_config(cli.no_local, start.as_deref());

        match manager.load_merged(local_config_path.as_deref()).await {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    };

    init_logging(cli.verbose, &config);
    if let Some(e) = config_error {
        warn!("Ignoring configuration, using defaults: {}", e);
    }

    let input = match payload {
        Ok(input) => input,
        Err(reason) => {
            debug!("Hook skipped: {}", reason);
            return Ok(());
        }
    };

    match cli.command {
        Commands::Record => commands::record(&input, &config).await,
        Commands::Detect => commands::detect(&input, &config).await,
        Commands::Lifecycle => commands::lifecycle(&input).await,
        Commands::Lint => commands::lint(&input, &config).await,
        other => unreachable!("{:?} is not a hook", other),
    }
}
