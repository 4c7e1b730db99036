//! Cache command - inspect or reset a project's file cache

use super::project_root;
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::error::CtxsyncResult;
use crate::hook::{detector, Outcome};
use crate::store::paths::display_relative;
use crate::store::{cache_dir, CacheStore};
use chrono::{DateTime, Local};
use console::style;
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs) -> CtxsyncResult<()> {
    match args.action {
        CacheAction::List { project, format } => list_entries(&project_root(project)?, format).await,
        CacheAction::Check { project } => check_drift(&project_root(project)?).await,
        CacheAction::Clear { project } => clear_cache(&project_root(project)?).await,
    }
}

/// List recorded files
async fn list_entries(root: &Path, format: OutputFormat) -> CtxsyncResult<()> {
    let store = CacheStore::load(root).await;

    match format {
        OutputFormat::Table => print_table(root, &store),
        OutputFormat::Json => print_json(&store)?,
        OutputFormat::Plain => print_plain(&store),
    }

    Ok(())
}

fn print_table(root: &Path, store: &CacheStore) {
    if store.is_empty() {
        println!("No files recorded for {}", root.display());
        return;
    }

    println!("{:<50} {:<14} {:<20}", "FILE", "HASH", "MODIFIED");
    println!("{}", "-".repeat(84));

    for (path, record) in store.iter() {
        let hash: String = record.fingerprint.chars().take(12).collect();
        println!(
            "{:<50} {:<14} {:<20}",
            display_relative(path, root),
            style(hash).dim(),
            format_mtime(record.mtime)
        );
    }

    println!();
    println!("Total: {} file(s)", store.len());
}

fn print_json(store: &CacheStore) -> CtxsyncResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson<'a> {
        path: &'a Path,
        hash: &'a str,
        mtime: f64,
    }

    let entries: Vec<EntryJson<'_>> = store
        .iter()
        .map(|(path, record)| EntryJson {
            path,
            hash: &record.fingerprint,
            mtime: record.mtime,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn print_plain(store: &CacheStore) {
    for (path, _) in store.iter() {
        println!("{}", path.display());
    }
}

/// Render an epoch mtime in local time
fn format_mtime(mtime: f64) -> String {
    let secs = mtime.floor();
    let nanos = ((mtime - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Run a drift pass and print the report
async fn check_drift(root: &Path) -> CtxsyncResult<()> {
    match detector::detect(root).await? {
        Outcome::Applied(report) if report.is_empty() => {
            println!("{} No external changes", style("✓").green());
        }
        Outcome::Applied(report) => println!("{}", report.render(root)),
        Outcome::Skipped(_) => println!("No files recorded for {}", root.display()),
    }
    Ok(())
}

/// Delete the cache directory
async fn clear_cache(root: &Path) -> CtxsyncResult<()> {
    let dir = cache_dir(root);
    if CacheStore::clear(root).await? {
        println!("{} Cleared {}", style("✓").green(), dir.display());
    } else {
        println!("No cache at {}", dir.display());
    }
    Ok(())
}
