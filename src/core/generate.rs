//! Filepath: src/core/generate.rs
//! `generate`: routes directory → manifest file.
//!
//! Modes:
//! - default: write the manifest, skipping the write when nothing changed
//! - `--stdout`: print instead of writing
//! - `--check`: compare with the file on disk and fail when it is stale
//! - `--watch`: regenerate on every change under the routes directory

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use owo_colors::OwoColorize;
use tracing::{info, instrument, warn};

use super::manifest::Manifest;
use super::routes::process_routes;
use crate::cli::{AppContext, GenerateArgs};
use crate::infra::config::{Config, load_config};
use crate::infra::io::{CheckOutcome, WriteOutcome, check_up_to_date, write_if_changed};

/// Quiet period that folds a burst of file events into one regeneration.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// `--check` failures; these map to a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum CheckError
{
    #[error("{} is out of date; run gen-docs-routes to regenerate it", .0.display())]
    Stale(PathBuf),

    #[error("{} does not exist; run gen-docs-routes to generate it", .0.display())]
    Missing(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode
{
    Write,
    Stdout,
    Check,
}

impl Mode
{
    fn from_args(args: &GenerateArgs) -> Self
    {
        if args.stdout
        {
            Mode::Stdout
        }
        else if args.check
        {
            Mode::Check
        }
        else
        {
            Mode::Write
        }
    }
}

/// Render the manifest for `config` without writing anything.
#[instrument(skip(config), fields(routes_dir = %config.routes_dir.display()))]
pub fn generate_manifest(config: &Config) -> Result<String>
{
    let walker = config.walker()?;
    let routes = process_routes(&config.routes_dir, &walker).with_context(|| {
        format!("Failed to discover routes in {}", config.routes_dir.display())
    })?;

    let manifest = Manifest::from_route_set(&routes);
    let text = manifest
        .render(config.target)
        .context("Failed to render route manifest")?;

    Ok(text)
}

pub fn run(
    args: GenerateArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    run_with_config(config, args, ctx)
}

/// `generate` against an already loaded configuration.
pub fn run_with_config(
    config: Config,
    args: GenerateArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let mut config = config.with_overrides(args.routes_dir.clone(), &args.extensions, &args.ignore);
    if let Some(output) = &args.output
    {
        config.output = output.clone();
    }
    if let Some(target) = args.target
    {
        config.target = target;
    }

    let mode = Mode::from_args(&args);

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            print_plan(&config, mode);
        }
        return Ok(());
    }

    generate_once(&config, mode, ctx)?;

    if args.watch
    {
        watch(&config, ctx)?;
    }

    Ok(())
}

fn print_plan(
    config: &Config,
    mode: Mode,
)
{
    let routes_dir =
        dunce::canonicalize(&config.routes_dir).unwrap_or_else(|_| config.routes_dir.clone());

    println!("{}", "DRY RUN: Would generate:".yellow());
    println!("  Routes dir: {}", routes_dir.display());
    println!("  Extensions: {:?}", config.extensions);
    println!("  Ignore patterns: {:?}", config.ignore_patterns);
    println!("  Target: {:?}", config.target);
    match mode
    {
        Mode::Write => println!("  Output: {}", config.output.display()),
        Mode::Stdout => println!("  Output: <stdout>"),
        Mode::Check => println!("  Check against: {}", config.output.display()),
    }
}

fn generate_once(
    config: &Config,
    mode: Mode,
    ctx: &AppContext,
) -> Result<()>
{
    let text = generate_manifest(config)?;
    let output = config.output.as_path();

    match mode
    {
        Mode::Stdout =>
        {
            print!("{text}");
        }
        Mode::Check => match check_up_to_date(output, &text)?
        {
            CheckOutcome::UpToDate =>
            {
                if !ctx.quiet
                {
                    println!("{} {} is up to date", mark(ctx, true), output.display());
                }
            }
            CheckOutcome::Missing =>
            {
                return Err(CheckError::Missing(output.to_path_buf()).into());
            }
            CheckOutcome::Stale { diff } =>
            {
                if !ctx.quiet
                {
                    print!("{diff}");
                }
                return Err(CheckError::Stale(output.to_path_buf()).into());
            }
        },
        Mode::Write =>
        {
            let outcome = write_if_changed(output, &text)?;
            info!(output = %output.display(), ?outcome, "manifest");
            if !ctx.quiet
            {
                report_write(ctx, output, outcome);
            }
        }
    }

    Ok(())
}

fn report_write(
    ctx: &AppContext,
    output: &Path,
    outcome: WriteOutcome,
)
{
    match outcome
    {
        WriteOutcome::Written => println!("{} Wrote {}", mark(ctx, true), output.display()),
        WriteOutcome::Unchanged => println!("{} {} unchanged", mark(ctx, true), output.display()),
    }
}

fn mark(
    ctx: &AppContext,
    ok: bool,
) -> String
{
    match (ctx.no_color, ok)
    {
        (true, true) => "✓".to_string(),
        (true, false) => "✗".to_string(),
        (false, true) => "✓".green().to_string(),
        (false, false) => "✗".red().to_string(),
    }
}

/// Block forever, regenerating after each relevant burst of events.
fn watch(
    config: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to start file watcher")?;
    watcher
        .watch(&config.routes_dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", config.routes_dir.display()))?;

    if !ctx.quiet
    {
        let shown =
            dunce::canonicalize(&config.routes_dir).unwrap_or_else(|_| config.routes_dir.clone());
        println!("Watching {} for changes", shown.display());
    }

    while let Ok(res) = rx.recv()
    {
        match res
        {
            Ok(event) if is_relevant(&event, &config.extensions) =>
            {
                while rx
                    .recv_timeout(DEBOUNCE)
                    .is_ok()
                {}

                if let Err(e) = generate_once(config, Mode::Write, ctx)
                {
                    warn!(error = ?e, "regeneration failed");
                    if !ctx.quiet
                    {
                        eprintln!("{} {e:#}", mark(ctx, false));
                    }
                }
            }
            Ok(_) =>
            {}
            Err(e) => warn!(error = %e, "watch error"),
        }
    }

    Ok(())
}

/// Route-file changes, plus removals and renames (a renamed or deleted
/// directory carries no page extension).
fn is_relevant(
    event: &Event,
    extensions: &[String],
) -> bool
{
    match event.kind
    {
        EventKind::Access(_) => false,
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_)) => true,
        _ => event
            .paths
            .iter()
            .any(|p| has_page_extension(p, extensions)),
    }
}

fn has_page_extension(
    path: &Path,
    extensions: &[String],
) -> bool
{
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|want| want.trim_start_matches('.') == ext)
        })
}
