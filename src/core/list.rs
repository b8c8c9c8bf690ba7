//! Filepath: src/core/list.rs
//! `list`: show what each route file contributes, as a table or JSON.

use std::path::Path;

use anyhow::{Context, Result};
use tabled::{Table, Tabled};

use super::manifest::Manifest;
use super::routes::{RouteEntry, collect_route_entries, route_set_from_filenames};
use crate::cli::{AppContext, ListArgs, ListFormat};
use crate::infra::config::{Config, load_config};

#[derive(Tabled)]
struct RouteRow
{
    file: String,
    path: String,
    pattern: String,
}

impl RouteRow
{
    fn new(
        root: &Path,
        entry: &RouteEntry,
    ) -> Self
    {
        let file = entry
            .file
            .strip_prefix(root)
            .unwrap_or(&entry.file);

        Self {
            file: file.display().to_string(),
            path: entry.path.clone(),
            pattern: entry.pattern.clone(),
        }
    }
}

/// The listing is the command's output, so `--quiet` does not suppress it.
pub fn run(
    args: ListArgs,
    _ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    let out = render(config, &args)?;
    println!("{out}");
    Ok(())
}

fn effective_format(args: &ListArgs) -> ListFormat
{
    if args.json { ListFormat::Json } else { args.format }
}

/// Render the listing for `config` with `args` applied.
pub fn render(
    config: Config,
    args: &ListArgs,
) -> Result<String>
{
    let config = config.with_overrides(args.routes_dir.clone(), &args.extensions, &args.ignore);
    let walker = config.walker()?;
    let entries = collect_route_entries(&config.routes_dir, &walker).with_context(|| {
        format!("Failed to discover routes in {}", config.routes_dir.display())
    })?;

    match effective_format(args)
    {
        ListFormat::Json =>
        {
            let files: Vec<&Path> = entries
                .iter()
                .map(|e| e.file.as_path())
                .collect();
            let manifest = Manifest::from_route_set(&route_set_from_filenames(files));

            let value = serde_json::json!({
                "routes_dir": config.routes_dir,
                "entries": entries,
                "manifest": manifest,
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
        ListFormat::Table =>
        {
            let rows: Vec<RouteRow> = entries
                .iter()
                .map(|e| RouteRow::new(&config.routes_dir, e))
                .collect();
            Ok(Table::new(rows).to_string())
        }
    }
}
