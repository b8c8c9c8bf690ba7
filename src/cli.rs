use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::manifest::Target;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "gen-docs-routes")]
#[command(about = "Generate typed route manifests from a file-based routes directory")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Defaults to `generate` with configured settings
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn context(&self) -> AppContext {
        AppContext {
            quiet: self.quiet,
            no_color: self.no_color,
            dry_run: self.dry_run,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the route manifest
    Generate(GenerateArgs),

    /// List every route file with its path and pattern
    List(ListArgs),

    /// Initialize a gen-docs-routes.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Default, Parser)]
pub struct GenerateArgs {
    /// Routes directory (overrides config)
    #[arg(short, long)]
    pub routes_dir: Option<PathBuf>,

    /// Output file (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output language (overrides config)
    #[arg(short, long, value_enum)]
    pub target: Option<Target>,

    /// Page file extension; repeat for several (overrides config)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,

    /// Additional glob patterns to ignore
    #[arg(short, long)]
    pub ignore: Vec<String>,

    /// Print the manifest to stdout instead of writing it
    #[arg(long, conflicts_with_all = ["check", "watch"])]
    pub stdout: bool,

    /// Fail if the output file is missing or out of date
    #[arg(long, conflicts_with = "watch")]
    pub check: bool,

    /// Regenerate whenever the routes directory changes
    #[arg(short, long)]
    pub watch: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Routes directory (overrides config)
    #[arg(short, long)]
    pub routes_dir: Option<PathBuf>,

    /// Page file extension; repeat for several (overrides config)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,

    /// Additional glob patterns to ignore
    #[arg(short, long)]
    pub ignore: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,

    /// Shorthand for --format json
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long, conflicts_with = "stdout")]
    pub out_dir: Option<PathBuf>,

    /// Print the script to stdout (the default without --out-dir)
    #[arg(long)]
    pub stdout: bool,
}
