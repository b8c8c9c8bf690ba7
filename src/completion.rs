//! `completions`: shell completion scripts for the `gen-docs-routes` binary.

use std::{fs, io::Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use tracing::info;

use crate::cli::{AppContext, Cli, CompletionsArgs};

const BIN_NAME: &str = "gen-docs-routes";

/// Completion script for `shell`, as text.
pub fn render(shell: Shell) -> Result<String> {
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8(buf).context("completion script is not UTF-8")
}

pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    let Some(dir) = args.out_dir.filter(|_| !args.stdout) else {
        let script = render(args.shell)?;
        std::io::stdout()
            .write_all(script.as_bytes())
            .context("Failed to write completion script")?;
        return Ok(());
    };

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = clap_complete::generate_to(args.shell, &mut Cli::command(), BIN_NAME, &dir)
        .with_context(|| format!("Failed to write {} completions", args.shell))?;
    info!(path = %path.display(), shell = %args.shell, "completion script");

    if !ctx.quiet {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}
