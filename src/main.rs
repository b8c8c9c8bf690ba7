use anyhow::Result;
use clap::Parser;
use gen_docs_routes::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Build a context once, pass everywhere
    let ctx = cli.context();

    match cli.command {
        None => gen_docs_routes::generate_run(Default::default(), &ctx),
        Some(Commands::Generate(args)) => gen_docs_routes::generate_run(args, &ctx),
        Some(Commands::List(args)) => gen_docs_routes::list_run(args, &ctx),
        Some(Commands::Init(args)) => gen_docs_routes::infra::config::init(args, &ctx),
        Some(Commands::Completions(args)) => gen_docs_routes::completion::run(args, &ctx),
    }
}

/// Logs go to stderr so `generate --stdout` stays clean. `RUST_LOG` wins
/// over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
