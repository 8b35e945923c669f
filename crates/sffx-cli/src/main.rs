//! sffx - command-line utility for listing, verifying and extracting SFF
//! archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose)?;

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, cli.quiet || cli.json)
        }
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Verify(args) => commands::verify::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

/// Installs a stderr subscriber when `--verbose` or `RUST_LOG` asks for logs.
fn init_tracing(verbose: bool) -> Result<()> {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let mut filter = EnvFilter::from_default_env();
    if verbose {
        filter = filter
            .add_directive("sffx_core=debug".parse()?)
            .add_directive("sffx=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
