mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tint::OsProbe;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = commands::load_config(&args)?;
    let output = match args.command {
        Command::Script { tag, nonce } => commands::script(&config, tag, nonce)?,
        Command::List => commands::list(&config.default_theme),
        Command::Show { json } => {
            let provider = commands::open_provider(config, &args.store, OsProbe);
            commands::show(&provider, &args.store, json)?
        }
        Command::Set { accent, mode } => {
            let provider = commands::open_provider(config, &args.store, OsProbe);
            commands::set(&provider, &args.store, accent, mode)?
        }
        Command::Resolve { mode } => {
            let provider = commands::open_provider(config, &args.store, OsProbe);
            let mode = mode.unwrap_or_else(|| provider.theme().mode);
            commands::resolve_mode(mode, &OsProbe)
        }
    };

    println!("{output}");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` flags pick the level.
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
