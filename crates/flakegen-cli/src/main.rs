mod cli;

use std::io;

use clap::Parser;
use cli::command::run;
use cli::config::{CliArgs, CliConfig};
use cli::telemetry::init_telemetry;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry(config.log_format)?;
    tracing::debug!(?config, "starting flakegen");

    let stdout = io::stdout();
    run(&config, &mut stdout.lock())
}
