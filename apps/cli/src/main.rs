//! wikisync CLI: incremental mirror of a rules wiki.
//!
//! Scans the configured topic indexes and fetches only entries missing
//! from the local knowledge base.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
