//! trackdown - acquire audio for a list of tracks.
//!
//! Exports a playlist from a remote catalog into a plain-text track list,
//! then resolves each entry against an external media search and fetches
//! the audio under bounded concurrency, with per-track outcome logging.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod model;
pub mod outcome_log;
pub mod pipeline;
pub mod resolver;
pub mod storage;
pub mod tracklist;
pub mod ytdlp;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("trackdown=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
