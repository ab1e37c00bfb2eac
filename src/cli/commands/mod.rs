//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `export`: Export a playlist from the remote catalog into a track list
//! - `fetch`: Run the acquisition pipeline over a track list
//! - `tools`: Check external tools and credentials

mod export;
mod fetch;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use export::cmd_export;
pub use fetch::cmd_fetch;
pub use tools::cmd_check_tools;

/// trackdown CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Download every track in a track list file
    Fetch {
        /// Track list file (default: tracks.txt, or config)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory to write audio files to (default: tracks, or config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory to write outcome logs to (default: logs, or config)
        #[arg(short, long)]
        logs: Option<PathBuf>,
        /// Unattended mode: never prompt, fetch every resolved track
        #[arg(long)]
        auto: bool,
        /// Skip the first N entries of the track list
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Worker budget in unattended mode (default: 5, or config)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Seconds between search queries, per worker (default: 1.0, or config)
        #[arg(long)]
        delay: Option<f64>,
    },
    /// Export a playlist from the remote catalog into a track list file
    Export {
        /// Playlist id (or set PLAYLIST_ID env var, or config)
        #[arg(short, long, env = "PLAYLIST_ID")]
        playlist: Option<String>,
        /// Catalog API bearer token (or set CATALOG_API_TOKEN env var, or config)
        #[arg(short, long, env = "CATALOG_API_TOKEN")]
        token: Option<String>,
        /// Track list file to write (default: tracks.txt, or config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Persist the playlist id and token to the config file
        #[arg(long)]
        save_credentials: bool,
    },
    /// Check that external tools and credentials are available
    CheckTools,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Fetch {
            input,
            output,
            logs,
            auto,
            start,
            workers,
            delay,
        } => cmd_fetch(
            &rt,
            input.as_deref(),
            output.as_deref(),
            logs.as_deref(),
            *auto,
            *start,
            *workers,
            *delay,
        ),
        Commands::Export {
            playlist,
            token,
            output,
            save_credentials,
        } => cmd_export(
            &rt,
            playlist.as_deref(),
            token.as_deref(),
            output.as_deref(),
            *save_credentials,
        ),
        Commands::CheckTools => cmd_check_tools(),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Print installation instructions for yt-dlp
pub(crate) fn print_ytdlp_install_instructions() {
    eprintln!("Error: yt-dlp not found.");
    eprintln!("Install yt-dlp:");
    eprintln!("  Windows: winget install yt-dlp");
    eprintln!("  macOS:   brew install yt-dlp");
    eprintln!("  Linux:   apt install yt-dlp (or pipx install yt-dlp)");
}
