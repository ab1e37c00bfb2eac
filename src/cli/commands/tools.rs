//! External tool and credential checks.

use crate::{config, ytdlp};

use super::print_ytdlp_install_instructions;

/// Check that external tools and credentials are available.
pub fn cmd_check_tools() -> anyhow::Result<()> {
    println!("Checking external tools...\n");

    if let Some(version) = ytdlp::get_ytdlp_version() {
        println!("✓ yt-dlp: {}", version);
    } else {
        println!("✗ yt-dlp: NOT FOUND");
        print_ytdlp_install_instructions();
    }

    println!();
    println!("Credentials:");
    let cfg = config::load();
    if std::env::var("CATALOG_API_TOKEN").is_ok() || cfg.credentials.catalog_api_token.is_some() {
        println!("✓ catalog API token: set");
    } else {
        println!("✗ catalog API token: not set");
        println!("  Use --token, CATALOG_API_TOKEN, or the config file");
    }
    if std::env::var("PLAYLIST_ID").is_ok() || cfg.credentials.playlist_id.is_some() {
        println!("✓ playlist id: set");
    } else {
        println!("✗ playlist id: not set");
    }

    if let Some(path) = config::config_path() {
        println!();
        if path.exists() {
            println!("Config: {}", path.display());
        } else {
            println!("Config: {} (not created yet)", path.display());
        }
    }

    Ok(())
}
