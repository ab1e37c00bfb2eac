//! Playlist export command.

use std::path::Path;

use tokio::runtime::Runtime;

use crate::catalog::{CatalogClient, CatalogError};
use crate::{config, tracklist};

/// Export a playlist from the remote catalog into a track list file.
pub fn cmd_export(
    rt: &Runtime,
    playlist: Option<&str>,
    token: Option<&str>,
    output: Option<&Path>,
    save_credentials: bool,
) -> anyhow::Result<()> {
    let mut cfg = config::load();

    // Configuration faults: both identifiers are required before any work
    let Some(token) = token
        .map(str::to_string)
        .or_else(|| cfg.credentials.catalog_api_token.clone())
    else {
        eprintln!("Error: catalog API token required.");
        eprintln!("Use --token, set CATALOG_API_TOKEN, or add it to the config file.");
        std::process::exit(1);
    };
    let Some(playlist) = playlist
        .map(str::to_string)
        .or_else(|| cfg.credentials.playlist_id.clone())
    else {
        eprintln!("Error: playlist id required.");
        eprintln!("Use --playlist, set PLAYLIST_ID, or add it to the config file.");
        std::process::exit(1);
    };
    let output = output.unwrap_or(&cfg.fetch.track_list);

    println!("Exporting playlist {playlist}...");

    let client = CatalogClient::new(&token);
    let tracks = match rt.block_on(client.playlist_tracks(&playlist)) {
        Ok(tracks) => tracks,
        Err(e @ (CatalogError::Unauthorized | CatalogError::PlaylistNotFound)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    tracklist::write(output, &tracks)?;
    println!("Exported {} track(s) to {}", tracks.len(), output.display());

    if save_credentials {
        cfg.credentials.catalog_api_token = Some(token);
        cfg.credentials.playlist_id = Some(playlist);
        if let Err(e) = config::save(&cfg) {
            eprintln!("Warning: could not save credentials: {e}");
        }
    }
    Ok(())
}
