//! Wire types for the catalog playlist API.
//!
//! These mirror the JSON the API actually returns; the adapter converts
//! them into our domain types so the rest of the crate never sees them.

use serde::Deserialize;

/// One page of a playlist's tracks.
#[derive(Debug, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    /// Absolute URL of the next page, absent on the last page.
    pub next: Option<String>,
}

/// A playlist entry. `track` can be null for removed/local entries.
#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: String,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
