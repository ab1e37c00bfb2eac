//! Remote catalog client for playlist export.
//!
//! Reads the tracks of a playlist from the catalog's web API and converts
//! them into [`TrackRequest`](crate::model::TrackRequest)s for the track
//! list file. Authentication flows are out of scope: the client takes a
//! pre-obtained bearer token from configuration or the environment.

mod adapter;
mod client;
mod dto;

pub use client::CatalogClient;

/// Errors talking to the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse catalog response: {0}")]
    Parse(String),

    #[error("catalog API error: {0}")]
    Api(String),

    #[error("catalog rejected the API token")]
    Unauthorized,

    #[error("playlist not found")]
    PlaylistNotFound,

    #[error("rate limited by the catalog API - try again later")]
    RateLimited,
}
