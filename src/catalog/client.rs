//! Catalog HTTP client.
//!
//! Fetches a playlist's tracks page by page, following the `next` URL the
//! API hands back until the playlist is exhausted.

use crate::model::TrackRequest;

use super::{CatalogError, adapter, dto};

/// Playlist catalog API client.
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

const USER_AGENT: &str = concat!(
    "trackdown/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/trackdown)"
);

impl CatalogClient {
    /// Create a new client using a pre-obtained bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://api.spotify.com/v1".to_string(),
            token: token.into(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch every track of a playlist, in playlist order.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<TrackRequest>, CatalogError> {
        let mut url = format!(
            "{}/playlists/{}/tracks",
            self.base_url,
            urlencoding::encode(playlist_id)
        );

        let mut tracks = Vec::new();
        loop {
            let page = self.fetch_page(&url).await?;
            tracks.extend(adapter::to_track_requests(page.items));
            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(tracks)
    }

    /// Send one page request and parse the response.
    async fn fetch_page(&self, url: &str) -> Result<dto::PlaylistTracksPage, CatalogError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::PlaylistNotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(CatalogError::Api(error.error.message));
            }
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::PlaylistTracksPage>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
