//! Track resolution against the external media search.
//!
//! The resolver is a pure function of (title, artist): it composes a
//! search query and asks the search capability for a single best match.
//! Every failure mode of the external call - non-zero exit, malformed
//! response, zero results - is a normal "no candidate" outcome here, never
//! an error. There are no retries; the caller classifies the result.

use std::sync::Arc;

use crate::model::{Candidate, TrackRequest};
use crate::pipeline::traits::SearchApi;

/// Compose the search query for a track: trimmed title and artist,
/// space-joined; an empty artist yields a title-only query.
pub fn compose_query(track: &TrackRequest) -> String {
    let title = track.title.trim();
    let artist = track.artist.trim();
    if artist.is_empty() {
        title.to_string()
    } else {
        format!("{title} {artist}")
    }
}

/// Resolves track requests to candidates via an injected search client.
pub struct Resolver {
    search: Arc<dyn SearchApi>,
}

impl Resolver {
    pub fn new(search: Arc<dyn SearchApi>) -> Self {
        Self { search }
    }

    /// Resolve a track to at most one candidate.
    pub async fn resolve(&self, track: &TrackRequest) -> Option<Candidate> {
        let query = compose_query(track);
        match self.search.search_single(&query).await {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::debug!(track = %track.label(), error = %e, "search failed");
                None
            }
        }
    }
}
