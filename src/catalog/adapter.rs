//! Conversion from catalog wire types to domain types.

use crate::model::TrackRequest;

use super::dto;

/// Convert one page of playlist items into track requests.
///
/// Entries without a usable track name are dropped - they could never be
/// scheduled. Multiple artists are joined with `", "`.
pub fn to_track_requests(items: Vec<dto::PlaylistItem>) -> Vec<TrackRequest> {
    items
        .into_iter()
        .filter_map(|item| item.track)
        .filter(|track| !track.name.trim().is_empty())
        .map(|track| {
            let artists = track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            TrackRequest::new(track.name.trim(), artists)
        })
        .collect()
}
