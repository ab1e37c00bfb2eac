//! Track list file parsing and writing.
//!
//! The track list is a plain UTF-8 text file with one track per line:
//!
//! ```text
//! Bohemian Rhapsody - Queen
//! Clair de Lune
//! ```
//!
//! The first ` - ` splits title from artist; a line without the separator
//! is a title-only entry. Blank lines are skipped, and so are lines whose
//! title comes out empty - those are never submitted to the pipeline.

use std::path::{Path, PathBuf};

use crate::model::TrackRequest;

/// Errors reading or writing a track list file.
#[derive(Debug, thiserror::Error)]
pub enum TrackListError {
    #[error("track list not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read track list {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write track list {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse a single track list line.
///
/// Returns `None` for blank lines and for lines without a recoverable title.
pub fn parse_line(line: &str) -> Option<TrackRequest> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (title, artist) = match line.split_once(" - ") {
        Some((title, artist)) => (title.trim(), artist.trim()),
        None => (line, ""),
    };

    if title.is_empty() {
        return None;
    }

    Some(TrackRequest::new(title, artist))
}

/// Load all schedulable tracks from a list file, preserving order.
pub fn load(path: &Path) -> Result<Vec<TrackRequest>, TrackListError> {
    if !path.exists() {
        return Err(TrackListError::NotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| TrackListError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tracks = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        match parse_line(line) {
            Some(track) => tracks.push(track),
            None => {
                if !line.trim().is_empty() {
                    tracing::warn!(line = number + 1, "skipping entry without a title");
                }
            }
        }
    }
    Ok(tracks)
}

/// Write tracks to a list file, one `Title - Artist` line per track.
pub fn write(path: &Path, tracks: &[TrackRequest]) -> Result<(), TrackListError> {
    let mut contents = String::new();
    for track in tracks {
        contents.push_str(&track.label());
        contents.push('\n');
    }
    std::fs::write(path, contents).map_err(|source| TrackListError::Write {
        path: path.to_path_buf(),
        source,
    })
}
