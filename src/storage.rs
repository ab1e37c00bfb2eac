//! Local materialization of resolved candidates.
//!
//! The storage gate owns the last leg of a track's journey: it derives a
//! filesystem-safe target identity from the candidate, decides whether the
//! asset is already present (the idempotence guarantee for re-runs), and
//! otherwise drives the external fetch and classifies its result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::model::{Candidate, Outcome, TrackRequest};
use crate::pipeline::traits::FetchApi;
use crate::ytdlp::FetchError;

/// Longest sanitized title kept, to stay under filesystem path limits.
const MAX_TITLE_LEN: usize = 180;

/// Replace characters illegal in filenames with `_`, truncate, trim.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();
    replaced.chars().take(MAX_TITLE_LEN).collect::<String>().trim().to_string()
}

/// The target identity for a candidate: sanitized title qualified by the
/// remote id, so two tracks whose titles sanitize identically still get
/// distinct dedup keys and output paths.
pub fn target_stem(candidate: &Candidate) -> String {
    format!(
        "{} - {}",
        sanitize_title(&candidate.canonical_title),
        candidate.remote_id
    )
}

/// Decides whether to fetch a candidate and materializes it locally.
pub struct StorageGate {
    output_dir: PathBuf,
    fetch: Arc<dyn FetchApi>,
}

impl StorageGate {
    pub fn new(output_dir: impl Into<PathBuf>, fetch: Arc<dyn FetchApi>) -> Self {
        Self {
            output_dir: output_dir.into(),
            fetch,
        }
    }

    /// Fetch `candidate` for `track` unless its target identity already
    /// exists in the output directory.
    ///
    /// Writes exactly one audio file on success and zero files on
    /// skip/error.
    pub async fn acquire(&self, track: &TrackRequest, candidate: &Candidate) -> Outcome {
        let stem = target_stem(candidate);

        // A completed download or an in-progress partial both count as
        // "exists": re-runs must not re-fetch either.
        if let Some(existing) = find_existing(&self.output_dir, &stem) {
            tracing::debug!(track = %track.label(), path = ?existing, "asset already present");
            return Outcome::Skipped {
                reason: "already exists".to_string(),
            };
        }

        let template = self.output_dir.join(format!("{stem}.%(ext)s"));
        match self
            .fetch
            .fetch(&candidate.url, &template.to_string_lossy())
            .await
        {
            Ok(()) => {
                let path = self.output_dir.join(format!("{stem}.mp3"));
                if path.exists() {
                    Outcome::Success { path }
                } else {
                    Outcome::Error {
                        message: "fetch reported success but produced no file".to_string(),
                    }
                }
            }
            Err(FetchError::Failed { diagnostic }) => Outcome::Error {
                message: diagnostic,
            },
            Err(e) => Outcome::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Look for any file named `{stem}.<ext>` in `dir`.
fn find_existing(dir: &Path, stem: &str) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = ?dir, error = %e, "could not scan output directory");
            return None;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.len() > stem.len() && name.starts_with(stem) && name[stem.len()..].starts_with('.')
        {
            return Some(entry.path());
        }
    }
    None
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Generate valid filename characters (excluding path separators and invalid chars)
    fn valid_filename_char() -> impl Strategy<Value = char> {
        prop::char::range('!', '~').prop_filter("no invalid chars", |c| {
            !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        })
    }

    /// Generate a valid, already-sane title string
    fn valid_title() -> impl Strategy<Value = String> {
        prop::collection::vec(valid_filename_char(), 1..50)
            .prop_map(|chars| chars.into_iter().collect())
    }

    /// Generate an arbitrary string that might contain invalid characters
    fn arbitrary_title() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 /:*?\"<>|_-]{1,300}")
            .unwrap()
            .prop_filter("non-empty", |s| !s.is_empty())
    }

    proptest! {
        /// Sanitized titles should never contain path separators
        #[test]
        fn sanitize_removes_path_separators(input in arbitrary_title()) {
            let sanitized = sanitize_title(&input);
            prop_assert!(!sanitized.contains('/'), "Found / in: {}", sanitized);
            prop_assert!(!sanitized.contains('\\'), "Found \\ in: {}", sanitized);
        }

        /// Sanitized titles should never contain Windows-invalid characters
        #[test]
        fn sanitize_removes_invalid_chars(input in arbitrary_title()) {
            let sanitized = sanitize_title(&input);
            for c in [':', '*', '?', '"', '<', '>', '|'] {
                prop_assert!(!sanitized.contains(c), "Found {} in: {}", c, sanitized);
            }
        }

        /// Sanitized titles never exceed the length bound
        #[test]
        fn sanitize_bounds_length(input in arbitrary_title()) {
            prop_assert!(sanitize_title(&input).chars().count() <= MAX_TITLE_LEN);
        }

        /// Valid titles should pass through unchanged
        #[test]
        fn sanitize_preserves_valid_titles(input in valid_title()) {
            let sanitized = sanitize_title(&input);
            prop_assert_eq!(input, sanitized);
        }

        /// The target stem always ends with the remote id, whatever the title
        #[test]
        fn target_stem_keeps_remote_id(title in arbitrary_title()) {
            let cand = Candidate {
                remote_id: "vid01".to_string(),
                canonical_title: title,
                uploader: String::new(),
                url: "https://example.com".to_string(),
            };
            prop_assert!(target_stem(&cand).ends_with(" - vid01"));
        }
    }
}
