//! Core domain types for the acquisition pipeline.
//!
//! These types are OUR types - they don't change when the external search
//! or fetch tooling changes. Everything coming back from yt-dlp or the
//! catalog API gets converted into these before the pipeline sees it.

use std::path::PathBuf;

/// A track the user wants acquired, as read from the track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRequest {
    /// Track title. Never empty for a schedulable track.
    pub title: String,
    /// Artist name. May be empty (title-only search).
    pub artist: String,
}

impl TrackRequest {
    /// Create a request from owned or borrowed strings.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Human-readable label, matching the track list line format.
    pub fn label(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

/// A resolved media match for a track request.
///
/// Ephemeral: owned solely by the worker task that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Remote media id. Embedded in the output filename to keep the
    /// target identity unique across title collisions.
    pub remote_id: String,
    /// Title as reported by the search result.
    pub canonical_title: String,
    /// Uploader/channel that owns the media.
    pub uploader: String,
    /// Locator passed to the fetch tool.
    pub url: String,
}

/// Terminal classification of one track's processing attempt.
///
/// Exactly one of these is produced per dispatched [`TrackRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Audio was fetched and written to `path`.
    Success { path: PathBuf },
    /// Nothing was fetched: the asset already exists, or the user declined.
    Skipped { reason: String },
    /// Resolution produced no candidate.
    NotFound { reason: String },
    /// The fetch failed, or an unexpected fault was downgraded.
    Error { message: String },
}

impl Outcome {
    /// The counter category this outcome belongs to.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success { .. } => OutcomeKind::Success,
            Outcome::Skipped { .. } => OutcomeKind::Skipped,
            Outcome::NotFound { .. } => OutcomeKind::NotFound,
            Outcome::Error { .. } => OutcomeKind::Error,
        }
    }
}

/// Outcome category, used for counters and log sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Skipped,
    NotFound,
    Error,
}

impl OutcomeKind {
    /// Convert to string representation for log file naming.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "downloaded",
            OutcomeKind::Skipped => "skipped",
            OutcomeKind::NotFound => "not_found",
            OutcomeKind::Error => "errors",
        }
    }

    /// Get symbol representation for per-track status lines.
    pub fn symbol(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "✓",
            OutcomeKind::Skipped => "~",
            OutcomeKind::NotFound => "?",
            OutcomeKind::Error => "✗",
        }
    }
}

/// Aggregate counters for one pipeline run.
///
/// Mutated only by the coordinator's collection loop, read once the run
/// has drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl RunSummary {
    /// Count one outcome.
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Success => self.success += 1,
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::NotFound => self.not_found += 1,
            OutcomeKind::Error => self.errors += 1,
        }
    }

    /// Total outcomes recorded.
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.not_found + self.errors
    }
}
