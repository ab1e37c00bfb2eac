//! Durable, categorized outcome logs.
//!
//! Each outcome category appends to its own plain-text file under the log
//! directory: `downloaded.log`, `skipped.log`, `not_found.log`,
//! `errors.log`. One line per terminal outcome:
//!
//! ```text
//! [2026-08-06T14:03:21.519402+00:00] Song A - Artist X -> already exists
//! ```
//!
//! Writes are serialized by the pipeline's collection loop; this type does
//! no locking of its own.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::model::{Outcome, OutcomeKind, TrackRequest};

/// Append-only log sink keyed by outcome category.
pub struct OutcomeLog {
    dir: PathBuf,
}

impl OutcomeLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the category files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append one outcome to its category file.
    pub fn record(&self, track: &TrackRequest, outcome: &Outcome) -> std::io::Result<()> {
        let detail = match outcome {
            Outcome::Success { path } => path.display().to_string(),
            Outcome::Skipped { reason } | Outcome::NotFound { reason } => reason.clone(),
            Outcome::Error { message } => message.clone(),
        };

        let mut sink = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(outcome.kind()))?;
        writeln!(
            sink,
            "[{}] {} -> {}",
            Utc::now().to_rfc3339(),
            track.label(),
            detail
        )
    }

    /// The file a category's records land in.
    pub fn path_for(&self, kind: OutcomeKind) -> PathBuf {
        self.dir.join(format!("{}.log", kind.as_str()))
    }
}
