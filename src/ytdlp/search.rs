//! Single-result media search via yt-dlp.
//!
//! Runs `yt-dlp --no-warnings --dump-single-json "ytsearch1:<query>"` and
//! extracts at most one candidate from the JSON dump. Depending on the
//! extractor the dump is either a playlist object with an `entries` array
//! or a bare video object; both shapes are handled.

use std::process::Command;

use crate::model::Candidate;

/// Errors from the external search invocation.
///
/// The resolver treats every one of these as "no candidate" - they are
/// surfaced here so tests and logs can tell the cases apart.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    #[error("yt-dlp not found. Install it from https://github.com/yt-dlp/yt-dlp")]
    ToolMissing,

    #[error("failed to run yt-dlp: {0}")]
    Spawn(String),

    #[error("search failed: {0}")]
    Failed(String),

    #[error("failed to parse search output: {0}")]
    Parse(String),
}

/// Search for the single best match for `query`.
///
/// Returns `Ok(None)` when the search completed but produced no result.
pub fn search_single(query: &str) -> Result<Option<Candidate>, SearchError> {
    let ytdlp = super::find_ytdlp().ok_or(SearchError::ToolMissing)?;

    let output = Command::new(ytdlp)
        .arg("--no-warnings")
        .arg("--dump-single-json")
        .arg(format!("ytsearch1:{query}"))
        .output()
        .map_err(|e| SearchError::Spawn(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SearchError::Failed(stderr.trim().to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let dump: serde_json::Value =
        serde_json::from_str(&stdout).map_err(|e| SearchError::Parse(e.to_string()))?;
    candidate_from_dump(&dump)
}

/// Extract a candidate from a `--dump-single-json` document.
fn candidate_from_dump(dump: &serde_json::Value) -> Result<Option<Candidate>, SearchError> {
    let info = match dump.get("entries") {
        Some(entries) => {
            let entries = entries
                .as_array()
                .ok_or_else(|| SearchError::Parse("entries is not an array".to_string()))?;
            match entries.first() {
                Some(first) => first,
                None => return Ok(None),
            }
        }
        None => dump,
    };

    let field = |name: &str| -> Result<String, SearchError> {
        info.get(name)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SearchError::Parse(format!("result is missing `{name}`")))
    };

    Ok(Some(Candidate {
        remote_id: field("id")?,
        canonical_title: field("title")?,
        // Uploader is routinely absent for some extractors
        uploader: info
            .get("uploader")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        url: field("webpage_url")?,
    }))
}
