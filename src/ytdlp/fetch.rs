//! Audio retrieval via yt-dlp.
//!
//! Runs `yt-dlp -x --audio-format mp3 --add-metadata --embed-metadata`
//! with a caller-supplied output template. On failure, only the most
//! specific line of the diagnostic stream is kept.

use std::process::Command;

/// Errors from the external fetch invocation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("yt-dlp not found. Install it from https://github.com/yt-dlp/yt-dlp")]
    ToolMissing,

    #[error("failed to run yt-dlp: {0}")]
    Spawn(String),

    #[error("{diagnostic}")]
    Failed { diagnostic: String },

    #[error("fetch task failed: {0}")]
    Internal(String),
}

/// Fetch the audio at `url`, materializing it per `output_template`.
///
/// The template uses yt-dlp placeholder syntax, e.g.
/// `tracks/Song - abc123.%(ext)s`.
pub fn download(url: &str, output_template: &str) -> Result<(), FetchError> {
    let ytdlp = super::find_ytdlp().ok_or(FetchError::ToolMissing)?;

    let output = Command::new(ytdlp)
        .arg("-x")
        .arg("--audio-format")
        .arg("mp3")
        .arg("--add-metadata")
        .arg("--embed-metadata")
        .arg("-o")
        .arg(output_template)
        .arg(url)
        .output()
        .map_err(|e| FetchError::Spawn(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FetchError::Failed {
            diagnostic: last_diagnostic_line(&stderr),
        });
    }

    Ok(())
}

/// Pick the single most specific line from a diagnostic stream.
///
/// Prefers the last `ERROR:` line, falls back to the last non-empty line.
fn last_diagnostic_line(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .iter()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.to_string())
        .unwrap_or_else(|| "yt-dlp exited with a failure and no diagnostics".to_string())
}
