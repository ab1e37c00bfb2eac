//! yt-dlp invocation layer.
//!
//! This module shells out to the `yt-dlp` command-line tool for both media
//! search and audio retrieval. Shelling out is more reliable than bindings
//! and works on every platform where yt-dlp is installed.
//!
//! Install yt-dlp:
//! - Windows: `winget install yt-dlp` or download from https://github.com/yt-dlp/yt-dlp
//! - macOS: `brew install yt-dlp`
//! - Linux: `apt install yt-dlp`, `pipx install yt-dlp`, or equivalent

use std::process::Command;

pub mod fetch;
pub mod search;

pub use fetch::{FetchError, download};
pub use search::{SearchError, search_single};

/// Common installation paths for yt-dlp on Windows
#[cfg(windows)]
const YTDLP_PATHS: &[&str] = &[
    "yt-dlp", // In PATH
    r"C:\Program Files\yt-dlp\yt-dlp.exe",
    r"C:\Program Files (x86)\yt-dlp\yt-dlp.exe",
];

#[cfg(not(windows))]
const YTDLP_PATHS: &[&str] = &[
    "yt-dlp", // In PATH
    "/usr/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/opt/homebrew/bin/yt-dlp",
];

/// Find the yt-dlp executable, checking common installation paths
fn find_ytdlp() -> Option<&'static str> {
    YTDLP_PATHS
        .iter()
        .find(|&path| {
            Command::new(path)
                .arg("--version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
        .map(|v| v as _)
}

/// Check if yt-dlp is available on the system
pub fn is_ytdlp_available() -> bool {
    find_ytdlp().is_some()
}

/// Get yt-dlp version string (for diagnostics)
pub fn get_ytdlp_version() -> Option<String> {
    let ytdlp = find_ytdlp()?;
    Command::new(ytdlp)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}
