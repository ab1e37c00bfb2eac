//! Trait definitions for the pipeline's external collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the yt-dlp backed implementations, while tests
//! substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use trackdown::pipeline::traits::SearchApi;
//!
//! // In production code:
//! async fn top_hit<T: SearchApi>(client: &T, query: &str) {
//!     let candidate = client.search_single(query).await?;
//! }
//!
//! // In tests:
//! struct MockSearch { ... }
//! impl SearchApi for MockSearch { ... }
//! ```

use async_trait::async_trait;

use crate::model::{Candidate, TrackRequest};
use crate::ytdlp::{self, FetchError, SearchError};

/// Trait for the external single-result media search.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Return at most one best-match candidate for the query.
    async fn search_single(&self, query: &str) -> Result<Option<Candidate>, SearchError>;
}

/// Trait for the external audio fetch.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait FetchApi: Send + Sync {
    /// Materialize the audio at `url` according to `output_template`.
    async fn fetch(&self, url: &str, output_template: &str) -> Result<(), FetchError>;
}

/// What the user decided at an interactive confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Go ahead and fetch this candidate.
    Fetch,
    /// Skip this track, keep going.
    Skip,
    /// Skip this track and schedule nothing further.
    Stop,
}

/// Trait for the interactive per-track confirmation step.
///
/// Present on the pipeline only in interactive mode; its absence is
/// unattended mode.
#[async_trait]
pub trait ConfirmApi: Send + Sync {
    /// Ask whether `candidate` should be fetched for `track`.
    async fn confirm(&self, track: &TrackRequest, candidate: &Candidate) -> Decision;
}

// Implementations backed by the yt-dlp wrapper. The wrapper functions are
// synchronous process invocations, so they run on the blocking pool.

/// Search implementation shelling out to yt-dlp.
pub struct YtDlpSearch;

#[async_trait]
impl SearchApi for YtDlpSearch {
    async fn search_single(&self, query: &str) -> Result<Option<Candidate>, SearchError> {
        let query = query.to_string();
        tokio::task::spawn_blocking(move || ytdlp::search_single(&query))
            .await
            .map_err(|e| SearchError::Spawn(e.to_string()))?
    }
}

/// Fetch implementation shelling out to yt-dlp.
pub struct YtDlpFetch;

#[async_trait]
impl FetchApi for YtDlpFetch {
    async fn fetch(&self, url: &str, output_template: &str) -> Result<(), FetchError> {
        let url = url.to_string();
        let template = output_template.to_string();
        tokio::task::spawn_blocking(move || ytdlp::download(&url, &template))
            .await
            .map_err(|e| FetchError::Internal(e.to_string()))?
    }
}

/// Confirmation prompt reading answers from stdin.
pub struct StdinConfirm;

#[async_trait]
impl ConfirmApi for StdinConfirm {
    async fn confirm(&self, track: &TrackRequest, candidate: &Candidate) -> Decision {
        println!("  Found: {}", candidate.canonical_title);
        println!("  URL:     {}", candidate.url);
        if !candidate.uploader.is_empty() {
            println!("  Channel: {}", candidate.uploader);
        }
        print!("Download \"{}\"? [Y/n/s=stop]: ", track.title);
        use std::io::Write;
        let _ = std::io::stdout().flush();

        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => match line.trim().to_lowercase().as_str() {
                "s" => Decision::Stop,
                "n" | "no" => Decision::Skip,
                _ => Decision::Fetch,
            },
            // Can't read an answer (stdin closed) - stop scheduling
            _ => Decision::Stop,
        }
    }
}

/// Mock collaborators for testing.
///
/// Return configurable responses for testing different scenarios, and
/// record enough about their invocations for tests to assert on call
/// counts and timing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    /// Build a candidate with the fields tests care about.
    pub fn candidate(remote_id: &str, title: &str) -> Candidate {
        Candidate {
            remote_id: remote_id.to_string(),
            canonical_title: title.to_string(),
            uploader: "Test Channel".to_string(),
            url: format!("https://media.example.com/watch?v={remote_id}"),
        }
    }

    /// Mock search that answers from a query -> candidate table.
    ///
    /// Queries absent from the table get "no result". Records the start
    /// instant of every call for rate-limit assertions.
    pub struct MockSearch {
        responses: HashMap<String, Candidate>,
        error: Option<SearchError>,
        calls: Mutex<Vec<Instant>>,
    }

    impl MockSearch {
        /// Create a mock that returns no matches for every query.
        pub fn no_matches() -> Self {
            Self {
                responses: HashMap::new(),
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock answering from the given table.
        pub fn with_responses(responses: HashMap<String, Candidate>) -> Self {
            Self {
                responses,
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock that fails every call.
        pub fn with_error(error: SearchError) -> Self {
            Self {
                responses: HashMap::new(),
                error: Some(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Number of search calls performed.
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Start instants of every search call, in call order.
        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchApi for MockSearch {
        async fn search_single(&self, query: &str) -> Result<Option<Candidate>, SearchError> {
            self.calls.lock().unwrap().push(Instant::now());
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(self.responses.get(query).cloned())
        }
    }

    /// What a [`MockFetch`] does when invoked.
    #[derive(Debug, Clone)]
    pub enum FetchBehavior {
        /// Write a fake audio file at the template's mp3 expansion.
        CreateFile,
        /// Fail with the given diagnostic line.
        Fail(String),
        /// Panic, simulating an unexpected fault inside the fetch path.
        Panic,
    }

    /// Mock fetch with per-url behavior and a call counter.
    pub struct MockFetch {
        default: FetchBehavior,
        overrides: HashMap<String, FetchBehavior>,
        calls: AtomicUsize,
    }

    impl MockFetch {
        /// Create a mock that materializes a file for every call.
        pub fn succeeding() -> Self {
            Self {
                default: FetchBehavior::CreateFile,
                overrides: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        /// Create a mock that fails every call with `diagnostic`.
        pub fn failing(diagnostic: &str) -> Self {
            Self {
                default: FetchBehavior::Fail(diagnostic.to_string()),
                overrides: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        /// Override the behavior for one locator.
        pub fn with_override(mut self, url: &str, behavior: FetchBehavior) -> Self {
            self.overrides.insert(url.to_string(), behavior);
            self
        }

        /// Number of fetch calls performed.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FetchApi for MockFetch {
        async fn fetch(&self, url: &str, output_template: &str) -> Result<(), FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let behavior = self.overrides.get(url).unwrap_or(&self.default);
            match behavior {
                FetchBehavior::CreateFile => {
                    let path = output_template.replace("%(ext)s", "mp3");
                    std::fs::write(&path, b"fake audio")
                        .map_err(|e| FetchError::Internal(e.to_string()))
                }
                FetchBehavior::Fail(diagnostic) => Err(FetchError::Failed {
                    diagnostic: diagnostic.clone(),
                }),
                FetchBehavior::Panic => panic!("injected fault"),
            }
        }
    }

    /// Mock confirmation returning scripted decisions.
    pub struct MockConfirm {
        decisions: Mutex<std::collections::VecDeque<Decision>>,
    }

    impl MockConfirm {
        /// Answer with the given decisions in order, then `Fetch` forever.
        pub fn scripted(decisions: Vec<Decision>) -> Self {
            Self {
                decisions: Mutex::new(decisions.into()),
            }
        }
    }

    #[async_trait]
    impl ConfirmApi for MockConfirm {
        async fn confirm(&self, _track: &TrackRequest, _candidate: &Candidate) -> Decision {
            self.decisions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Decision::Fetch)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_search_no_matches() {
            let mock = MockSearch::no_matches();
            let result = mock.search_single("anything").await.unwrap();
            assert!(result.is_none());
            assert_eq!(mock.call_count(), 1);
        }

        #[tokio::test]
        async fn test_mock_search_with_responses() {
            let mut responses = HashMap::new();
            responses.insert("Song A Artist X".to_string(), candidate("abc", "Song A"));
            let mock = MockSearch::with_responses(responses);

            let hit = mock.search_single("Song A Artist X").await.unwrap();
            assert_eq!(hit.unwrap().remote_id, "abc");

            let miss = mock.search_single("Song B").await.unwrap();
            assert!(miss.is_none());
        }

        #[tokio::test]
        async fn test_mock_fetch_creates_file() {
            let dir = tempfile::tempdir().unwrap();
            let template = dir.path().join("Song - abc.%(ext)s");
            let mock = MockFetch::succeeding();

            mock.fetch("url", &template.to_string_lossy()).await.unwrap();
            assert!(dir.path().join("Song - abc.mp3").exists());
            assert_eq!(mock.call_count(), 1);
        }

        #[tokio::test]
        async fn test_mock_fetch_failure_diagnostic() {
            let mock = MockFetch::failing("ERROR: Video unavailable");
            let result = mock.fetch("url", "template").await;
            assert!(matches!(
                result,
                Err(FetchError::Failed { diagnostic }) if diagnostic == "ERROR: Video unavailable"
            ));
        }

        #[tokio::test]
        async fn test_mock_confirm_scripted_then_fetch() {
            let mock = MockConfirm::scripted(vec![Decision::Skip]);
            let track = TrackRequest::new("Song", "");
            let cand = candidate("abc", "Song");

            assert_eq!(mock.confirm(&track, &cand).await, Decision::Skip);
            assert_eq!(mock.confirm(&track, &cand).await, Decision::Fetch);
        }
    }
}
