//! Pipeline coordinator: bounded-concurrency track acquisition.
//!
//! Turns an ordered list of track requests into locally stored audio
//! files. A fixed pool of worker tasks pulls unclaimed tracks from a
//! shared queue; each worker runs the resolver and then, if a candidate
//! exists, the storage gate, and emits exactly one [`Outcome`] per track.
//! A single collection loop aggregates outcomes into counters and the
//! durable outcome log, so counter updates and log writes never race.
//!
//! Per-track state machine:
//! `Pending -> Resolving -> (NotFound | Gating) -> (Skipped | Fetching)
//! -> (Success | Error)`.

pub mod traits;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::model::{Outcome, RunSummary, TrackRequest};
use crate::outcome_log::OutcomeLog;
use crate::resolver::Resolver;
use crate::storage::StorageGate;
use traits::{ConfirmApi, Decision, FetchApi, SearchApi};

/// Tuning knobs for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Worker budget: maximum tracks processed concurrently.
    pub workers: usize,
    /// Minimum spacing between search invocations, per worker.
    pub query_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            query_interval: Duration::from_secs(1),
        }
    }
}

struct Inner {
    resolver: Resolver,
    gate: StorageGate,
    confirm: Option<Arc<dyn ConfirmApi>>,
    config: PipelineConfig,
}

/// The acquisition pipeline.
///
/// Interactive mode is the presence of a [`ConfirmApi`] collaborator, not
/// a separate code path; it forces the worker budget to 1 so prompts stay
/// sequential.
pub struct Pipeline {
    inner: Arc<Inner>,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn SearchApi>,
        fetch: Arc<dyn FetchApi>,
        output_dir: impl Into<PathBuf>,
        confirm: Option<Arc<dyn ConfirmApi>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver: Resolver::new(search),
                gate: StorageGate::new(output_dir, fetch),
                confirm,
                config,
            }),
        }
    }

    /// Process every track, reporting status as outcomes arrive.
    ///
    /// Returns once all dispatched tracks have a terminal outcome.
    pub async fn run(&self, tracks: Vec<TrackRequest>, log: &OutcomeLog) -> RunSummary {
        let total = tracks.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(tracks)));
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = mpsc::channel::<(TrackRequest, Outcome)>(32);

        let workers = if self.inner.confirm.is_some() {
            1
        } else {
            self.inner.config.workers.max(1)
        };

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            handles.push(tokio::spawn(worker(
                Arc::clone(&self.inner),
                Arc::clone(&queue),
                Arc::clone(&stop),
                tx.clone(),
            )));
        }
        drop(tx);

        // Single serialization point for counters and log writes.
        let mut summary = RunSummary::default();
        let mut done = 0usize;
        while let Some((track, outcome)) = rx.recv().await {
            done += 1;
            report(done, total, &track, &outcome);
            if let Err(e) = log.record(&track, &outcome) {
                tracing::warn!(track = %track.label(), error = %e, "failed to append outcome log");
            }
            summary.record(outcome.kind());
        }

        for handle in handles {
            let _ = handle.await;
        }
        summary
    }
}

/// One worker: claim tracks until the queue drains or a stop is requested.
async fn worker(
    inner: Arc<Inner>,
    queue: Arc<Mutex<VecDeque<TrackRequest>>>,
    stop: Arc<AtomicBool>,
    tx: mpsc::Sender<(TrackRequest, Outcome)>,
) {
    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        let track = { queue.lock().unwrap().pop_front() };
        let Some(track) = track else { break };

        // Task boundary: an unexpected fault in one track's processing
        // must not take down the worker or its siblings.
        let outcome = match std::panic::AssertUnwindSafe(process_track(&inner, &track, &stop))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(track = %track.label(), "unexpected fault while processing track");
                Outcome::Error {
                    message: "unexpected fault while processing track".to_string(),
                }
            }
        };

        if tx.send((track, outcome)).await.is_err() {
            break;
        }

        // Every claimed track performed exactly one search; pause before
        // this worker becomes eligible to search again.
        tokio::time::sleep(inner.config.query_interval).await;
    }
}

/// Run one track through the Resolving -> Gating states.
async fn process_track(inner: &Inner, track: &TrackRequest, stop: &AtomicBool) -> Outcome {
    let Some(candidate) = inner.resolver.resolve(track).await else {
        return Outcome::NotFound {
            reason: "no results".to_string(),
        };
    };

    if let Some(confirm) = &inner.confirm {
        match confirm.confirm(track, &candidate).await {
            Decision::Fetch => {}
            Decision::Skip => {
                return Outcome::Skipped {
                    reason: "declined by user".to_string(),
                };
            }
            Decision::Stop => {
                stop.store(true, Ordering::Relaxed);
                return Outcome::Skipped {
                    reason: "stopped by user".to_string(),
                };
            }
        }
    }

    inner.gate.acquire(track, &candidate).await
}

/// Per-track status line, printed as outcomes arrive (completion order).
fn report(done: usize, total: usize, track: &TrackRequest, outcome: &Outcome) {
    let detail = match outcome {
        Outcome::Success { path } => path.display().to_string(),
        Outcome::Skipped { reason } | Outcome::NotFound { reason } => reason.clone(),
        Outcome::Error { message } => message.clone(),
    };
    println!(
        "[{done}/{total}] {} {} -> {}",
        outcome.kind().symbol(),
        track.label(),
        detail
    );
}
