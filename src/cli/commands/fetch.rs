//! The acquisition pipeline command.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::pipeline::traits::{ConfirmApi, StdinConfirm, YtDlpFetch, YtDlpSearch};
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::{config, outcome_log::OutcomeLog, tracklist, ytdlp};

use super::print_ytdlp_install_instructions;

/// Download every track in the track list.
#[allow(clippy::too_many_arguments)]
pub fn cmd_fetch(
    rt: &Runtime,
    input: Option<&Path>,
    output: Option<&Path>,
    logs: Option<&Path>,
    auto: bool,
    start: usize,
    workers: Option<usize>,
    delay: Option<f64>,
) -> anyhow::Result<()> {
    let cfg = config::load();
    let input = input.unwrap_or(&cfg.fetch.track_list);
    let output = output.unwrap_or(&cfg.fetch.output_dir);
    let logs = logs.unwrap_or(&cfg.fetch.log_dir);
    let workers = workers.unwrap_or(cfg.fetch.workers);
    let delay = delay.unwrap_or(cfg.fetch.query_interval_secs).max(0.0);

    // Configuration fault: the fetch tool is required before any dispatch
    if !ytdlp::is_ytdlp_available() {
        print_ytdlp_install_instructions();
        std::process::exit(1);
    }

    let tracks = tracklist::load(input)?;
    let total = tracks.len();
    let tracks: Vec<_> = tracks.into_iter().skip(start).collect();

    if tracks.is_empty() {
        println!("No tracks to process ({} entries in {:?}).", total, input);
        return Ok(());
    }
    if start > 0 {
        println!("Resuming at entry {} of {}.", start + 1, total);
    }
    println!("{} track(s) to process\n", tracks.len());

    std::fs::create_dir_all(output)?;
    std::fs::create_dir_all(logs)?;

    if !auto && workers > 1 {
        tracing::warn!("interactive mode is sequential; ignoring --workers {}", workers);
    }

    let confirm: Option<Arc<dyn ConfirmApi>> = if auto {
        None
    } else {
        Some(Arc::new(StdinConfirm))
    };
    let pipeline = Pipeline::new(
        Arc::new(YtDlpSearch),
        Arc::new(YtDlpFetch),
        output,
        confirm,
        PipelineConfig {
            workers,
            query_interval: Duration::from_secs_f64(delay),
        },
    );

    let log = OutcomeLog::new(logs);
    let summary = rt.block_on(pipeline.run(tracks, &log));

    println!();
    println!(
        "Done! {} downloaded, {} skipped, {} not found, {} errors",
        summary.success, summary.skipped, summary.not_found, summary.errors
    );
    println!("Output: {}", output.display());
    println!("Logs:   {}", log.dir().display());
    Ok(())
}
