pub mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use jwalk::WalkDir;
use serde::Serialize;
use tracing::{info, warn};

use frame_core::segment_corpus;

use crate::config::SegmenterConfig;

#[derive(Serialize)]
struct RunSummary {
    recordings: usize,
    segments_written: usize,
    skipped: usize,
    failed: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    let config = SegmenterConfig::from_env();
    info!(
        corpus = %config.corpus_dir.display(),
        out = %config.segment_dir.display(),
        frame_ms = config.frame.frame_size_ms,
        window_ms = config.frame.window_ms,
        "starting segmentation run"
    );

    let recordings = collect_recordings(&config.corpus_dir);
    if recordings.is_empty() {
        warn!(corpus = %config.corpus_dir.display(), "no recordings found, nothing to do");
        return Ok(());
    }
    info!(recordings = recordings.len(), "corpus scanned");

    let report = segment_corpus(
        &recordings,
        &config.segment_dir,
        &config.frame,
        config.workers,
    )
    .context("segmentation run failed")?;

    let summary = RunSummary {
        recordings: report.recordings.len(),
        segments_written: report.segments_written(),
        skipped: report.skipped(),
        failed: report.failed(),
    };
    info!(
        recordings = summary.recordings,
        segments = summary.segments_written,
        skipped = summary.skipped,
        failed = summary.failed,
        "segmentation run finished"
    );

    let report_path = config.segment_dir.join("segmentation_report.json");
    fs::write(&report_path, serde_json::to_vec_pretty(&summary)?)
        .with_context(|| format!("writing {}", report_path.display()))?;

    Ok(())
}

/// Collect `.wav` recordings under the corpus directory, in stable order.
fn collect_recordings(corpus_dir: &Path) -> Vec<PathBuf> {
    let mut recordings: Vec<PathBuf> = WalkDir::new(corpus_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("wav"))
                .unwrap_or(false)
        })
        .collect();
    recordings.sort();
    recordings
}
