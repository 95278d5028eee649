//! Share-nothing parallel segmentation over a recording corpus.
//!
//! Each pool task handles one recording end to end: annotation, timeline,
//! waveform, segment files. Output names are unique per recording, so
//! tasks never touch the same file and no locking is involved. The call
//! joins the whole pool before returning; scheduling order is unspecified
//! and nothing may depend on it.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::annotation;
use crate::config::FrameConfig;
use crate::error::CorpusError;
use crate::segment;
use crate::timeline;
use crate::wav;

/// Why a recording produced no segments without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `<base>_labels.txt` does not exist next to the recording.
    MissingAnnotation,
}

/// Per-recording result. Failures are carried here instead of aborting
/// the run; a skip is an ordinary, assertable outcome rather than a
/// swallowed condition.
#[derive(Debug)]
pub enum RecordingOutcome {
    Written { segments: usize },
    Skipped { reason: SkipReason },
    Failed { error: CorpusError },
}

/// Outcome of one recording.
#[derive(Debug)]
pub struct RecordingReport {
    pub recording: PathBuf,
    pub outcome: RecordingOutcome,
}

/// All per-recording outcomes of one run, in input order.
#[derive(Debug, Default)]
pub struct SegmentationReport {
    pub recordings: Vec<RecordingReport>,
}

impl SegmentationReport {
    /// Total segment files written across the corpus.
    pub fn segments_written(&self) -> usize {
        self.recordings
            .iter()
            .map(|r| match r.outcome {
                RecordingOutcome::Written { segments } => segments,
                _ => 0,
            })
            .sum()
    }

    /// Recordings skipped (missing annotation).
    pub fn skipped(&self) -> usize {
        self.recordings
            .iter()
            .filter(|r| matches!(r.outcome, RecordingOutcome::Skipped { .. }))
            .count()
    }

    /// Recordings that failed outright.
    pub fn failed(&self) -> usize {
        self.recordings
            .iter()
            .filter(|r| matches!(r.outcome, RecordingOutcome::Failed { .. }))
            .count()
    }
}

/// Segment every recording with a fixed pool of `workers` threads
/// (available parallelism when `None`).
///
/// A failure on one recording lands in that recording's report entry and
/// never aborts the others; a missing annotation is a skip, not a failure.
pub fn segment_corpus(
    recordings: &[PathBuf],
    out_dir: &Path,
    config: &FrameConfig,
    workers: Option<usize>,
) -> Result<SegmentationReport, CorpusError> {
    config.validate()?;
    std::fs::create_dir_all(out_dir).map_err(|source| CorpusError::IoFailure {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()
        .map_err(|e| CorpusError::InvalidConfig(format!("worker pool: {e}")))?;

    let reports = pool.install(|| {
        recordings
            .par_iter()
            .map(|recording| RecordingReport {
                recording: recording.clone(),
                outcome: process_recording(recording, out_dir, config),
            })
            .collect::<Vec<_>>()
    });

    Ok(SegmentationReport {
        recordings: reports,
    })
}

fn process_recording(recording: &Path, out_dir: &Path, config: &FrameConfig) -> RecordingOutcome {
    let intervals = match annotation::load_intervals(recording) {
        Ok(intervals) => intervals,
        Err(CorpusError::MissingAnnotation(path)) => {
            info!(annotation = %path.display(), "annotation missing, skipping recording");
            return RecordingOutcome::Skipped {
                reason: SkipReason::MissingAnnotation,
            };
        }
        Err(error) => return failed(recording, error),
    };

    let frames = match timeline::build_timeline(&intervals, config) {
        Ok(frames) => frames,
        Err(error) => return failed(recording, error),
    };

    let waveform = match wav::read_mono(recording) {
        Ok(waveform) => waveform,
        Err(error) => return failed(recording, error),
    };

    let recording_id = recording
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("recording");
    match segment::write_segments(
        recording_id,
        &waveform.samples,
        waveform.sample_rate,
        &frames,
        out_dir,
        config,
    ) {
        Ok(segments) => {
            info!(recording = %recording.display(), segments, "recording segmented");
            RecordingOutcome::Written { segments }
        }
        Err(error) => failed(recording, error),
    }
}

fn failed(recording: &Path, error: CorpusError) -> RecordingOutcome {
    warn!(recording = %recording.display(), %error, "recording failed");
    RecordingOutcome::Failed { error }
}
