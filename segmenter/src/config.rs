// Environment-driven configuration for the segmentation binary.

use std::path::PathBuf;

use frame_core::FrameConfig;

#[derive(Clone, Debug)]
pub struct SegmenterConfig {
    /// Directory scanned for `.wav` recordings.
    pub corpus_dir: PathBuf,
    /// Directory receiving segment files and the run report.
    pub segment_dir: PathBuf,
    /// Framing parameters, fixed for the whole run.
    pub frame: FrameConfig,
    /// Worker count; `None` uses available parallelism.
    pub workers: Option<usize>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("corpus"),
            segment_dir: PathBuf::from("segments"),
            frame: FrameConfig::default(),
            workers: None,
        }
    }
}

impl SegmenterConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let corpus_dir = std::env::var("CORPUS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.corpus_dir);

        let segment_dir = std::env::var("SEGMENT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.segment_dir);

        let frame_size_ms = std::env::var("FRAME_SIZE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.frame.frame_size_ms);

        let window_ms = std::env::var("WINDOW_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.frame.window_ms);

        let workers = std::env::var("WORKERS").ok().and_then(|v| v.parse().ok());

        Self {
            corpus_dir,
            segment_dir,
            frame: FrameConfig {
                frame_size_ms,
                window_ms,
            },
            workers,
        }
    }
}
