//! Fixed-length segment extraction.
//!
//! Each labeled frame becomes one clip of exactly `samples_per_frame`
//! samples, written as its own WAV file. Output names embed the recording
//! id, the phoneme and the 1-based frame index, which makes them unique
//! per recording by construction.

use std::path::Path;

use tracing::debug;

use crate::config::FrameConfig;
use crate::error::CorpusError;
use crate::timeline::FrameLabel;
use crate::wav;

/// Substring marking a phoneme as out-of-vocabulary. Frames carrying it
/// are never persisted.
pub const OOV_MARKER: &str = "xx";

/// Delimiter joining recording id, phoneme and frame index in file names.
pub const SEGMENT_DELIMITER: &str = "__";

/// Slice `samples` into one clip per frame and write each as
/// `<recording_id>__<phoneme>__<index>.wav` under `out_dir`.
///
/// A clip cut short by the end of the recording is zero-padded on the
/// right to the exact per-frame sample count. Returns the number of
/// segments written; out-of-vocabulary frames are dropped without error.
pub fn write_segments(
    recording_id: &str,
    samples: &[f32],
    sample_rate: u32,
    timeline: &[FrameLabel],
    out_dir: &Path,
    config: &FrameConfig,
) -> Result<usize, CorpusError> {
    config.validate()?;
    let samples_per_frame = config.samples_per_frame(sample_rate);
    let mut written = 0usize;

    for (index, frame) in timeline.iter().enumerate() {
        if frame.phoneme.contains(OOV_MARKER) {
            debug!(
                recording = recording_id,
                frame = index + 1,
                phoneme = %frame.phoneme,
                "dropping out-of-vocabulary frame"
            );
            continue;
        }

        let start = (frame.start * sample_rate as f64).round() as usize;
        let end = (frame.end * sample_rate as f64).round() as usize;
        let mut clip: Vec<f32> =
            samples[start.min(samples.len())..end.min(samples.len())].to_vec();
        clip.truncate(samples_per_frame);
        clip.resize(samples_per_frame, 0.0);

        let name = format!(
            "{recording_id}{SEGMENT_DELIMITER}{}{SEGMENT_DELIMITER}{}.wav",
            frame.phoneme,
            index + 1
        );
        wav::write_mono(&out_dir.join(name), &clip, sample_rate)?;
        written += 1;
    }

    Ok(written)
}
