//! Dense frame timeline from sparse phoneme intervals.
//!
//! Every frame is `frame_size_ms` long and consecutive starts differ by
//! exactly `window_ms`, so frames overlap whenever the window is shorter
//! than the frame. Two ordering assumptions are inherited from the
//! annotation source and deliberately not corrected here:
//!
//! * the recording duration is taken from the end of the *last* interval in
//!   input order, not the maximum over all intervals; unsorted input
//!   under- or over-estimates it;
//! * the label scan stops at the first interval that has not finished by
//!   the frame end, and the last qualifying interval before that point
//!   wins; input not sorted by end time mislabels frames.

use serde::{Deserialize, Serialize};

use crate::annotation::PhonemeInterval;
use crate::config::FrameConfig;
use crate::error::CorpusError;

/// Label given to a frame no interval has finished in.
pub const SILENCE_LABEL: &str = "SIL";

/// One fixed-length frame with its phoneme label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLabel {
    /// Frame start in seconds.
    pub start: f64,
    /// Frame end in seconds; always `start` plus the configured frame size.
    pub end: f64,
    /// Assigned phoneme, or [`SILENCE_LABEL`].
    pub phoneme: String,
}

/// Build the frame timeline covering `[0, padded_end)`.
///
/// The padded end extends the last interval's end so that the final
/// window-stride frame fits a whole frame-size window; the audio content of
/// frames reaching past the recording is zero-padded later, by the segment
/// writer. An empty interval list is malformed.
pub fn build_timeline(
    intervals: &[PhonemeInterval],
    config: &FrameConfig,
) -> Result<Vec<FrameLabel>, CorpusError> {
    config.validate()?;
    let last = intervals.last().ok_or_else(|| {
        CorpusError::MalformedAnnotation("no phoneme intervals".to_string())
    })?;

    let padded_end_ms = padded_end_ms(to_ms(last.end), config.frame_size_ms);
    // Boundary comparisons happen in rounded milliseconds so that ties are
    // deterministic.
    let ends_ms: Vec<u64> = intervals.iter().map(|iv| to_ms(iv.end)).collect();

    let mut frames = Vec::with_capacity(padded_end_ms.div_ceil(config.window_ms) as usize);
    let mut start_ms = 0u64;
    while start_ms < padded_end_ms {
        let end_ms = start_ms + config.frame_size_ms;

        let mut phoneme = SILENCE_LABEL;
        for (interval, &interval_end_ms) in intervals.iter().zip(&ends_ms) {
            if interval_end_ms <= end_ms {
                phoneme = &interval.phoneme;
            } else {
                break;
            }
        }

        frames.push(FrameLabel {
            start: start_ms as f64 / 1000.0,
            end: end_ms as f64 / 1000.0,
            phoneme: phoneme.to_string(),
        });
        start_ms += config.window_ms;
    }
    Ok(frames)
}

/// Round a second timestamp to whole milliseconds.
fn to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

/// Extend `last_end_ms` so a final full frame fits.
///
/// The fractional-second remainder, if any, is covered by whole frame-size
/// blocks on top of the whole-second part of the timestamp; a timestamp
/// already on a second boundary is left untouched.
fn padded_end_ms(last_end_ms: u64, frame_size_ms: u64) -> u64 {
    let remainder = last_end_ms % 1000;
    if remainder == 0 {
        last_end_ms
    } else {
        (last_end_ms / 1000) * 1000 + (remainder / frame_size_ms + 1) * frame_size_ms
    }
}
