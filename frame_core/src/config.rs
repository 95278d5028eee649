// Framing parameters shared by the timeline builder and the segment writer.

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Frame and stride durations in milliseconds.
///
/// One value is constructed per run and passed by reference to everything
/// that frames audio; nothing in the pipeline reads framing parameters from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Length of every emitted frame in milliseconds.
    pub frame_size_ms: u64,
    /// Step between consecutive frame start times in milliseconds. Frames
    /// overlap whenever this is shorter than the frame size.
    pub window_ms: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_size_ms: 250,
            window_ms: 50,
        }
    }
}

impl FrameConfig {
    /// Number of waveform samples covered by one frame at `sample_rate`.
    pub fn samples_per_frame(&self, sample_rate: u32) -> usize {
        (sample_rate as f64 * self.frame_size_ms as f64 / 1000.0).round() as usize
    }

    pub(crate) fn validate(&self) -> Result<(), CorpusError> {
        if self.frame_size_ms == 0 || self.window_ms == 0 {
            return Err(CorpusError::InvalidConfig(format!(
                "frame_size_ms and window_ms must be positive (got {}/{})",
                self.frame_size_ms, self.window_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_250ms_frames_on_a_50ms_window() {
        let config = FrameConfig::default();
        assert_eq!(config.frame_size_ms, 250);
        assert_eq!(config.window_ms, 50);
    }

    #[test]
    fn samples_per_frame_rounds_at_the_sample_rate() {
        let config = FrameConfig::default();
        assert_eq!(config.samples_per_frame(16_000), 4_000);
        assert_eq!(config.samples_per_frame(22_050), 5_513);
    }

    #[test]
    fn zero_durations_are_rejected() {
        let config = FrameConfig {
            frame_size_ms: 0,
            window_ms: 50,
        };
        assert!(config.validate().is_err());
    }
}
