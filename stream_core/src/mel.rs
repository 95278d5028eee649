//! Mel spectrogram transform for segment batches.
//!
//! Spectrogram computation itself is delegated to `mel_spec`; this module
//! only walks a clip's samples at the configured hop and bridges the
//! buffers into the library's FFT input type.

use std::path::PathBuf;

use mel_spec::prelude::*;
use ndarray::Array1;
use num_complex::Complex;

use crate::error::StreamError;

/// STFT and mel filterbank parameters.
#[derive(Debug, Clone, Copy)]
pub struct MelConfig {
    pub fft_size: usize,
    pub hop_size: usize,
    pub n_mels: usize,
}

impl Default for MelConfig {
    fn default() -> Self {
        Self {
            fft_size: 512,
            hop_size: 160,
            n_mels: 80,
        }
    }
}

/// Mel frames for one clip: one `n_mels`-length vector per hop.
pub type MelFrames = Vec<Vec<f64>>;

/// Compute mel frames from raw samples.
pub fn mel_from_samples(samples: &[f32], sample_rate: u32, config: &MelConfig) -> MelFrames {
    let mut stft = Spectrogram::new(config.fft_size, config.hop_size);
    let mut mel = MelSpectrogram::new(config.fft_size, sample_rate as f64, config.n_mels);

    let mut frames = MelFrames::new();
    let mut offset = 0usize;
    while offset + config.hop_size <= samples.len() {
        let chunk = &samples[offset..offset + config.hop_size];

        let frame: Vec<f64> = if let Some(fft_frame) = stft.add(chunk) {
            let spectrum: Array1<Complex<f64>> =
                Array1::from_iter(fft_frame.into_iter().map(|c: Complex<f64>| c));
            let (flat, _offset) = mel.add(&spectrum).into_raw_vec_and_offset();
            flat
        } else {
            // The STFT holds samples back until a full FFT window exists.
            vec![0.0f64; config.n_mels]
        };

        frames.push(frame);
        offset += config.hop_size;
    }

    frames
}

/// Transform for [`crate::PartitionedStream`]: decode one segment file
/// into its mel frames.
pub fn spectrogram_transform(
    config: MelConfig,
) -> impl FnMut(&PathBuf) -> Result<MelFrames, StreamError> {
    move |path: &PathBuf| {
        let waveform = frame_core::wav::read_mono(path)?;
        Ok(mel_from_samples(
            &waveform.samples,
            waveform.sample_rate,
            &config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_per_hop() {
        let config = MelConfig::default();
        let samples = vec![0.1f32; 4_000];
        let frames = mel_from_samples(&samples, 16_000, &config);
        assert_eq!(frames.len(), 4_000 / config.hop_size);
        assert!(frames.iter().all(|f| f.len() == config.n_mels));
    }

    #[test]
    fn short_input_yields_no_frames() {
        let config = MelConfig::default();
        let frames = mel_from_samples(&[0.0f32; 100], 16_000, &config);
        assert!(frames.is_empty());
    }
}
