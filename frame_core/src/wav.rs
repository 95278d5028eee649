//! Waveform file access.
//!
//! Container and sample-format handling is delegated to `hound`; the rest
//! of the pipeline only ever sees mono `f32` sample buffers.

use std::path::Path;

use crate::error::CorpusError;

/// Decoded mono waveform.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Read a mono recording into `f32` samples.
///
/// 16-bit integer and 32-bit float PCM are accepted; anything else, or a
/// multi-channel file, is a codec error.
pub fn read_mono(path: &Path) -> Result<Waveform, CorpusError> {
    let codec = |source| CorpusError::Codec {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(codec)?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(codec(hound::Error::Unsupported));
    }

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(codec)?,
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<Vec<_>, _>>()
            .map_err(codec)?,
        _ => return Err(codec(hound::Error::Unsupported)),
    };

    Ok(Waveform {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write mono 16-bit PCM at `sample_rate`.
pub fn write_mono(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), CorpusError> {
    let codec = |source| CorpusError::Codec {
        path: path.to_path_buf(),
        source,
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(codec)?;
    for &s in samples {
        // Clamp and convert f32 [-1.0, 1.0] -> i16
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(v).map_err(codec)?;
    }
    writer.finalize().map_err(codec)
}
