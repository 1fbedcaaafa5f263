//! Peak limiting, PCM conversion and WAV export

use super::{AudioBuffer, AudioError};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Scale samples down so the absolute peak is at most `limit`.
///
/// Quieter signals are left untouched.
pub fn peak_limit(samples: &mut [f32], limit: f32) {
    let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
    if peak > limit {
        let scale = limit / peak;
        for sample in samples.iter_mut() {
            *sample *= scale;
        }
    }
}

/// Scale samples so the absolute peak equals `amplitude`.
///
/// Silence is left untouched.
pub fn normalize_to(samples: &mut [f32], amplitude: f32) {
    let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
    if peak > 0.0 {
        let scale = amplitude / peak;
        for sample in samples.iter_mut() {
            *sample *= scale;
        }
    }
}

/// Convert f32 samples (-1.0 to 1.0) to PCM i16
///
/// Samples are clamped, scaled by `i16::MAX` and truncated toward zero.
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}

/// Write a buffer as a mono 16-bit PCM WAV file
///
/// # Arguments
/// * `buffer` - Samples to write, converted with [`to_pcm_i16`]
/// * `path` - Output file path
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for sample in to_pcm_i16(&buffer.samples) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(())
}
