//! Procedural sound effect synthesis
//!
//! Sounds are sample functions of time built from the primitives in [`dsp`]
//! (oscillators, envelopes, seeded noise, soft clipping), rendered to mono
//! `f32` buffers and exported as 16-bit PCM WAV.
//!
//! # Example
//! ```no_run
//! use microgen::audio::*;
//!
//! // One preset straight to disk
//! let coin = presets::collect(presets::Pitch::High);
//! write_sound(std::path::Path::new("assets"), "sfx_coin", &coin)?;
//!
//! // Everything a game needs, by name
//! let written = generate_sounds(&["jump", "hit", "win"], std::path::Path::new("assets"))?;
//! # Ok::<(), AudioError>(())
//! ```

pub mod announcer;
pub mod arcade;
pub mod dsp;
mod export;
mod library;
pub mod loop_connect;
pub mod presets;
pub mod sokoban;

/// Sample rate of every generated sound (44.1kHz)
pub const SAMPLE_RATE: u32 = 44100;

/// Peak level written files are limited to
pub const PEAK_LIMIT: f32 = 0.98;

pub use dsp::{Adsr, Noise, Waveform, oscillator, render, soft_clip};
pub use export::{normalize_to, peak_limit, to_pcm_i16, write_wav};
pub use library::{
    BUNDLES, GameBundle, LIBRARY, SoundDef, find_bundle, generate_all, generate_bundle,
    generate_sound, generate_sounds, lookup, write_sound,
};

/// Audio errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("unknown sound type: {0}")]
    UnknownSound(String),

    #[error("unknown sound bundle: {0}")]
    UnknownBundle(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Audio sample buffer (mono f32 samples, nominally -1.0 to 1.0)
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Audio samples
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    /// Create a buffer from samples
    pub fn from_samples(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_buffer_from_samples() {
        let samples = vec![0.0, 0.5, 1.0, -1.0];
        let buf = AudioBuffer::from_samples(SAMPLE_RATE, samples.clone());
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.samples, samples);
        assert_eq!(buf.peak(), 1.0);
    }

    #[test]
    fn test_audio_buffer_duration() {
        let buf = AudioBuffer::from_samples(SAMPLE_RATE, vec![0.0; SAMPLE_RATE as usize]);
        assert!((buf.duration() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_audio_buffer_empty() {
        let buf = AudioBuffer::from_samples(SAMPLE_RATE, Vec::new());
        assert!(buf.is_empty());
        assert_eq!(buf.peak(), 0.0);
    }
}
