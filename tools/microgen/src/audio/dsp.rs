//! Shared DSP primitives: oscillators, ADSR envelope, soft clipping, seeded noise
//!
//! Oscillators are evaluated at an absolute time `t` rather than by
//! accumulating phase, so a frequency that changes over time produces the
//! characteristic chirp of `sin(2π f(t) t)`.

use super::AudioBuffer;
use std::f32::consts::PI;

/// Waveform types for audio synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Pure sine wave
    Sine,
    /// Hard square, sign of the sine
    Square,
}

/// Sample a waveform of `frequency` Hz at time `t` seconds. Output is in [-1, 1].
pub fn oscillator(frequency: f32, t: f32, waveform: Waveform) -> f32 {
    match waveform {
        Waveform::Sine => (2.0 * PI * frequency * t).sin(),
        Waveform::Square => {
            if (2.0 * PI * frequency * t).sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
    }
}

/// Sine shorthand used by most presets
#[inline]
pub fn sine(frequency: f32, t: f32) -> f32 {
    oscillator(frequency, t, Waveform::Sine)
}

/// ADSR envelope. All times in seconds, sustain is a level in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.05,
            sustain: 0.7,
            release: 0.1,
        }
    }
}

impl Adsr {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain: sustain.clamp(0.0, 1.0),
            release,
        }
    }

    /// Stage lengths given as fractions of `duration` instead of seconds
    pub fn proportional(
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
        duration: f32,
    ) -> Self {
        Self::new(
            attack * duration,
            decay * duration,
            sustain,
            release * duration,
        )
    }

    /// Envelope level at time `t` of a sound lasting `duration` seconds
    pub fn level(&self, t: f32, duration: f32) -> f32 {
        let release_start = duration - self.release;
        let level = if t < self.attack {
            t / self.attack
        } else if t < self.attack + self.decay {
            let progress = (t - self.attack) / self.decay;
            1.0 - (1.0 - self.sustain) * progress
        } else if t < release_start {
            self.sustain
        } else if self.release > 0.0 {
            let progress = (t - release_start) / self.release;
            self.sustain * (1.0 - progress)
        } else {
            0.0
        };
        level.clamp(0.0, 1.0)
    }
}

/// Soft clipping: identity below `threshold`, tanh saturation above it.
///
/// The output magnitude approaches but never reaches 1.0.
pub fn soft_clip(value: f32, threshold: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude <= threshold {
        return value;
    }
    let headroom = 1.0 - threshold;
    let clipped = threshold + headroom * ((magnitude - threshold) / headroom).tanh();
    clipped.copysign(value)
}

/// Seeded white noise source (64-bit LCG, Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct Noise {
    state: u64,
}

impl Noise {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // Top 24 bits map exactly onto f32 mantissa precision
        (self.state >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in [lo, hi)
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }

    /// White noise sample in [-1, 1)
    pub fn sample(&mut self) -> f32 {
        self.range(-1.0, 1.0)
    }
}

/// Number of samples in `duration` seconds, truncated
pub fn sample_count(duration: f32, sample_rate: u32) -> usize {
    (duration as f64 * sample_rate as f64) as usize
}

/// Render a sound by evaluating `f(t, noise)` at every sample time.
///
/// # Arguments
/// * `duration` - Length in seconds
/// * `sample_rate` - Sample rate in Hz
/// * `seed` - Seed for the noise source handed to `f`
/// * `f` - Sample function of time in seconds
pub fn render<F>(duration: f32, sample_rate: u32, seed: u64, mut f: F) -> AudioBuffer
where
    F: FnMut(f32, &mut Noise) -> f32,
{
    let num_samples = sample_count(duration, sample_rate);
    let mut noise = Noise::new(seed);
    let samples = (0..num_samples)
        .map(|i| f(i as f32 / sample_rate as f32, &mut noise))
        .collect();
    AudioBuffer::from_samples(sample_rate, samples)
}
