//! Loop Connect sound set: pipe rotation click, completion arpeggio, failure sweep
//!
//! Envelopes here are shaped relative to the sound's length, and every sound
//! is normalized to a fixed peak rather than just limited.

use super::dsp::{Adsr, Noise, render, sine};
use super::export::normalize_to;
use super::{AudioBuffer, SAMPLE_RATE};
use std::f32::consts::PI;

/// Uniform noise amplitude with the spread of a σ = 0.03 gaussian
const CLICK_NOISE: f32 = 0.052;

/// Render, then rescale so the peak sits exactly at `amplitude`
fn normalized<F>(duration: f32, seed: u64, amplitude: f32, f: F) -> AudioBuffer
where
    F: FnMut(f32, &mut Noise) -> f32,
{
    let mut buffer = render(duration, SAMPLE_RATE, seed, f);
    normalize_to(&mut buffer.samples, amplitude);
    buffer
}

/// Mechanical click of a pipe piece turning
pub fn rotate() -> AudioBuffer {
    const DURATION: f32 = 0.15;
    let click_env = Adsr::proportional(0.002, 0.05, 0.1, 0.15, DURATION);
    let noise_env = Adsr::proportional(0.001, 0.1, 0.0, 0.05, DURATION);

    normalized(DURATION, 0x20_7a7e, 0.5, |t, noise| {
        let click = 0.6 * sine(1200.0, t) + 0.4 * sine(600.0, t) + 0.3 * sine(300.0, t);
        let hiss = CLICK_NOISE * noise.sample();
        click * click_env.level(t, DURATION) + hiss * noise_env.level(t, DURATION)
    })
}

/// Rising C major arpeggio with a shimmer on top
pub fn win() -> AudioBuffer {
    const DURATION: f32 = 0.5;
    const NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
    const NOTE: f32 = DURATION / NOTES.len() as f32;
    let shimmer_env = Adsr::proportional(0.1, 0.1, 0.5, 0.3, DURATION);

    normalized(DURATION, 0, 0.7, |t, _| {
        let index = ((t / NOTE) as usize).min(NOTES.len() - 1);
        let tn = t - index as f32 * NOTE;
        // The last note fades out fully, the others hand over at 0.3
        let tail = if index == NOTES.len() - 1 { 0.0 } else { 0.3 };
        let note = sine(NOTES[index], tn) * note_envelope(tn, NOTE, tail);

        let shimmer = 0.15 * sine(1046.5, t) * shimmer_env.level(t, DURATION);
        note + shimmer
    })
}

/// Linear attack over the first 2% of a note, release to `tail` over the last 10%
fn note_envelope(t: f32, length: f32, tail: f32) -> f32 {
    let attack = 0.02 * length;
    let release = 0.1 * length;
    if t < attack {
        t / attack
    } else if t > length - release {
        let progress = ((t - (length - release)) / release).min(1.0);
        1.0 - (1.0 - tail) * progress
    } else {
        1.0
    }
}

/// Exponential pitch drop from G4 to C4 with a minor third above
pub fn lose() -> AudioBuffer {
    const DURATION: f32 = 0.35;
    const START: f32 = 392.0;
    const END: f32 = 261.63;
    let k = (END / START).ln();
    let main_env = Adsr::proportional(0.05, 0.1, 0.6, 0.35, DURATION);
    let third_env = Adsr::proportional(0.05, 0.1, 0.5, 0.35, DURATION);

    normalized(DURATION, 0, 0.6, |t, _| {
        // Integral of 2π·START·exp(k·t/d)
        let phase = 2.0 * PI * START * DURATION / k * ((k * t / DURATION).exp() - 1.0);
        let main = phase.sin() * main_env.level(t, DURATION);
        let third = 0.5 * (phase * 1.2).sin() * third_env.level(t, DURATION);
        main + third
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::dsp::sample_count;

    #[test]
    fn test_durations() {
        assert_eq!(rotate().len(), sample_count(0.15, SAMPLE_RATE));
        assert_eq!(win().len(), sample_count(0.5, SAMPLE_RATE));
        assert_eq!(lose().len(), sample_count(0.35, SAMPLE_RATE));
    }

    #[test]
    fn test_peaks_normalized() {
        for (buffer, amplitude) in [(rotate(), 0.5), (win(), 0.7), (lose(), 0.6)] {
            assert!((buffer.peak() - amplitude).abs() < 1e-5, "peak {}", buffer.peak());
        }
    }

    #[test]
    fn test_note_envelope() {
        assert_eq!(note_envelope(0.0, 0.125, 0.3), 0.0);
        assert_eq!(note_envelope(0.06, 0.125, 0.3), 1.0);
        assert!((note_envelope(0.125, 0.125, 0.3) - 0.3).abs() < 1e-5);
        assert!(note_envelope(0.125, 0.125, 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_lose_sweeps_down() {
        // Zero crossings per 50ms window drop as the pitch falls
        let buffer = lose();
        let window = sample_count(0.05, SAMPLE_RATE);
        let crossings = |start: usize| {
            buffer.samples[start..start + window]
                .windows(2)
                .filter(|w| w[0].signum() != w[1].signum())
                .count()
        };
        let early = crossings(sample_count(0.05, SAMPLE_RATE));
        let late = crossings(sample_count(0.25, SAMPLE_RATE));
        assert!(early > late, "{early} <= {late}");
    }

    #[test]
    fn test_rotate_is_deterministic() {
        assert_eq!(rotate(), rotate());
    }
}
