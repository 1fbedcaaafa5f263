//! Industrial sound set for Micro Sokoban (servo, hydraulic rumble, airlock, alarm)

use super::dsp::{Waveform, oscillator, render, sine};
use super::{AudioBuffer, SAMPLE_RATE};
use std::f32::consts::PI;

/// Attack-then-linear-fade envelope
fn ramp(t: f32, attack: f32, duration: f32) -> f32 {
    if t < attack {
        t / attack
    } else {
        1.0 - (t - attack) / (duration - attack)
    }
}

/// Short servo whir: pitch arcs up and back down over the step
pub fn servo_move() -> AudioBuffer {
    const DURATION: f32 = 0.15;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let freq = 200.0 + 400.0 * (t * PI / DURATION).sin();
        let val = 0.6 * sine(freq, t) + 0.3 * sine(freq * 2.0, t);
        val * ramp(t, 0.02, DURATION)
    })
}

/// Heavy crate shove: wobbling low rumble under hiss
pub fn push() -> AudioBuffer {
    const DURATION: f32 = 0.4;

    render(DURATION, SAMPLE_RATE, 0x50_5e, |t, noise| {
        let wobble = 60.0 + 10.0 * (2.0 * PI * 15.0 * t).sin();
        let val = 0.4 * sine(wobble, t) + 0.4 * noise.sample();
        val * ramp(t, 0.05, DURATION)
    })
}

/// Airlock release: a mechanical clunk followed by a rising three-note chime
pub fn airlock_win() -> AudioBuffer {
    const DURATION: f32 = 1.0;
    const CLUNK: f32 = 0.2;
    const CHIME: [f32; 3] = [440.0, 554.0, 659.0];

    render(DURATION, SAMPLE_RATE, 0xa1_7b, |t, noise| {
        let mut val = 0.0;

        if t < CLUNK {
            let freq = 100.0 * (1.0 - t / CLUNK);
            val += 0.5 * (noise.sample() * 0.5 + sine(freq, t));
        } else {
            let tc = t - CLUNK;
            for (j, &freq) in CHIME.iter().enumerate() {
                let offset = j as f32 * 0.1;
                if tc > offset {
                    let tn = tc - offset;
                    val += 0.2 * sine(freq, tn) * (-3.0 * tn).exp();
                }
            }
        }
        val
    })
}

/// Falling square-wave alarm pulsing ten times a second
pub fn alarm_lose() -> AudioBuffer {
    const DURATION: f32 = 0.8;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let freq = (800.0 * (1.0 - t / DURATION)).max(50.0);
        let pulse = if (t * 10.0) as u32 % 2 == 0 { 1.0 } else { 0.2 };
        0.5 * oscillator(freq, t, Waveform::Square) * pulse * (1.0 - t / DURATION)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::dsp::sample_count;

    #[test]
    fn test_durations() {
        assert_eq!(servo_move().len(), sample_count(0.15, SAMPLE_RATE));
        assert_eq!(push().len(), sample_count(0.4, SAMPLE_RATE));
        assert_eq!(airlock_win().len(), sample_count(1.0, SAMPLE_RATE));
        assert_eq!(alarm_lose().len(), sample_count(0.8, SAMPLE_RATE));
    }

    #[test]
    fn test_ramp_envelope() {
        assert_eq!(ramp(0.0, 0.02, 0.15), 0.0);
        assert!((ramp(0.02, 0.02, 0.15) - 1.0).abs() < 1e-6);
        assert!(ramp(0.15, 0.02, 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_alarm_pulses() {
        let buffer = alarm_lose();
        // 0.05s is in a loud slot, 0.15s in a quiet one
        let loud = (0.05 * SAMPLE_RATE as f32) as usize;
        let quiet = (0.15 * SAMPLE_RATE as f32) as usize;
        let window = 400;
        let peak = |start: usize| {
            buffer.samples[start..start + window]
                .iter()
                .fold(0.0f32, |m, s| m.max(s.abs()))
        };
        assert!(peak(loud) > 0.4);
        assert!(peak(quiet) < 0.1);
    }

    #[test]
    fn test_sounds_stay_in_range() {
        for buffer in [servo_move(), push(), airlock_win(), alarm_lose()] {
            assert!(buffer.samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        }
    }

    #[test]
    fn test_push_is_deterministic() {
        assert_eq!(push(), push());
    }
}
