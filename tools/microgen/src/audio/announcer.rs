//! Announcer cues played by the game director between microgames

use super::dsp::{render, sine, soft_clip};
use super::{AudioBuffer, SAMPLE_RATE};

/// One hit of a beat pattern
struct Beat {
    start: f32,
    length: f32,
}

/// Envelope shared by the short hits: <1ms attack, sharp dip, exponential tail
fn punch_envelope(bt: f32, dip: f32, dip_end: f32, tail_level: f32, tail_rate: f32) -> f32 {
    if bt < 0.001 {
        bt / 0.001
    } else if bt < dip_end {
        1.0 - dip * ((bt - 0.001) / (dip_end - 0.001))
    } else {
        tail_level * (-tail_rate * (bt - dip_end)).exp()
    }
}

/// "3, 2, 1, GO!": four hits climbing in pitch, the last one brighter
pub fn game_start() -> AudioBuffer {
    const DURATION: f32 = 2.0;
    const BEATS: [f32; 4] = [0.0, 0.5, 1.0, 1.5];
    const BEAT_LENGTH: f32 = 0.15;

    render(DURATION, SAMPLE_RATE, 0x60, |t, noise| {
        let mut val = 0.0;

        for (idx, &start) in BEATS.iter().enumerate() {
            let bt = t - start;
            if !(0.0..BEAT_LENGTH).contains(&bt) {
                continue;
            }
            let base = 150.0 + idx as f32 * 67.0;
            let sparkle = if idx == BEATS.len() - 1 { 2.0 } else { 1.0 };

            let bass = 0.4 * sine(base, bt);
            let mid = 0.3 * sine(base * 2.0, bt);
            let high = 0.2 * sparkle * sine(base * 4.0, bt);
            let snap = 0.15 * noise.sample() * (-20.0 * bt).exp();

            let env = if bt < 0.001 {
                bt / 0.001
            } else {
                (-8.0 * bt).exp()
            };

            val = (bass + mid + high + snap) * env;
            break;
        }

        soft_clip(val, 0.7) * 0.95
    })
}

/// "DUN DUN DEN DUN DEEEN": five low hits, the last one sustained with a tail
pub fn game_over() -> AudioBuffer {
    const DURATION: f32 = 3.5;
    const BEATS: [Beat; 5] = [
        Beat { start: 0.0, length: 0.15 },
        Beat { start: 0.5, length: 0.15 },
        Beat { start: 1.0, length: 0.12 },
        Beat { start: 1.7, length: 0.15 },
        Beat { start: 2.4, length: 1.1 },
    ];
    const BASE_FREQS: [f32; 5] = [80.0, 80.0, 150.0, 70.0, 50.0];
    const FINAL: usize = 4;

    render(DURATION, SAMPLE_RATE, 0x0e4d, |t, noise| {
        let mut val = 0.0;

        for (idx, beat) in BEATS.iter().enumerate() {
            let bt = t - beat.start;
            if !(0.0..beat.length).contains(&bt) {
                continue;
            }
            let base = BASE_FREQS[idx];
            let last = idx == FINAL;

            let sub_bass = 0.5 * sine(base, bt) + 0.2 * sine(base * 0.5, bt);
            let mid = 0.4 * sine(base * 2.0, bt) + 0.3 * sine(base * 3.0, bt);
            let high = 0.2 * sine(base * 5.0, bt);
            let grit = if last { 1.5 } else { 1.0 };
            let texture = 0.15 * grit * noise.sample() * (-10.0 * bt).exp();

            let env = if !last {
                punch_envelope(bt, 0.3, 0.02, 0.7, 6.0)
            } else if bt < 0.001 {
                bt / 0.001
            } else if bt < 0.3 {
                1.0
            } else {
                1.0 - (bt - 0.3) / 0.8
            };

            val = (sub_bass + mid + high + texture) * env;

            if last && bt > 0.5 {
                let rt = bt - 0.5;
                val += 0.1 * sine(base, rt) * (-3.0 * rt).exp();
            }
            break;
        }

        soft_clip(val, 0.7) * 0.98
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::dsp::sample_count;

    #[test]
    fn test_game_start_length_and_gaps() {
        let buffer = game_start();
        assert_eq!(buffer.len(), sample_count(2.0, SAMPLE_RATE));

        // Silence between the first and second hit
        let gap = (0.3 * SAMPLE_RATE as f32) as usize;
        assert_eq!(buffer.samples[gap], 0.0);
        assert!(buffer.peak() > 0.1);
    }

    #[test]
    fn test_game_over_sustains_final_note() {
        let buffer = game_over();
        assert_eq!(buffer.len(), sample_count(3.5, SAMPLE_RATE));

        // 2.4s + 0.2s sits inside the held part of the last beat
        let held = (2.6 * SAMPLE_RATE as f32) as usize;
        let window = &buffer.samples[held..held + 2000];
        assert!(window.iter().any(|s| s.abs() > 0.1));
        assert!(buffer.samples.iter().all(|s| s.abs() < 1.0));
    }

    #[test]
    fn test_punch_envelope_shape() {
        assert_eq!(punch_envelope(0.0, 0.3, 0.02, 0.7, 6.0), 0.0);
        assert!((punch_envelope(0.001, 0.3, 0.02, 0.7, 6.0) - 1.0).abs() < 1e-5);
        assert!((punch_envelope(0.02, 0.3, 0.02, 0.7, 6.0) - 0.7).abs() < 1e-5);
    }
}
