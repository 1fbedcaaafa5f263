//! Shared microgame sound library
//!
//! Punchy, layered effects tuned for small speakers: a tonal body with a few
//! harmonics, a noise transient for attack definition, an exponential or
//! piecewise envelope and a final soft clip. Each preset owns a fixed noise
//! seed, so every render is byte-identical.

use super::dsp::{Waveform, oscillator, render, sine, soft_clip};
use super::{AudioBuffer, SAMPLE_RATE};

/// Value tier for collection sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// Minor third, A3 -> C#4
    Low,
    /// Major third, E4 -> G#4
    Mid,
    /// Major triad, A4 C#5 E5
    High,
}

impl Pitch {
    fn notes(self) -> &'static [f32] {
        match self {
            Pitch::Low => &[220.0, 277.0],
            Pitch::Mid => &[330.0, 415.0],
            Pitch::High => &[440.0, 554.0, 659.0],
        }
    }
}

/// Jump/flap: bright upward sweep with a noise snap
pub fn jump() -> AudioBuffer {
    const DURATION: f32 = 0.12;
    render(DURATION, SAMPLE_RATE, 0x4a55, |t, noise| {
        let freq = 300.0 + 600.0 * (t / DURATION);

        let mut val = 0.5 * sine(freq, t);
        val += 0.25 * sine(freq * 2.0, t);
        val += 0.15 * sine(freq * 3.0, t);
        val += 0.1 * sine(freq * 5.0, t);
        val += 0.2 * noise.sample() * (-40.0 * t).exp();

        soft_clip(val * (-12.0 * t).exp(), 0.75)
    })
}

/// Collection chime; higher tiers stack more notes
pub fn collect(pitch: Pitch) -> AudioBuffer {
    const DURATION: f32 = 0.15;
    let notes = pitch.notes();
    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let mut val = 0.0;
        for (idx, &freq) in notes.iter().enumerate() {
            // Staggered attacks
            let start = idx as f32 * 0.01;
            if t >= start {
                let nt = t - start;
                val += 0.3 * sine(freq, nt);
                val += 0.15 * sine(freq * 2.0, nt);
                val += 0.08 * sine(freq * 3.0, nt);
            }
        }
        soft_clip(val * (-10.0 * t).exp(), 0.8)
    })
}

pub fn collect_low() -> AudioBuffer {
    collect(Pitch::Low)
}

pub fn collect_mid() -> AudioBuffer {
    collect(Pitch::Mid)
}

pub fn collect_high() -> AudioBuffer {
    collect(Pitch::High)
}

/// Impact: dropping thump, high click and a noise snap
pub fn hit() -> AudioBuffer {
    const DURATION: f32 = 0.08;
    render(DURATION, SAMPLE_RATE, 0x4817, |t, noise| {
        let thump = 150.0 - 100.0 * (t / DURATION);

        let mut val = 0.5 * sine(thump, t);
        val += 0.3 * sine(thump * 2.0, t);
        val += 0.15 * sine(2000.0, t) * (-50.0 * t).exp();
        val += 0.4 * noise.sample() * (-60.0 * t).exp();

        soft_clip(val * (-30.0 * t).exp(), 0.7)
    })
}

/// Victory fanfare: ascending C major arpeggio with a shimmer on the top note
pub fn win() -> AudioBuffer {
    const DURATION: f32 = 1.2;
    const NOTES: [(f32, f32); 4] = [(262.0, 0.0), (330.0, 0.2), (392.0, 0.4), (523.0, 0.6)];
    const NOTE_LENGTH: f32 = 0.4;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let mut val = 0.0;
        for &(freq, start) in &NOTES {
            let nt = t - start;
            if (0.0..NOTE_LENGTH).contains(&nt) {
                val += 0.25 * sine(freq, nt);
                val += 0.15 * sine(freq * 2.0, nt);
                val += 0.10 * sine(freq * 3.0, nt);
                val += 0.05 * sine(freq * 4.0, nt);
                // Bell decay is applied to the running mix, so overlapping
                // notes duck the earlier ones
                val *= (-4.0 * nt).exp();
            }
        }

        if t > 0.6 {
            let st = t - 0.6;
            val += 0.15 * sine(2000.0, st) * (-5.0 * st).exp();
            val += 0.10 * sine(2500.0, st) * (-6.0 * st).exp();
        }

        soft_clip(val, 0.8)
    })
}

/// Failure buzzer: descending E D C in square waves over a sub octave
pub fn lose() -> AudioBuffer {
    const DURATION: f32 = 0.9;
    const NOTES: [(f32, f32); 3] = [(330.0, 0.0), (294.0, 0.2), (262.0, 0.4)];
    const NOTE_LENGTH: f32 = 0.3;

    render(DURATION, SAMPLE_RATE, 0x1053, |t, noise| {
        let mut val = 0.0;
        for &(freq, start) in &NOTES {
            let nt = t - start;
            if (0.0..NOTE_LENGTH).contains(&nt) {
                val += 0.3 * oscillator(freq, nt, Waveform::Square);
                val += 0.2 * sine(freq * 0.5, nt);
                val *= (-5.0 * nt).exp();
            }
        }

        if t < 0.1 {
            val += 0.1 * noise.sample() * (1.0 - t / 0.1);
        }

        soft_clip(val, 0.75)
    })
}

/// Step: short soft rise with a tiny click
pub fn step() -> AudioBuffer {
    const DURATION: f32 = 0.08;
    render(DURATION, SAMPLE_RATE, 0x3073, |t, noise| {
        let freq = 400.0 + 200.0 * (t / DURATION);

        let mut val = 0.4 * sine(freq, t);
        val += 0.2 * sine(freq * 2.0, t);
        val += 0.15 * noise.sample() * (-80.0 * t).exp();

        val * (-25.0 * t).exp()
    })
}

/// Checkpoint: overlapping C5 -> G5 perfect fifth
pub fn pass() -> AudioBuffer {
    const DURATION: f32 = 0.2;
    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let mut val = 0.0;

        if t < 0.1 {
            val += 0.3 * sine(523.0, t);
            val += 0.15 * sine(1046.0, t);
            val *= (-15.0 * t).exp();
        }

        if t >= 0.08 {
            let t2 = t - 0.08;
            let tone = 0.35 * sine(784.0, t2) + 0.15 * sine(1568.0, t2);
            val += tone * (-12.0 * t2).exp();
        }

        soft_clip(val, 0.8)
    })
}

/// Director countdown: three fast "DUN" hits with rising pitch and
/// noise whooshes between them
pub fn countdown() -> AudioBuffer {
    const DURATION: f32 = 1.0;
    const BEATS: [f32; 3] = [0.0, 0.3, 0.6];
    const BEAT_LENGTH: f32 = 0.12;

    render(DURATION, SAMPLE_RATE, 0xc0de, |t, noise| {
        let mut val = 0.0;

        for (idx, &start) in BEATS.iter().enumerate() {
            let bt = t - start;
            if !(0.0..BEAT_LENGTH).contains(&bt) {
                continue;
            }
            let base = 80.0 + idx as f32 * 20.0;

            let sub_bass = 0.6 * sine(base, bt) + 0.3 * sine(base * 0.5, bt);

            let mid = base * 2.0;
            let mid_punch =
                0.5 * sine(mid, bt) + 0.3 * sine(mid * 1.5, bt) + 0.2 * sine(mid * 2.0, bt);

            let high = 3000.0 + idx as f32 * 500.0;
            let high_snap = 0.4 * sine(high, bt) + 0.25 * sine(high * 1.3, bt);

            let noise_burst = 0.5 * noise.sample() * (-50.0 * bt).exp();
            let texture = 0.2 * noise.sample() * (-10.0 * bt).exp();

            let glitch = if noise.unit() > 0.7 {
                0.15 * sine(noise.range(2000.0, 5000.0), bt)
            } else {
                0.0
            };

            let env = if bt < 0.001 {
                bt / 0.001
            } else if bt < 0.015 {
                1.0 - 0.3 * ((bt - 0.001) / 0.014)
            } else {
                0.7 * (-12.0 * (bt - 0.015)).exp()
            };

            val = (sub_bass + mid_punch + high_snap + noise_burst + texture + glitch) * env;
            val *= 1.0 - (bt / BEAT_LENGTH) * 0.12;

            // Last hit clips harder
            let threshold = if idx == BEATS.len() - 1 { 0.65 } else { 0.7 };
            val = soft_clip(val, threshold);
            break;
        }

        for pair in BEATS.windows(2) {
            let whoosh_start = pair[0] + BEAT_LENGTH;
            let span = pair[1] - whoosh_start;
            let wt = t - whoosh_start;
            if (0.0..span).contains(&wt) {
                let progress = wt / span;
                let freq = 1000.0 + 2000.0 * progress;
                let whoosh = 0.08 * noise.sample() * sine(freq, wt);
                let env = if progress < 0.3 {
                    progress / 0.3
                } else {
                    1.0 - (progress - 0.3) / 0.7
                };
                val += whoosh * env;
            }
        }

        soft_clip(val, 0.6) * 0.98
    })
}

/// Shot: falling square body with a high crack
pub fn shoot() -> AudioBuffer {
    const DURATION: f32 = 0.12;
    render(DURATION, SAMPLE_RATE, 0x5407, |t, noise| {
        let freq = 600.0 - 400.0 * (t / DURATION);

        let mut val = 0.4 * oscillator(freq, t, Waveform::Square);
        val += 0.2 * sine(freq * 1.5, t);
        val += 0.2 * sine(3000.0, t) * (-50.0 * t).exp();
        val += 0.3 * noise.sample() * (-40.0 * t).exp();

        soft_clip(val * (-15.0 * t).exp(), 0.7)
    })
}

/// Explosion: low rumble, square punch, dense noise and early crackle
pub fn explosion() -> AudioBuffer {
    const DURATION: f32 = 0.4;
    render(DURATION, SAMPLE_RATE, 0xb00e, |t, noise| {
        let rumble = 80.0 - 30.0 * (t / DURATION);

        let mut val = 0.4 * sine(rumble, t);
        val += 0.3 * oscillator(rumble * 2.0, t, Waveform::Square);

        let noise_amount = if t < 0.05 { 0.6 } else { 0.3 };
        val += noise_amount * noise.sample();

        if t < 0.1 {
            val += 0.2 * sine(4000.0 + noise.range(-500.0, 500.0), t);
        }

        let env = if t < 0.01 {
            t / 0.01
        } else if t < 0.05 {
            1.0
        } else {
            1.0 - (t - 0.05) / (DURATION - 0.05)
        };

        soft_clip(val * env, 0.65)
    })
}

/// Button: two-part click, press then release
pub fn button() -> AudioBuffer {
    const DURATION: f32 = 0.05;
    render(DURATION, SAMPLE_RATE, 0xb777, |t, noise| {
        let val = if t < 0.02 {
            0.5 * sine(800.0, t) + 0.3 * noise.sample() * (-100.0 * t).exp()
        } else {
            let t2 = t - 0.02;
            0.4 * sine(400.0, t2) + 0.2 * noise.sample() * (-100.0 * t2).exp()
        };
        val * (-50.0 * t).exp()
    })
}
