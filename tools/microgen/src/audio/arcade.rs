//! Game-specific arcade sounds: Flappy Bird, Money Grabber and the sample game
//!
//! Lighter than the shared library presets: plain sine stacks with a simple
//! decay, no soft clipping.

use super::dsp::{render, sine};
use super::{AudioBuffer, SAMPLE_RATE};

/// Wing flap: short upward sweep with a 10ms attack
pub fn flap() -> AudioBuffer {
    const DURATION: f32 = 0.12;
    const ATTACK: f32 = 0.01;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let freq = 300.0 + 300.0 * t / DURATION;
        let val = 0.6 * sine(freq, t) + 0.2 * sine(freq * 2.0, t);
        let env = if t < ATTACK {
            t / ATTACK
        } else {
            1.0 - (t - ATTACK) / (DURATION - ATTACK)
        };
        val * env
    })
}

/// Bell-like A5 ping for clearing a pipe
pub fn pipe_pass() -> AudioBuffer {
    const DURATION: f32 = 0.2;
    const FREQ: f32 = 880.0;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let val = 0.5 * sine(FREQ, t) + 0.2 * sine(FREQ * 2.0, t) + 0.1 * sine(FREQ * 3.0, t);
        val * (-8.0 * t).exp()
    })
}

/// Small coin: falls from 600Hz to 400Hz and fades linearly
pub fn coin_low() -> AudioBuffer {
    const DURATION: f32 = 0.15;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let freq = 400.0 + 200.0 * (1.0 - t / DURATION);
        let val = 0.5 * sine(freq, t) + 0.2 * sine(freq * 2.0, t);
        val * (1.0 - t / DURATION)
    })
}

/// Medium coin: brighter sweep from 900Hz to 600Hz
pub fn coin_mid() -> AudioBuffer {
    const DURATION: f32 = 0.18;

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let freq = 600.0 + 300.0 * (1.0 - t / DURATION);
        let val = 0.6 * sine(freq, t) + 0.25 * sine(freq * 2.0, t) + 0.1 * sine(freq * 3.0, t);
        val * (-6.0 * t).exp()
    })
}

/// Big coin: C major triad
pub fn coin_high() -> AudioBuffer {
    const DURATION: f32 = 0.25;
    const CHORD: [f32; 3] = [523.0, 659.0, 784.0];

    render(DURATION, SAMPLE_RATE, 0, |t, _| {
        let val: f32 = CHORD.iter().map(|&freq| 0.3 * sine(freq, t)).sum();
        val * (-5.0 * t).exp()
    })
}

/// Punchy hit: low body, a falling click and a burst of noise
pub fn punch() -> AudioBuffer {
    const DURATION: f32 = 0.15;
    const ATTACK: f32 = 0.005;

    render(DURATION, SAMPLE_RATE, 0x0417, |t, noise| {
        let mut val = 0.4 * sine(120.0, t);
        val += 0.3 * sine(2000.0 * (-40.0 * t).exp(), t);
        val += 0.2 * noise.sample() * (-20.0 * t).exp();

        let env = if t < ATTACK {
            t / ATTACK
        } else {
            (-12.0 * (t - ATTACK)).exp()
        };
        val * env
    })
}
