//! Waveform primitives (spec.md §4.1).
//!
//! Each primitive takes `frequency`, `duration` and `volume` and returns a
//! fresh mono buffer of length `round(duration * SAMPLE_RATE)`. Phase is
//! computed from the sample index; no primitive carries state between
//! calls.

use crate::SAMPLE_RATE;

fn num_samples(duration: f64) -> usize {
    (duration * SAMPLE_RATE as f64).round() as usize
}

fn frac(x: f64) -> f64 {
    x - x.floor()
}

/// `v * sin(2*pi*f*n/SR)`.
pub fn sine(frequency: f64, duration: f64, volume: f64) -> Vec<f32> {
    let n = num_samples(duration);
    (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            (volume * (2.0 * std::f64::consts::PI * frequency * t).sin()) as f32
        })
        .collect()
}

/// Naive sawtooth: `v * (2*frac(f*t) - 1)`. Aliasing is accepted by design.
pub fn saw(frequency: f64, duration: f64, volume: f64) -> Vec<f32> {
    let n = num_samples(duration);
    (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            (volume * (2.0 * frac(frequency * t) - 1.0)) as f32
        })
        .collect()
}

/// Pulse wave with duty cycle: `v` while `frac(f*t) < duty`, else `-v`.
pub fn square(frequency: f64, duration: f64, volume: f64, duty: f64) -> Vec<f32> {
    let n = num_samples(duration);
    (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            let v = if frac(frequency * t) < duty {
                volume
            } else {
                -volume
            };
            v as f32
        })
        .collect()
}

/// White noise drawn from the given RNG, length `round(duration * SR)`.
pub fn white_noise(duration: f64, volume: f64, rng: &mut impl rand::Rng) -> Vec<f32> {
    let n = num_samples(duration);
    (0..n)
        .map(|_| (volume * rng.gen_range(-1.0..=1.0)) as f32)
        .collect()
}
