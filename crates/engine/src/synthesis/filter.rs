//! Simple one-pole filters (spec.md §4.1).
//!
//! These are intentionally not DSP-grade (spec.md Non-goals): a one-pole
//! IIR low-pass and a first-difference-style high-pass approximation,
//! matching the teacher's `filter.rs` family in spirit but trimmed to the
//! two shapes the synth engine's voices actually need.

/// One-pole IIR low-pass: `y[i] = c*x[i] + (1-c)*y[i-1]`, `y[0] = x[0]`.
/// Lower `c` means more filtering.
pub fn lowpass(input: &[f32], c: f64) -> Vec<f32> {
    if input.is_empty() {
        return Vec::new();
    }
    let c = c.clamp(0.0, 1.0);
    let mut out = Vec::with_capacity(input.len());
    out.push(input[0]);
    for i in 1..input.len() {
        let y = c * input[i] as f64 + (1.0 - c) * out[i - 1] as f64;
        out.push(y as f32);
    }
    out
}

/// Approximate first-difference high-pass: `x - lowpass(x, c) * 0.8`.
pub fn highpass(input: &[f32], c: f64) -> Vec<f32> {
    let low = lowpass(input, c);
    input
        .iter()
        .zip(low.iter())
        .map(|(&x, &y)| x - y * 0.8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowpass_preserves_first_sample() {
        let input = vec![1.0, 0.5, -0.5, 0.0];
        let out = lowpass(&input, 0.3);
        assert_eq!(out[0], input[0]);
    }

    #[test]
    fn lowpass_smooths_a_step() {
        let mut input = vec![0.0f32; 50];
        input.extend(vec![1.0f32; 50]);
        let out = lowpass(&input, 0.1);
        // Heavily filtered: right after the step the output should still
        // be far from the new level.
        assert!(out[51] < 0.5);
    }

    #[test]
    fn highpass_attenuates_dc() {
        let input = vec![1.0f32; 1000];
        let out = highpass(&input, 0.3);
        // A constant signal has no high-frequency content once settled.
        assert!(out[999].abs() < 0.3);
    }
}
