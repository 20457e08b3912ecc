//! Lead voice: a fixed 16-step melody pattern over the current scale
//! (spec.md §4.2).

use crate::synthesis::waveform::square;
use crate::util::exp_decay;
use crate::SAMPLE_RATE;

/// Scale-degree indices (into an 8-note scale array) for the lead melody.
pub const LEAD_PATTERN: [usize; 16] = [0, 2, 4, 2, 0, 2, 4, 5, 4, 2, 0, 2, 4, 7, 4, 0];

/// Renders the lead track: 16 steps per bar, each a square-wave pluck
/// (`e^(-20t)`) at `scale[pattern[step] % len]`, gain 0.12, repeated across
/// `num_bars` bars.
pub fn render(scale: &[f64], tempo_bpm: f64, beats_per_bar: f64, num_bars: usize) -> Vec<f32> {
    let sixteenth = 15.0 * SAMPLE_RATE as f64 / tempo_bpm;
    let step_samples = sixteenth.round() as usize;
    let bar_samples = (beats_per_bar * 60.0 / tempo_bpm * SAMPLE_RATE as f64).round() as usize;
    let total = bar_samples * num_bars;
    let mut out = vec![0.0f32; total];

    let mut pos = 0usize;
    let mut step_idx = 0usize;
    while pos < total {
        let degree = LEAD_PATTERN[step_idx % LEAD_PATTERN.len()];
        let freq = scale[degree % scale.len()];
        let note_len = step_samples.min(total - pos);
        let note_duration = note_len as f64 / SAMPLE_RATE as f64;
        let tone = square(freq, note_duration, 0.12, 0.5);
        let env = exp_decay(20.0, note_len);
        for i in 0..note_len {
            out[pos + i] += tone[i] * env[i];
        }
        pos += step_samples.max(1);
        step_idx += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_pattern_has_sixteen_steps() {
        assert_eq!(LEAD_PATTERN.len(), 16);
    }

    #[test]
    fn render_is_nonzero() {
        let scale = vec![220.0, 246.94, 261.63, 293.66, 329.63, 349.23, 392.0, 440.0];
        let buf = render(&scale, 120.0, 4.0, 4);
        assert!(buf.iter().any(|&x| x.abs() > 1e-6));
    }
}
