//! Arpeggiator voice: an artist-supplied scale-degree pattern, square wave
//! with a `e^(-20t)` pluck envelope, gain 0.08 (spec.md §4.2).

use crate::synthesis::waveform::square;
use crate::util::exp_decay;
use crate::SAMPLE_RATE;

/// Renders the arpeggio track given the artist's pattern (scale-degree
/// indices) over `num_bars` bars of 16th notes.
pub fn render(pattern: &[usize], scale: &[f64], tempo_bpm: f64, beats_per_bar: f64, num_bars: usize) -> Vec<f32> {
    if pattern.is_empty() || scale.is_empty() {
        return Vec::new();
    }

    let sixteenth = 15.0 * SAMPLE_RATE as f64 / tempo_bpm;
    let step_samples = sixteenth.round() as usize;
    let bar_samples = (beats_per_bar * 60.0 / tempo_bpm * SAMPLE_RATE as f64).round() as usize;
    let total = bar_samples * num_bars;
    let mut out = vec![0.0f32; total];

    let mut pos = 0usize;
    let mut step_idx = 0usize;
    while pos < total {
        let degree = pattern[step_idx % pattern.len()];
        let freq = scale[degree % scale.len()];
        let note_len = step_samples.min(total - pos);
        let note_duration = note_len as f64 / SAMPLE_RATE as f64;
        let tone = square(freq, note_duration, 0.08, 0.5);
        let env = exp_decay(20.0, note_len);
        for i in 0..note_len {
            out[pos + i] += tone[i] * env[i];
        }
        pos += step_samples.max(1);
        step_idx += 1;
    }

    out
}
