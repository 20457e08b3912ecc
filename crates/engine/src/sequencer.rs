//! Pattern sequencer: scatters one-shot voice buffers onto a sample
//! timeline according to a `{0,1}` step pattern (spec.md §4.3).
//!
//! Per DESIGN NOTES §9, iteration is bounded: we walk `i` while
//! `i * step_size <= num_samples`, never an unbounded `while true`.

/// Sixteenth-note step size in samples, given tempo.
pub fn sixteenth_step_samples(tempo_bpm: f64, sample_rate: u32) -> usize {
    (15.0 * sample_rate as f64 / tempo_bpm).round() as usize
}

/// Quarter-note step size in samples, given tempo.
pub fn quarter_step_samples(tempo_bpm: f64, sample_rate: u32) -> usize {
    (60.0 * sample_rate as f64 / tempo_bpm).round() as usize
}

/// Scatters `voice` onto a fresh buffer of `num_samples` length, one copy
/// per `1` in `pattern` (`pattern[i % pattern.len()]`), starting at sample
/// `i * step_size`. Truncates a voice that would run past the end of the
/// buffer. If `swing_amount > 0`, every odd step is delayed by
/// `swing_amount * step_size / 2` samples.
pub fn scatter(
    pattern: &[u8],
    voice: &[f32],
    step_size: usize,
    num_samples: usize,
    swing_amount: f64,
) -> Vec<f32> {
    let mut out = vec![0.0f32; num_samples];
    if pattern.is_empty() || step_size == 0 {
        return out;
    }

    let swing_delay = (swing_amount.clamp(0.0, 1.0) * step_size as f64 / 2.0).round() as usize;

    let mut i = 0usize;
    loop {
        let base_start = i * step_size;
        if base_start >= num_samples {
            break;
        }
        if pattern[i % pattern.len()] == 1 {
            let start = if i % 2 == 1 {
                base_start + swing_delay
            } else {
                base_start
            };
            if start < num_samples {
                let available = num_samples - start;
                let len = voice.len().min(available);
                for (j, &s) in voice.iter().take(len).enumerate() {
                    out[start + j] += s;
                }
            }
        }
        i += 1;
    }

    out
}
