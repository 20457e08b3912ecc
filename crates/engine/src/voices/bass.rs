//! Bass voices, rendered per chord bar over a 4-bar root progression
//! (spec.md §4.2).

use crate::synthesis::envelope::adsr;
use crate::synthesis::waveform::{saw, sine, square};
use crate::util::exp_decay;
use crate::SAMPLE_RATE;

/// Which bass style to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BassStyle {
    Moog,
    Sequenced,
    Driving,
    Synth,
}

impl BassStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "sequenced" => BassStyle::Sequenced,
            "driving" => BassStyle::Driving,
            "synth" => BassStyle::Synth,
            _ => BassStyle::Moog,
        }
    }
}

fn n_samples(duration: f64) -> usize {
    (duration * SAMPLE_RATE as f64).round() as usize
}

/// `bass_moog`: three detuned saws averaged, filter-enveloped, plus 30%
/// sub-octave sine, wrapped in a 5ms/150ms/0.65/250ms ADSR at 0.4 gain.
fn bar_moog(root: f64, bar_duration: f64) -> Vec<f32> {
    let n = n_samples(bar_duration);
    let a = saw(root * 0.998, bar_duration, 1.0);
    let b = saw(root, bar_duration, 1.0);
    let c = saw(root * 1.002, bar_duration, 1.0);

    let filter_env: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            0.3 + 0.4 * (-5.0 * t).exp()
        })
        .collect();

    let sub = sine(root / 2.0, bar_duration, 1.0);
    let env = adsr(0.005, 0.15, 0.65, 0.25, n);

    (0..n)
        .map(|i| {
            let mixed = (a[i] + b[i] + c[i]) / 3.0;
            let filtered = mixed as f64 * filter_env[i];
            let with_sub = filtered + sub[i] as f64 * 0.3;
            (with_sub * env[i] as f64 * 0.4) as f32
        })
        .collect()
}

/// `bass_sequenced`: 16th-note pattern of duty-0.25 pulses at the chord
/// root, each shaped by `e^(-20t)` with a slight downward pitch bend.
fn bar_sequenced(root: f64, bar_duration: f64, tempo_bpm: f64) -> Vec<f32> {
    let sixteenth = 15.0 * SAMPLE_RATE as f64 / tempo_bpm;
    let step_samples = sixteenth.round() as usize;
    let total = n_samples(bar_duration);
    let mut out = vec![0.0f32; total];

    let mut pos = 0usize;
    while pos < total {
        let note_len = step_samples.min(total - pos);
        let note_duration = note_len as f64 / SAMPLE_RATE as f64;
        // Slight downward pitch bend across the note.
        let bend_end = root * 0.96;
        let mut phase = 0.0f64;
        let env = exp_decay(20.0, note_len);
        for i in 0..note_len {
            let frac = i as f64 / note_len.max(1) as f64;
            let f = root + (bend_end - root) * frac;
            let duty = 0.25;
            let cycle = (phase / (2.0 * std::f64::consts::PI)).fract();
            let v = if cycle < duty { 1.0 } else { -1.0 };
            out[pos + i] = (v * env[i] as f64) as f32;
            phase += 2.0 * std::f64::consts::PI * f / SAMPLE_RATE as f64;
        }
        let _ = note_duration;
        pos += step_samples.max(1);
    }

    out
}

/// `bass_driving`: 8th-note sine notes with `e^(-8t)` envelope.
fn bar_driving(root: f64, bar_duration: f64, tempo_bpm: f64) -> Vec<f32> {
    let eighth = 30.0 * SAMPLE_RATE as f64 / tempo_bpm;
    let step_samples = eighth.round() as usize;
    let total = n_samples(bar_duration);
    let mut out = vec![0.0f32; total];

    let mut pos = 0usize;
    while pos < total {
        let note_len = step_samples.min(total - pos);
        let note_duration = note_len as f64 / SAMPLE_RATE as f64;
        let tone = sine(root, note_duration, 1.0);
        let env = exp_decay(8.0, note_len);
        for i in 0..note_len {
            out[pos + i] = tone[i] * env[i];
        }
        pos += step_samples.max(1);
    }

    out
}

/// `bass_synth`: sine + half-amplitude 2nd harmonic, linear decay 1->0.6
/// across the bar.
fn bar_synth(root: f64, bar_duration: f64) -> Vec<f32> {
    let n = n_samples(bar_duration);
    let fundamental = sine(root, bar_duration, 1.0);
    let harmonic = sine(root * 2.0, bar_duration, 0.5);

    (0..n)
        .map(|i| {
            let frac = i as f64 / n.max(1) as f64;
            let decay = 1.0 - 0.4 * frac;
            ((fundamental[i] + harmonic[i]) as f64 * decay) as f32
        })
        .collect()
}

/// Renders the full bass track across the 4-bar root progression,
/// concatenating one bar's buffer per root frequency.
pub fn render(style: BassStyle, chord_roots: &[f64], tempo_bpm: f64, beats_per_bar: f64) -> Vec<f32> {
    let bar_duration = beats_per_bar * 60.0 / tempo_bpm;
    let mut out = Vec::new();
    for &root in chord_roots {
        let bar = match style {
            BassStyle::Moog => bar_moog(root, bar_duration),
            BassStyle::Sequenced => bar_sequenced(root, bar_duration, tempo_bpm),
            BassStyle::Driving => bar_driving(root, bar_duration, tempo_bpm),
            BassStyle::Synth => bar_synth(root, bar_duration),
        };
        out.extend(bar);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moog_bass_is_nonzero_and_bounded() {
        let buf = render(BassStyle::Moog, &[110.0, 110.0, 110.0, 110.0], 120.0, 4.0);
        assert!(buf.iter().any(|&x| x.abs() > 1e-6));
        assert!(buf.iter().all(|&x| x.abs() <= 1.0));
    }

    #[test]
    fn render_concatenates_one_segment_per_chord() {
        let one_bar = render(BassStyle::Synth, &[110.0], 120.0, 4.0);
        let four_bars = render(BassStyle::Synth, &[110.0, 110.0, 110.0, 110.0], 120.0, 4.0);
        assert_eq!(four_bars.len(), one_bar.len() * 4);
    }

    #[test]
    fn sequenced_bass_has_full_bar_length() {
        let buf = render(BassStyle::Sequenced, &[110.0], 120.0, 4.0);
        let expected = (4.0 * 60.0 / 120.0 * SAMPLE_RATE as f64).round() as usize;
        assert_eq!(buf.len(), expected);
    }
}
