//! Chord pad voices: six timbral styles, each rendered per 1-bar triad and
//! concatenated across the track's 4-chord progression (spec.md §4.2).

use crate::synthesis::filter::lowpass;
use crate::synthesis::waveform::{saw, sine};
use crate::SAMPLE_RATE;

/// Which pad style to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadStyle {
    DarkAnalog,
    BrightDigitalFm,
    WarmAnalog,
    MetallicRingMod,
    Orchestral,
    CleanSine,
}

impl PadStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "bright_digital_fm" => PadStyle::BrightDigitalFm,
            "warm_analog" => PadStyle::WarmAnalog,
            "metallic_ring_mod" => PadStyle::MetallicRingMod,
            "orchestral" => PadStyle::Orchestral,
            "clean_sine" => PadStyle::CleanSine,
            _ => PadStyle::DarkAnalog,
        }
    }
}

fn n_samples(duration: f64) -> usize {
    (duration * SAMPLE_RATE as f64).round() as usize
}

fn times(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / SAMPLE_RATE as f64).collect()
}

/// Triple detuned saws, filter-enveloped `0.3 + 0.4*e^(-0.5t)`.
fn voice_dark_analog(f: f64, duration: f64) -> Vec<f32> {
    let n = n_samples(duration);
    let a = saw(f * 0.997, duration, 1.0);
    let b = saw(f, duration, 1.0);
    let c = saw(f * 1.003, duration, 1.0);
    let t = times(n);
    (0..n)
        .map(|i| {
            let env = 0.3 + 0.4 * (-0.5 * t[i]).exp();
            (((a[i] + b[i] + c[i]) / 3.0) as f64 * env) as f32
        })
        .collect()
}

/// 2-operator FM: modulator `2.01*f`, index `2*e^(-1.5t)`; plus inharmonic
/// partials at `2.76f` and `5.40f` decaying `e^(-3t)` / `e^(-5t)`.
fn voice_bright_digital_fm(f: f64, duration: f64) -> Vec<f32> {
    let n = n_samples(duration);
    let t = times(n);
    let modulator_freq = 2.01 * f;

    (0..n)
        .map(|i| {
            let ti = t[i];
            let index = 2.0 * (-1.5 * ti).exp();
            let carrier_phase = 2.0 * std::f64::consts::PI * f * ti;
            let mod_phase = 2.0 * std::f64::consts::PI * modulator_freq * ti;
            let fm = (carrier_phase + index * mod_phase.sin()).sin();

            let partial_a = (2.0 * std::f64::consts::PI * 2.76 * f * ti).sin() * (-3.0 * ti).exp();
            let partial_b = (2.0 * std::f64::consts::PI * 5.40 * f * ti).sin() * (-5.0 * ti).exp();

            (fm + partial_a + partial_b) as f32
        })
        .collect()
}

/// Two detuned saws (0.999/1.001) averaged, plus 2nd harmonic sine at 0.2.
fn voice_warm_analog(f: f64, duration: f64) -> Vec<f32> {
    let n = n_samples(duration);
    let a = saw(f * 0.999, duration, 1.0);
    let b = saw(f * 1.001, duration, 1.0);
    let harmonic = sine(f * 2.0, duration, 0.2);
    (0..n).map(|i| (a[i] + b[i]) / 2.0 + harmonic[i]).collect()
}

/// `sin(2*pi*f*t) * sin(2*pi*1.414f*t) + 0.3*sin(2*pi*3.14f*t)`.
fn voice_metallic_ring_mod(f: f64, duration: f64) -> Vec<f32> {
    let n = n_samples(duration);
    let t = times(n);
    (0..n)
        .map(|i| {
            let ti = t[i];
            let carrier = (2.0 * std::f64::consts::PI * f * ti).sin();
            let ring = (2.0 * std::f64::consts::PI * 1.414 * f * ti).sin();
            let extra = (2.0 * std::f64::consts::PI * 3.14 * f * ti).sin() * 0.3;
            (carrier * ring + extra) as f32
        })
        .collect()
}

/// Filtered sawtooth blended with sine (0.4/0.6), squared linear attack
/// over 300 ms.
fn voice_orchestral(f: f64, duration: f64) -> Vec<f32> {
    let n = n_samples(duration);
    let raw_saw = saw(f, duration, 1.0);
    let filtered = lowpass(&raw_saw, 0.15);
    let tone = sine(f, duration, 1.0);
    let attack_n = n_samples(0.3).min(n);

    (0..n)
        .map(|i| {
            let blended = filtered[i] * 0.4 + tone[i] * 0.6;
            if i < attack_n {
                let frac = i as f64 / attack_n.max(1) as f64;
                blended * (frac * frac) as f32
            } else {
                blended
            }
        })
        .collect()
}

/// Pure sine per voice.
fn voice_clean_sine(f: f64, duration: f64) -> Vec<f32> {
    sine(f, duration, 1.0)
}

fn per_voice_gain(style: PadStyle) -> f64 {
    match style {
        PadStyle::DarkAnalog => 0.08,
        PadStyle::BrightDigitalFm => 0.07,
        PadStyle::WarmAnalog => 0.09,
        PadStyle::MetallicRingMod => 0.06,
        PadStyle::Orchestral => 0.08,
        PadStyle::CleanSine => 0.08,
    }
}

fn render_voice(style: PadStyle, f: f64, duration: f64) -> Vec<f32> {
    match style {
        PadStyle::DarkAnalog => voice_dark_analog(f, duration),
        PadStyle::BrightDigitalFm => voice_bright_digital_fm(f, duration),
        PadStyle::WarmAnalog => voice_warm_analog(f, duration),
        PadStyle::MetallicRingMod => voice_metallic_ring_mod(f, duration),
        PadStyle::Orchestral => voice_orchestral(f, duration),
        PadStyle::CleanSine => voice_clean_sine(f, duration),
    }
}

fn bar(style: PadStyle, triad: [f64; 3], bar_duration: f64) -> Vec<f32> {
    let n = n_samples(bar_duration);
    let gain = per_voice_gain(style);
    let mut out = vec![0.0f32; n];
    for &pitch in &triad {
        let voice = render_voice(style, pitch, bar_duration);
        for i in 0..n {
            out[i] += (voice[i] as f64 * gain) as f32;
        }
    }
    out
}

/// Renders the full pad track across the 4-bar chord progression.
pub fn render(style: PadStyle, chords: &[[f64; 3]], tempo_bpm: f64, beats_per_bar: f64) -> Vec<f32> {
    let bar_duration = beats_per_bar * 60.0 / tempo_bpm;
    let mut out = Vec::new();
    for &triad in chords {
        out.extend(bar(style, triad, bar_duration));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chords() -> Vec<[f64; 3]> {
        vec![
            [220.0, 261.63, 329.63],
            [246.94, 293.66, 369.99],
            [220.0, 261.63, 329.63],
            [220.0, 261.63, 329.63],
        ]
    }

    #[test]
    fn each_pad_style_is_nonzero() {
        for style in [
            PadStyle::DarkAnalog,
            PadStyle::BrightDigitalFm,
            PadStyle::WarmAnalog,
            PadStyle::MetallicRingMod,
            PadStyle::Orchestral,
            PadStyle::CleanSine,
        ] {
            let buf = render(style, &sample_chords(), 120.0, 4.0);
            assert!(
                buf.iter().any(|&x| x.abs() > 1e-6),
                "style {style:?} produced silence"
            );
        }
    }

    #[test]
    fn render_length_matches_four_bars() {
        let buf = render(PadStyle::CleanSine, &sample_chords(), 120.0, 4.0);
        let one_bar = (4.0 * 60.0 / 120.0 * SAMPLE_RATE as f64).round() as usize;
        assert_eq!(buf.len(), one_bar * 4);
    }
}
