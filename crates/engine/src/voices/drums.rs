//! Percussion voices: kick, snare, hihat (spec.md §4.2).
//!
//! Kicks use a time-varying pitch envelope driving a cumulative phase
//! accumulator (so the carrier frequency genuinely sweeps rather than
//! being re-evaluated per-sample from a fixed frequency), mirroring the
//! teacher's pitched-body/membrane synthesis approach in
//! `speccade-backend-audio::synthesis::membrane`.

use crate::util::{add_into, exp_decay, scale};
use crate::SAMPLE_RATE;

/// Which drum machine's percussion recipes to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumMachine {
    Kit808,
    Kit909,
    LinnDrum,
}

impl DrumMachine {
    pub fn from_name(name: &str) -> Self {
        match name {
            "909" => DrumMachine::Kit909,
            "linn_drum" | "linn" | "acoustic" => DrumMachine::LinnDrum,
            _ => DrumMachine::Kit808,
        }
    }
}

fn times(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / SAMPLE_RATE as f64).collect()
}

/// Renders a sine carrier whose instantaneous frequency follows
/// `pitch_hz[i]`, via a cumulative phase accumulator.
fn swept_sine(pitch_hz: &[f64]) -> Vec<f32> {
    let mut phase = 0.0f64;
    pitch_hz
        .iter()
        .map(|&f| {
            let s = phase.sin();
            phase += 2.0 * std::f64::consts::PI * f / SAMPLE_RATE as f64;
            s as f32
        })
        .collect()
}

fn n_samples(duration: f64) -> usize {
    (duration * SAMPLE_RATE as f64).round() as usize
}

/// kick_808: 0.4 s.
pub fn kick_808(rng: &mut impl rand::Rng) -> Vec<f32> {
    let n = n_samples(0.4);
    let t = times(n);
    let pitch: Vec<f64> = t.iter().map(|&t| 180.0 * (-6.0 * t).exp() + 35.0).collect();
    let amp = exp_decay(4.5, n);

    let carrier = swept_sine(&pitch);
    let mut out: Vec<f32> = carrier
        .iter()
        .zip(amp.iter())
        .map(|(&c, &a)| c * a)
        .collect();

    // Sub-octave at 0.3 gain.
    let sub_pitch: Vec<f64> = pitch.iter().map(|&f| f / 2.0).collect();
    let sub = swept_sine(&sub_pitch);
    let sub_scaled: Vec<f32> = sub
        .iter()
        .zip(amp.iter())
        .map(|(&c, &a)| c * a * 0.3)
        .collect();
    add_into(&mut out, &sub_scaled);

    // 2 ms exponential click at 0.15 gain.
    let click_n = n_samples(0.002).min(n);
    let click_env = exp_decay(2000.0, click_n);
    let click: Vec<f32> = click_env.iter().map(|&e| e * 0.15).collect();
    add_into(&mut out, &click);

    // White noise shaped by e^(-50t) * 0.05.
    let noise_env = exp_decay(50.0, n);
    let noise: Vec<f32> = (0..n)
        .map(|i| rng.gen_range(-1.0f32..=1.0) * noise_env[i] * 0.05)
        .collect();
    add_into(&mut out, &noise);

    out
}

/// kick_909: 0.18 s.
pub fn kick_909(rng: &mut impl rand::Rng) -> Vec<f32> {
    let n = n_samples(0.18);
    let t = times(n);
    let pitch: Vec<f64> = t
        .iter()
        .map(|&t| 220.0 * (-12.0 * t).exp() + 55.0)
        .collect();
    let amp = exp_decay(10.0, n);

    let carrier = swept_sine(&pitch);
    let mut out: Vec<f32> = carrier
        .iter()
        .zip(amp.iter())
        .map(|(&c, &a)| c * a)
        .collect();

    // 2nd-harmonic at 0.15 * e^(-15t).
    let harmonic_pitch: Vec<f64> = pitch.iter().map(|&f| f * 2.0).collect();
    let harmonic = swept_sine(&harmonic_pitch);
    let harmonic_env = exp_decay(15.0, n);
    let harmonic_scaled: Vec<f32> = harmonic
        .iter()
        .zip(harmonic_env.iter())
        .map(|(&c, &e)| c * e * 0.15)
        .collect();
    add_into(&mut out, &harmonic_scaled);

    // 3 ms noise-click with e^(-600t) envelope at 0.25.
    let click_n = n_samples(0.003).min(n);
    let click_env = exp_decay(600.0, click_n);
    let click: Vec<f32> = (0..click_n)
        .map(|i| rng.gen_range(-1.0f32..=1.0) * click_env[i] * 0.25)
        .collect();
    add_into(&mut out, &click);

    out
}

/// kick_linn (also used for "acoustic"): 0.22 s.
pub fn kick_linn(rng: &mut impl rand::Rng) -> Vec<f32> {
    let n = n_samples(0.22);
    let t = times(n);
    let pitch: Vec<f64> = t.iter().map(|&t| 140.0 * (-7.0 * t).exp() + 50.0).collect();
    let amp = exp_decay(6.0, n);

    let carrier = swept_sine(&pitch);
    let mut out: Vec<f32> = carrier
        .iter()
        .zip(amp.iter())
        .map(|(&c, &a)| c * a)
        .collect();

    // 1.5x overtone at 0.1.
    let overtone_pitch: Vec<f64> = pitch.iter().map(|&f| f * 1.5).collect();
    let overtone = swept_sine(&overtone_pitch);
    let overtone_scaled: Vec<f32> = overtone
        .iter()
        .zip(amp.iter())
        .map(|(&c, &a)| c * a * 0.1)
        .collect();
    add_into(&mut out, &overtone_scaled);

    // Soft 5 ms square-root attack ramp applied to the whole buffer.
    let attack_n = n_samples(0.005).min(n);
    for i in 0..attack_n {
        let frac = (i as f64 / attack_n.max(1) as f64).sqrt();
        out[i] *= frac as f32;
    }

    // Noise texture e^(-30t) * 0.08.
    let noise_env = exp_decay(30.0, n);
    let noise: Vec<f32> = (0..n)
        .map(|i| rng.gen_range(-1.0f32..=1.0) * noise_env[i] * 0.08)
        .collect();
    add_into(&mut out, &noise);

    out
}

/// Renders a kick using the given drum machine.
pub fn kick(machine: DrumMachine, rng: &mut impl rand::Rng) -> Vec<f32> {
    match machine {
        DrumMachine::Kit808 => kick_808(rng),
        DrumMachine::Kit909 => kick_909(rng),
        DrumMachine::LinnDrum => kick_linn(rng),
    }
}

/// snare_808: 0.15 s.
pub fn snare_808(rng: &mut impl rand::Rng) -> Vec<f32> {
    use crate::synthesis::waveform::sine;
    let n = n_samples(0.15);
    let env: Vec<f32> = exp_decay(25.0, n).iter().map(|&e| e * 0.4).collect();

    let tone_a = sine(180.0, 0.15, 0.6);
    let tone_b = sine(330.0, 0.15, 0.6);
    let noise: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..=1.0) * 0.4).collect();

    (0..n)
        .map(|i| (tone_a[i] + tone_b[i] + noise[i]) * env[i])
        .collect()
}

/// snare_909: 0.12 s.
pub fn snare_909(rng: &mut impl rand::Rng) -> Vec<f32> {
    use crate::synthesis::waveform::sine;
    let n = n_samples(0.12);
    let env: Vec<f32> = exp_decay(30.0, n).iter().map(|&e| e * 0.45).collect();

    let tone = sine(200.0, 0.12, 0.3);
    let noise: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..=1.0) * 0.7).collect();

    (0..n).map(|i| (tone[i] + noise[i]) * env[i]).collect()
}

/// snare_linn (also used for "acoustic"): 0.18 s.
pub fn snare_linn(rng: &mut impl rand::Rng) -> Vec<f32> {
    use crate::synthesis::waveform::sine;
    let n = n_samples(0.18);
    let env: Vec<f32> = exp_decay(15.0, n).iter().map(|&e| e * 0.4).collect();

    let tone = sine(220.0, 0.18, 0.25);
    let noise: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..=1.0) * 0.75).collect();

    (0..n).map(|i| (tone[i] + noise[i]) * env[i]).collect()
}

/// Renders a snare using the given drum machine.
pub fn snare(machine: DrumMachine, rng: &mut impl rand::Rng) -> Vec<f32> {
    match machine {
        DrumMachine::Kit808 => snare_808(rng),
        DrumMachine::Kit909 => snare_909(rng),
        DrumMachine::LinnDrum => snare_linn(rng),
    }
}

/// hihat: 0.06 s white noise, high-passed (cutoff=0.3), `e^(-60t) * 0.18`.
pub fn hihat(rng: &mut impl rand::Rng) -> Vec<f32> {
    use crate::synthesis::filter::highpass;
    let n = n_samples(0.06);
    let noise: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..=1.0)).collect();
    let filtered = highpass(&noise, 0.3);
    let env = exp_decay(60.0, n);
    scale(
        &filtered
            .iter()
            .zip(env.iter())
            .map(|(&f, &e)| f * e)
            .collect::<Vec<f32>>(),
        0.18,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn kick_808_has_expected_duration() {
        let mut rng = create_rng(1);
        let buf = kick_808(&mut rng);
        assert_eq!(buf.len(), n_samples(0.4));
    }

    #[test]
    fn kick_909_is_shorter_than_808() {
        let mut rng = create_rng(1);
        let k909 = kick_909(&mut rng);
        let mut rng2 = create_rng(1);
        let k808 = kick_808(&mut rng2);
        assert!(k909.len() < k808.len());
    }

    #[test]
    fn drums_are_deterministic_for_a_fixed_rng_seed() {
        let mut rng1 = create_rng(99);
        let mut rng2 = create_rng(99);
        assert_eq!(kick_808(&mut rng1), kick_808(&mut rng2));
    }

    #[test]
    fn snares_are_nonzero() {
        let mut rng = create_rng(3);
        let s = snare_808(&mut rng);
        assert!(s.iter().any(|&x| x.abs() > 1e-6));
    }

    #[test]
    fn hihat_has_expected_duration() {
        let mut rng = create_rng(3);
        let h = hihat(&mut rng);
        assert_eq!(h.len(), n_samples(0.06));
    }
}
