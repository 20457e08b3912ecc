//! ADSR amplitude envelope (spec.md §4.1).
//!
//! Unlike a real-time envelope generator (see the teacher's
//! `speccade-backend-audio::envelope::AdsrEnvelope` state machine), this
//! engine only ever needs a complete one-shot buffer up front, so the
//! envelope is a pure function from parameters to a buffer of amplitude
//! multipliers in `[0, 1]`.

use crate::SAMPLE_RATE;

/// Renders an ADSR envelope of `total_samples` length.
///
/// Attack ramps 0->1 linearly, decay ramps 1->sustain, sustain holds for
/// the remainder minus release, release ramps sustain->0. If
/// `attack+decay+release` (in samples) exceeds `total_samples`, attack is
/// applied up to its length, then decay, then a linear ramp to 0 fills the
/// remaining samples (spec.md §4.1 edge case).
pub fn adsr(
    attack_s: f64,
    decay_s: f64,
    sustain_level: f64,
    release_s: f64,
    total_samples: usize,
) -> Vec<f32> {
    let attack_n = (attack_s * SAMPLE_RATE as f64).round() as usize;
    let decay_n = (decay_s * SAMPLE_RATE as f64).round() as usize;
    let release_n = (release_s * SAMPLE_RATE as f64).round() as usize;
    let sustain_level = sustain_level.clamp(0.0, 1.0);

    let mut out = vec![0.0f32; total_samples];
    if total_samples == 0 {
        return out;
    }

    if attack_n + decay_n + release_n <= total_samples {
        let sustain_n = total_samples - attack_n - decay_n - release_n;

        for i in 0..attack_n.min(total_samples) {
            out[i] = (i as f64 / attack_n.max(1) as f64) as f32;
        }
        for i in 0..decay_n.min(total_samples - attack_n) {
            let frac = i as f64 / decay_n.max(1) as f64;
            out[attack_n + i] = (1.0 - frac * (1.0 - sustain_level)) as f32;
        }
        for i in 0..sustain_n {
            out[attack_n + decay_n + i] = sustain_level as f32;
        }
        for i in 0..release_n.min(total_samples - attack_n - decay_n - sustain_n) {
            let frac = i as f64 / release_n.max(1) as f64;
            out[attack_n + decay_n + sustain_n + i] = (sustain_level * (1.0 - frac)) as f32;
        }
    } else {
        // Overflow edge case: attack up to its length, then decay, then a
        // linear ramp to 0 fills whatever samples remain.
        let attack_fit = attack_n.min(total_samples);
        for i in 0..attack_fit {
            out[i] = (i as f64 / attack_n.max(1) as f64) as f32;
        }

        let remaining_after_attack = total_samples - attack_fit;
        let decay_fit = decay_n.min(remaining_after_attack);
        let attack_level = if attack_n > 0 {
            1.0
        } else {
            1.0 // attack_n == 0 means attack already reached 1.0 instantly
        };
        for i in 0..decay_fit {
            let frac = i as f64 / decay_n.max(1) as f64;
            out[attack_fit + i] = (attack_level * (1.0 - frac * (1.0 - sustain_level))) as f32;
        }

        let ramp_start = attack_fit + decay_fit;
        let ramp_len = total_samples - ramp_start;
        let ramp_from = if decay_fit > 0 {
            out[ramp_start.saturating_sub(1)] as f64
        } else {
            attack_level
        };
        for i in 0..ramp_len {
            let frac = if ramp_len > 1 {
                i as f64 / (ramp_len - 1) as f64
            } else {
                1.0
            };
            out[ramp_start + i] = (ramp_from * (1.0 - frac)) as f32;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_requested_length() {
        let env = adsr(0.01, 0.05, 0.5, 0.1, 10_000);
        assert_eq!(env.len(), 10_000);
    }

    #[test]
    fn envelope_attack_ramps_from_zero() {
        let env = adsr(0.01, 0.05, 0.5, 0.1, 10_000);
        assert!(env[0].abs() < 1e-3);
    }

    #[test]
    fn envelope_reaches_sustain_level() {
        let env = adsr(0.01, 0.05, 0.6, 0.1, 44_100);
        let attack_n = (0.01 * SAMPLE_RATE as f64).round() as usize;
        let decay_n = (0.05 * SAMPLE_RATE as f64).round() as usize;
        let mid_sustain = attack_n + decay_n + 100;
        assert!((env[mid_sustain] as f64 - 0.6).abs() < 0.01);
    }

    #[test]
    fn envelope_releases_to_zero() {
        let env = adsr(0.01, 0.05, 0.5, 0.1, 10_000);
        assert!(env[env.len() - 1].abs() < 1e-2);
    }

    #[test]
    fn overflow_case_never_panics_and_ends_near_zero() {
        // attack+decay+release exceeds total_samples.
        let env = adsr(0.5, 0.5, 0.5, 0.5, 1000);
        assert_eq!(env.len(), 1000);
        assert!(env.last().unwrap().abs() < 0.2);
    }
}
