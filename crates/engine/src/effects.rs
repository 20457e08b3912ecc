//! Mix-bus effects applied during the render pipeline (spec.md §4.7):
//! sidechain ducking, gated reverb, normalization, fades, and stereo
//! widening.

use crate::SAMPLE_RATE;

/// Box-average envelope follower over `|kick|`, normalized to its own
/// peak, producing a `[0, 1]` duck-drive curve the same length as `kick`.
fn kick_envelope(kick: &[f32], window_samples: usize) -> Vec<f32> {
    let window_samples = window_samples.max(1);
    let n = kick.len();
    let mut envelope = vec![0.0f32; n];
    let mut running_sum = 0.0f64;

    for i in 0..n {
        running_sum += kick[i].abs() as f64;
        if i >= window_samples {
            running_sum -= kick[i - window_samples].abs() as f64;
        }
        let count = (i + 1).min(window_samples) as f64;
        envelope[i] = (running_sum / count) as f32;
    }

    let peak = envelope.iter().cloned().fold(0.0f32, f32::max);
    if peak > 1e-9 {
        for e in envelope.iter_mut() {
            *e /= peak;
        }
    }
    envelope
}

/// Ducks `target` in place using the kick track as the sidechain trigger:
/// `gain = clip(1 - 0.4*duck, 0.3, 1.0)` per sample, `duck` the normalized
/// envelope follower of `|kick|` over a 50 ms window.
pub fn sidechain_duck(target: &mut [f32], kick: &[f32]) {
    let window_samples = (0.05 * SAMPLE_RATE as f64).round() as usize;
    let envelope = kick_envelope(kick, window_samples);
    for (i, sample) in target.iter_mut().enumerate() {
        let duck = envelope.get(i).copied().unwrap_or(0.0);
        let gain = (1.0 - 0.4 * duck as f64).clamp(0.3, 1.0);
        *sample = (*sample as f64 * gain) as f32;
    }
}

/// A 150 ms exponential reverb tail, triggered wherever `snare` crosses
/// `0.1 * peak(|snare|)`: each trigger adds `0.3 * snare[i] * e^(-10t)`
/// onto `mix` in place, `t` the time in seconds since the trigger.
pub fn gated_reverb(mix: &mut Vec<f32>, snare: &[f32]) {
    let peak = snare.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    if peak < 1e-9 {
        return;
    }
    let threshold = 0.1 * peak;
    let tail_len = (0.15 * SAMPLE_RATE as f64).round() as usize;
    let decay: Vec<f32> = (0..tail_len)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            (-10.0 * t).exp() as f32
        })
        .collect();

    let mut triggers = Vec::new();
    let mut prev_above = false;
    for (i, &s) in snare.iter().enumerate() {
        let above = s.abs() > threshold;
        if above && !prev_above {
            triggers.push(i);
        }
        prev_above = above;
    }

    if mix.len() < snare.len() {
        mix.resize(snare.len(), 0.0);
    }

    for &trigger in &triggers {
        let hit = snare[trigger];
        for (j, &d) in decay.iter().enumerate() {
            let idx = trigger + j;
            if idx >= mix.len() {
                break;
            }
            mix[idx] += 0.3 * hit * d;
        }
    }
}

/// Normalizes a buffer so its peak absolute value is `0.85`. A silent
/// buffer (peak below `1e-9`) is returned unchanged rather than divided by
/// zero — this is the spec's "BufferOverflowGuard" condition, not an error
/// (spec.md §7): normalize handles it, nothing propagates.
pub fn normalize(samples: &mut [f32]) {
    let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    if peak < 1e-9 {
        return;
    }
    let gain = 0.85 / peak;
    for s in samples.iter_mut() {
        *s *= gain;
    }
}

/// Applies a linear 0.5 s fade-in and fade-out in place.
pub fn fade(samples: &mut [f32]) {
    let fade_len = ((0.5 * SAMPLE_RATE as f64).round() as usize).min(samples.len() / 2);
    for i in 0..fade_len {
        let frac = i as f64 / fade_len.max(1) as f64;
        samples[i] = (samples[i] as f64 * frac) as f32;
    }
    let n = samples.len();
    for i in 0..fade_len {
        let frac = i as f64 / fade_len.max(1) as f64;
        let idx = n - 1 - i;
        samples[idx] = (samples[idx] as f64 * frac) as f32;
    }
}

/// Widens a mono mix into stereo by delaying a 15 ms, 0.15-gain copy of the
/// pad layer into the right channel only (spec.md §4.7).
pub fn widen(mono: &[f32], pad_layer: &[f32]) -> crate::mixer::StereoOutput {
    let delay_samples = (0.015 * SAMPLE_RATE as f64).round() as usize;
    let mut right = mono.to_vec();
    for i in 0..pad_layer.len() {
        let idx = i + delay_samples;
        if idx >= right.len() {
            break;
        }
        right[idx] += pad_layer[i] * 0.15;
    }
    crate::mixer::StereoOutput {
        left: mono.to_vec(),
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidechain_reduces_amplitude_during_kick_hits() {
        let kick = vec![1.0f32; 1000];
        let mut bass = vec![1.0f32; 1000];
        sidechain_duck(&mut bass, &kick);
        assert!(bass[500] < 1.0);
        assert!(bass[500] >= 0.3 - 1e-6);
    }

    #[test]
    fn normalize_scales_peak_to_point_eight_five() {
        let mut buf = vec![0.2, -2.0, 0.5];
        normalize(&mut buf);
        let peak = buf.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        assert!((peak - 0.85).abs() < 1e-5);
    }

    #[test]
    fn normalize_leaves_silence_untouched() {
        let mut buf = vec![0.0; 10];
        normalize(&mut buf);
        assert!(buf.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn fade_zeroes_the_very_first_and_last_sample() {
        let mut buf = vec![1.0f32; SAMPLE_RATE as usize * 2];
        fade(&mut buf);
        assert!(buf[0].abs() < 1e-6);
        assert!(buf[buf.len() - 1].abs() < 1e-6);
        let mid = buf.len() / 2;
        assert!((buf[mid] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn widen_leaves_left_channel_untouched() {
        let mono = vec![0.5f32; 100];
        let pad = vec![0.2f32; 100];
        let stereo = widen(&mono, &pad);
        assert_eq!(stereo.left, mono);
        assert_ne!(stereo.right, mono);
    }
}
