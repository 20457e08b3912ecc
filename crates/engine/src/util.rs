//! Small buffer helpers shared by the instrument voices.

/// Adds `b` into `a` starting at sample 0, extending `a` if needed.
pub fn add_into(a: &mut Vec<f32>, b: &[f32]) {
    if a.len() < b.len() {
        a.resize(b.len(), 0.0);
    }
    for (i, &s) in b.iter().enumerate() {
        a[i] += s;
    }
}

/// Multiplies two buffers element-wise, truncating to the shorter length.
pub fn mul(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).collect()
}

/// Scales a buffer by a constant gain.
pub fn scale(a: &[f32], gain: f64) -> Vec<f32> {
    a.iter().map(|&x| (x as f64 * gain) as f32).collect()
}

/// Builds an exponential decay curve `e^(-k*t)` of `n` samples at the
/// engine's sample rate.
pub fn exp_decay(k: f64, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f64 / crate::SAMPLE_RATE as f64;
            (-k * t).exp() as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_into_extends_shorter_buffer() {
        let mut a = vec![1.0, 1.0];
        add_into(&mut a, &[1.0, 1.0, 1.0]);
        assert_eq!(a, vec![2.0, 2.0, 1.0]);
    }

    #[test]
    fn exp_decay_starts_at_one() {
        let d = exp_decay(5.0, 100);
        assert!((d[0] - 1.0).abs() < 1e-6);
        assert!(d[99] < d[0]);
    }
}
