/// Moving-average smoothing over the full captured session.
///
/// Runs once, after capture stops, to suppress the discontinuities left by
/// independent per-tick buffer boundaries. Each output sample is the
/// truncating integer mean of the input samples within `radius` positions
/// on either side; at the ends the window shrinks to the valid range
/// instead of zero-padding. Output length always equals input length.
pub fn smooth(samples: &[i16], radius: usize) -> Vec<i16> {
    if radius == 0 || samples.is_empty() {
        return samples.to_vec();
    }

    let mut smoothed = Vec::with_capacity(samples.len());
    for i in 0..samples.len() {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius).min(samples.len() - 1);
        let sum: i32 = samples[lo..=hi].iter().map(|&s| s as i32).sum();
        let count = (hi - lo + 1) as i32;
        smoothed.push((sum / count) as i16);
    }
    smoothed
}
