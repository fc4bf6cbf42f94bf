/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draw a point uniformly from the box spanned by `lower` and `upper`.
pub(crate) fn uniform_point(rng: &mut fastrand::Rng, lower: &[f64], upper: &[f64]) -> Vec<f64> {
    lower
        .iter()
        .zip(upper)
        .map(|(&low, &high)| f64_range(rng, low, high))
        .collect()
}
