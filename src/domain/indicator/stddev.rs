//! Population standard deviation helpers.
//!
//! STDDEV(window) = sqrt(sum((x - mean)^2) / n), no Bessel correction.

/// Population standard deviation of `window` about a precomputed `mean`.
pub fn population_stddev(window: &[f64], mean: f64) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let variance = window
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / window.len() as f64;
    variance.sqrt()
}
