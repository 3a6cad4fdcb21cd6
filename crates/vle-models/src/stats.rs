//! Goodness-of-fit statistics.

/// Coefficient of determination of `predicted` against `observed`.
///
/// A constant `observed` series scores 1.0 for a perfect prediction and 0.0
/// otherwise. Lengths must match; extra entries are ignored.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> f64 {
    let n = observed.len().min(predicted.len());
    if n == 0 {
        return f64::NAN;
    }
    let mean = observed[..n].iter().sum::<f64>() / n as f64;
    let ss_res: f64 = observed[..n]
        .iter()
        .zip(&predicted[..n])
        .map(|(o, p)| (o - p).powi(2))
        .sum();
    let ss_tot: f64 = observed[..n].iter().map(|o| (o - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Geometric mean of strictly positive values.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    (values.iter().map(|v| v.ln()).sum::<f64>() / values.len() as f64).exp()
}
