//! Small numeric helpers shared across pipelines and export.

/// Arithmetic mean, 0.0 for an empty slice.
///
/// ```
/// use blockfall::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Trailing rolling mean with a minimum period of one.
///
/// Entry `i` averages `values[i.saturating_sub(window - 1)..=i]`, so the
/// first entries average over however many values exist so far instead of
/// being dropped.
///
/// ```
/// use blockfall::utils::rolling_mean;
///
/// assert_eq!(rolling_mean(&[2.0, 4.0, 6.0, 8.0], 2), vec![2.0, 3.0, 5.0, 7.0]);
/// ```
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            mean(&values[start..=i])
        })
        .collect()
}
