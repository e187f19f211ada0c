use super::histogram::histogram;

/// Density profile for a violin plot: bin counts normalized to peak 1.0
/// and smoothed with a centered 3-tap moving average.
///
/// An empty group (or zero bins) yields an all-zero / empty profile.
pub fn density(values: &[f64], bins: usize, range: (f64, f64)) -> Vec<f64> {
    let counts: Vec<f64> = histogram(values, bins, range)
        .bins
        .iter()
        .map(|b| b.count as f64)
        .collect();

    let mut profile = smooth(&counts);

    let peak = profile.iter().cloned().fold(0.0_f64, f64::max);
    if peak > 0.0 {
        for v in &mut profile {
            *v /= peak;
        }
    }
    profile
}

// Centered moving average; edges use the shorter window.
fn smooth(values: &[f64]) -> Vec<f64> {
    if values.len() < 3 {
        return values.to_vec();
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let lo = i.saturating_sub(1);
        let hi = (i + 1).min(values.len() - 1);
        let window = &values[lo..=hi];
        out.push(window.iter().sum::<f64>() / window.len() as f64);
    }
    out
}
