use std::cmp::Ordering;

/// Five-number summary (plus count and mean) of one comparison group.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    /// Compute the summary of `values`, or `None` when the group is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            mean,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_group_is_none() {
        assert_eq!(Summary::from_values(&[]), None);
    }

    #[test]
    fn summary_of_single_value_collapses() {
        let s = Summary::from_values(&[5.0]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.min, 5.0);
        assert_eq!(s.q1, 5.0);
        assert_eq!(s.median, 5.0);
        assert_eq!(s.q3, 5.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.mean, 5.0);
    }

    #[test]
    fn summary_interpolates_quartiles() {
        // Sorted: 1 2 3 4 -> q1 = 1.75, median = 2.5, q3 = 3.25
        let s = Summary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 1.0);
        assert!((s.q1 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q3 - 3.25).abs() < 1e-12);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.mean, 2.5);
    }

    #[test]
    fn summary_odd_count_median_is_exact() {
        let s = Summary::from_values(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(s.median, 5.0);
    }
}
