/// A single equal-width bin over `[lo, hi)`; the last bin closes the range.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: u64,
}

/// Equal-width bin counts over a fixed range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

/// Count `values` into `bins` equal-width bins over `range`.
///
/// Values outside the range are clamped into the edge bins, so binning two
/// groups over a shared range never drops points.
pub fn histogram(values: &[f64], bins: usize, range: (f64, f64)) -> Histogram {
    if bins == 0 {
        return Histogram::default();
    }

    let (lo, mut hi) = range;
    if !(hi > lo) {
        // Degenerate range (all values equal): widen to one unit.
        hi = lo + 1.0;
    }
    let width = (hi - lo) / bins as f64;

    let mut edges: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lo: lo + width * i as f64,
            hi: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = ((v - lo) / width).floor();
        let idx = if idx < 0.0 {
            0
        } else {
            (idx as usize).min(bins - 1)
        };
        edges[idx].count += 1;
    }

    Histogram { bins: edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_into_equal_width_bins() {
        let values = [0.0, 1.0, 4.5, 9.0, 10.0];
        let h = histogram(&values, 2, (0.0, 10.0));

        assert_eq!(h.bins.len(), 2);
        assert_eq!(h.bins[0].lo, 0.0);
        assert_eq!(h.bins[0].hi, 5.0);
        // 0.0, 1.0, 4.5 land low; 9.0 lands high; 10.0 closes the last bin.
        assert_eq!(h.bins[0].count, 3);
        assert_eq!(h.bins[1].count, 2);
    }

    #[test]
    fn histogram_clamps_out_of_range_values() {
        let h = histogram(&[-5.0, 15.0], 2, (0.0, 10.0));
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[1].count, 1);
    }

    #[test]
    fn histogram_handles_degenerate_range() {
        let h = histogram(&[3.0, 3.0, 3.0], 4, (3.0, 3.0));
        let total: u64 = h.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn histogram_with_zero_bins_is_empty() {
        let h = histogram(&[1.0], 0, (0.0, 10.0));
        assert!(h.bins.is_empty());
    }
}
