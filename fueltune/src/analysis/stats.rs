//! Descriptive statistics for per-cell aggregation.

/// Summary statistics of one cell's metric values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// 95th percentile.
    pub p95: f64,
}

impl MetricStats {
    /// Compute statistics over `values`. Returns `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count: values.len(),
            mean: values.iter().sum::<f64>() / values.len() as f64,
            median: percentile(&sorted, 50.0)?,
            p95: percentile(&sorted, 95.0)?,
        })
    }
}

/// Percentile of sorted data, interpolating linearly between closest ranks.
///
/// `pct` is in `[0, 100]`; rank `pct / 100 * (n - 1)` is located and the
/// two surrounding values are blended.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_value() {
        let stats = MetricStats::from_values(&[1.05]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 1.05);
        assert_eq!(stats.median, 1.05);
        assert_eq!(stats.p95, 1.05);
    }

    #[test]
    fn test_even_count_median_averages_middle() {
        let stats = MetricStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.mean, 2.5));
    }

    #[test]
    fn test_p95_interpolates() {
        // rank = 0.95 * 4 = 3.8 -> 4 + 0.8 * (5 - 4)
        let stats = MetricStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(approx(stats.p95, 4.8));
        assert!(approx(stats.median, 3.0));
    }

    #[test]
    fn test_percentile_bounds() {
        let sorted = [1.0, 2.0, 10.0];
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 100.0), Some(10.0));
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_empty_values() {
        assert!(MetricStats::from_values(&[]).is_none());
    }
}
