//! Robust [0,1] normalization of one metric column.
//!
//! Raw metrics live on wildly different scales (national ranks, dollar
//! prices, percentages). Each column is rescaled against its 2nd..98th
//! percentile window so a handful of outlier regions cannot compress the
//! rest of the distribution into a sliver of the scale.

use tracing::debug;

/// Denominator floor for a zero-width normalization window.
const WINDOW_EPS: f64 = 1e-9;

const LOWER_QUANTILE: f64 = 0.02;
const UPPER_QUANTILE: f64 = 0.98;

/// Normalize a column to [0,1], preserving missing values.
///
/// Non-finite inputs count as missing. Bounds are the 2nd and 98th
/// percentiles of the present values; everything is clipped to that window
/// and linearly rescaled. A constant (or all-missing) column collapses to
/// 0.0 for every present row rather than dividing by zero.
pub fn normalize_keep_missing(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<f64> = values
        .iter()
        .filter_map(|v| v.filter(|x| x.is_finite()))
        .collect();
    if present.is_empty() {
        debug!("normalizing an all-missing column");
        return vec![None; values.len()];
    }
    present.sort_by(f64::total_cmp);

    let lo = quantile(&present, LOWER_QUANTILE);
    let hi = quantile(&present, UPPER_QUANTILE);
    let width = (hi - lo).max(WINDOW_EPS);
    if hi - lo < WINDOW_EPS {
        debug!(value = lo, "normalizing a degenerate (constant) column");
    }

    values
        .iter()
        .map(|v| {
            v.filter(|x| x.is_finite()).map(|x| {
                let clipped = x.clamp(lo, hi);
                ((clipped - lo) / width).clamp(0.0, 1.0)
            })
        })
        .collect()
}

/// Normalize a column to [0,1] with missing values filled as 0.0.
///
/// The neutral-low fill is applied after scaling and is load-bearing for
/// score compatibility: regions lacking a metric sit at the bottom of that
/// metric's scale instead of being excluded from the weighted average.
pub fn normalize(values: &[Option<f64>]) -> Vec<f64> {
    normalize_keep_missing(values)
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect()
}

/// Linear-interpolation quantile over an ascending-sorted non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;
    if idx + 1 >= n {
        return sorted[n - 1];
    }
    sorted[idx] + (sorted[idx + 1] - sorted[idx]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_within_unit_interval() {
        let values: Vec<Option<f64>> = (0..200).map(|i| Some(i as f64 * 13.7 - 50.0)).collect();
        for v in normalize(&values) {
            assert!((0.0..=1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_monotone_after_clipping() {
        let values: Vec<Option<f64>> = vec![
            Some(1.0),
            Some(5.0),
            Some(5.0),
            Some(20.0),
            Some(100.0),
        ];
        let out = normalize(&values);
        for pair in out.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_outliers_clipped_to_window() {
        let mut values: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64)).collect();
        values.push(Some(1.0e9));
        let out = normalize(&values);
        // The outlier saturates at 1.0 instead of flattening everything else.
        assert_eq!(out[100], 1.0);
        let interior_spread = out[90] - out[10];
        assert!(interior_spread > 0.5);
    }

    #[test]
    fn test_constant_column_collapses_without_nan() {
        let values = vec![Some(7.0); 5];
        let out = normalize(&values);
        assert_eq!(out, vec![0.0; 5]);
    }

    #[test]
    fn test_all_missing_column() {
        let values: Vec<Option<f64>> = vec![None, None, None];
        assert_eq!(normalize_keep_missing(&values), vec![None, None, None]);
        assert_eq!(normalize(&values), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_filled_after_scaling() {
        let values = vec![Some(10.0), None, Some(20.0)];
        let out = normalize(&values);
        assert_eq!(out[1], 0.0);
        assert!(out[0] < out[2]);
    }

    #[test]
    fn test_non_finite_treated_as_missing() {
        let values = vec![Some(f64::NAN), Some(1.0), Some(2.0), Some(f64::INFINITY)];
        let kept = normalize_keep_missing(&values);
        assert_eq!(kept[0], None);
        assert_eq!(kept[3], None);
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [60.0, 80.0];
        assert!((quantile(&sorted, 0.02) - 60.4).abs() < 1e-9);
        assert!((quantile(&sorted, 0.98) - 79.6).abs() < 1e-9);
        assert_eq!(quantile(&[5.0], 0.5), 5.0);
    }
}
