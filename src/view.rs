//! Thin presentation helpers: range filters and score ordering.
//!
//! The dashboard's sliders (IRSAD rank window, maximum vacancy) reduce to
//! numeric range filters over fused columns; everything else about
//! presentation lives outside this crate.

use crate::data_utils::numeric_column;
use crate::error::Result;
use polars::prelude::*;

/// Inclusive numeric bounds on one fused column.
///
/// Rows with a missing value in the filtered column are excluded: a filter
/// expresses a requirement the row cannot be shown to satisfy.
#[derive(Clone, Debug)]
pub struct RangeFilter {
    pub column: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn at_least(column: impl Into<String>, min: f64) -> Self {
        Self {
            column: column.into(),
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(column: impl Into<String>, max: f64) -> Self {
        Self {
            column: column.into(),
            min: None,
            max: Some(max),
        }
    }

    pub fn between(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            column: column.into(),
            min: Some(min),
            max: Some(max),
        }
    }

    fn accepts(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => {
                self.min.map_or(true, |min| v >= min) && self.max.map_or(true, |max| v <= max)
            }
            None => false,
        }
    }
}

/// Keep only rows satisfying every filter.
pub fn apply_filters(df: &DataFrame, filters: &[RangeFilter]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for filter in filters {
        let values = numeric_column(df, &filter.column)?;
        for (row, value) in values.into_iter().enumerate() {
            keep[row] = keep[row] && filter.accepts(value);
        }
    }
    let mask = BooleanChunked::from_slice("keep", &keep);
    Ok(df.filter(&mask)?)
}

/// Sort rows by `score` descending, stably; rows without a score sink last.
pub fn sort_by_score(df: &DataFrame) -> Result<DataFrame> {
    let scores = numeric_column(df, "score")?;
    let mut order: Vec<u32> = (0..df.height() as u32).collect();
    order.sort_by(|&a, &b| {
        let sa = scores[a as usize].unwrap_or(f64::NEG_INFINITY);
        let sb = scores[b as usize].unwrap_or(f64::NEG_INFINITY);
        sb.total_cmp(&sa)
    });
    let indices = UInt32Chunked::from_vec("order", order);
    Ok(df.take(&indices)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored() -> DataFrame {
        df! [
            "region_code" => ["A", "B", "C", "D"],
            "irsad_rank" => [Some(30.0), Some(70.0), Some(50.0), None],
            "vacancy_pct" => [Some(1.0), Some(2.0), Some(8.0), Some(3.0)],
            "score" => [62.0, 55.0, 31.0, 40.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_range_filter_bounds_inclusive() {
        let out = apply_filters(&scored(), &[RangeFilter::between("irsad_rank", 30.0, 50.0)])
            .unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_missing_value_fails_filter() {
        let out = apply_filters(&scored(), &[RangeFilter::at_least("irsad_rank", 0.0)]).unwrap();
        // Region D has no rank and is excluded.
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn test_multiple_filters_intersect() {
        let filters = [
            RangeFilter::between("irsad_rank", 20.0, 80.0),
            RangeFilter::at_most("vacancy_pct", 4.0),
        ];
        let out = apply_filters(&scored(), &filters).unwrap();
        let codes: Vec<&str> = out
            .column("region_code")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    #[test]
    fn test_sort_by_score_descending() {
        let sorted = sort_by_score(&scored()).unwrap();
        let codes: Vec<&str> = sorted
            .column("region_code")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(codes, vec!["A", "B", "D", "C"]);
    }
}
