//! Composite scoring: weighted sum of normalized metrics onto [0,100].

use crate::data_utils::{has_column, numeric_column};
use crate::error::Result;
use crate::normalize::normalize_keep_missing;
use crate::weights::{Metric, Weights};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Score every row receives when no configured metric has any data.
/// Neutral by design: "no information" must not look artificially bad.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// How rows with missing metric values enter the weighted average.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Missing values become 0.0 after normalization (the compatible
    /// default). This biases sparse regions toward the low end of each
    /// metric they lack.
    #[default]
    ZeroFill,
    /// Strict opt-in: a row's missing metrics are excluded from both its
    /// weighted sum and its weight total. A row with no data at all falls
    /// back to the neutral score.
    Exclude,
}

/// Compute the composite score for every row of a fused table.
///
/// For each recognized metric with a nonzero weight and a matching column:
/// normalize to [0,1], invert (`1 - v`) when the weight is negative so that
/// lower-is-better metrics contribute positively, and accumulate
/// `|weight| * v'` against a `|weight|` total. The row score is the weighted
/// average scaled to [0,100]. Metrics configured but absent from the table
/// are skipped; if nothing is scorable, every row gets `NEUTRAL_SCORE`.
pub fn score_rows(df: &DataFrame, weights: &Weights, policy: MissingPolicy) -> Result<Vec<f64>> {
    let height = df.height();

    let active: Vec<(Metric, f64)> = weights
        .entries()
        .filter(|(metric, weight)| *weight != 0.0 && has_column(df, metric.column_name()))
        .collect();

    if active.is_empty() {
        info!("no configured metric present in table, falling back to neutral score");
        return Ok(vec![NEUTRAL_SCORE; height]);
    }
    debug!(metrics = active.len(), policy = ?policy, "scoring fused table");

    let mut sums = vec![0.0f64; height];
    let mut totals = vec![0.0f64; height];
    let global_total: f64 = active.iter().map(|(_, w)| w.abs()).sum();

    for (metric, weight) in &active {
        let raw = numeric_column(df, metric.column_name())?;
        let normalized = normalize_keep_missing(&raw);
        for (row, value) in normalized.iter().enumerate() {
            let value = match (policy, value) {
                (_, Some(v)) => *v,
                (MissingPolicy::ZeroFill, None) => 0.0,
                (MissingPolicy::Exclude, None) => continue,
            };
            let contribution = if *weight < 0.0 { 1.0 - value } else { value };
            sums[row] += weight.abs() * contribution;
            totals[row] += weight.abs();
        }
    }

    Ok((0..height)
        .map(|row| {
            let total = match policy {
                MissingPolicy::ZeroFill => global_total,
                MissingPolicy::Exclude => totals[row],
            };
            if total == 0.0 {
                NEUTRAL_SCORE
            } else {
                (sums[row] / total * 100.0).clamp(0.0, 100.0)
            }
        })
        .collect())
}

/// Score a fused table and return it with a `score` column appended.
pub fn score_table(df: &DataFrame, weights: &Weights, policy: MissingPolicy) -> Result<DataFrame> {
    let scores = score_rows(df, weights, policy)?;
    let mut scored = df.clone();
    scored.with_column(Series::new("score", scores))?;
    Ok(scored)
}
