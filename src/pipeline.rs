//! End-to-end scoring pass: fuse, derive, score.

use crate::derive::derive_metrics;
use crate::error::Result;
use crate::fuse::{fuse, MetricTable};
use crate::score::{score_table, MissingPolicy};
use crate::weights::Weights;
use polars::prelude::*;

/// Build the fused feature table (fusion plus derived metrics), unscored.
///
/// Exposed separately so one fused table can be rescored under alternate
/// weight configurations without re-fusing.
pub fn build_feature_table(base: &DataFrame, tables: &[MetricTable]) -> Result<DataFrame> {
    let mut fused = fuse(base, tables)?;
    derive_metrics(&mut fused)?;
    Ok(fused)
}

/// One full scoring pass over fresh inputs.
///
/// Pure function of its inputs: nothing caller-owned is mutated, no state
/// survives between passes, and the output preserves base row order with a
/// `score` column in [0,100] appended after all fused and derived columns.
pub fn score_regions(
    base: &DataFrame,
    tables: &[MetricTable],
    weights: &Weights,
    policy: MissingPolicy,
) -> Result<DataFrame> {
    let fused = build_feature_table(base, tables)?;
    score_table(&fused, weights, policy)
}
