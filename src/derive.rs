//! Derived metrics: columns computed from fused source metrics.
//!
//! Runs once per pass, after fusion and before scoring, so derived columns
//! participate in the weighted score like any supplied metric.

use crate::data_utils::{has_column, numeric_column};
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Rents are weekly in every source we ingest.
const WEEKS_PER_YEAR: f64 = 52.0;

/// Gross rental yield: annualized rent over sale price, as a percentage.
/// Missing whenever rent is missing, price is missing, or price is zero.
fn rental_yield(rent: Option<f64>, price: Option<f64>) -> Option<f64> {
    match (rent, price) {
        (Some(rent), Some(price)) if price != 0.0 => {
            Some(rent * WEEKS_PER_YEAR / price * 100.0)
        }
        _ => None,
    }
}

/// Compute all derivable metrics absent from the fused table.
///
/// Currently `yield_pct` from `median_rent` and `median_price`. A derivation
/// is skipped when the column was already supplied by a source, or when a
/// required input column is absent entirely.
pub fn derive_metrics(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, "yield_pct")
        && has_column(df, "median_rent")
        && has_column(df, "median_price")
    {
        let rent = numeric_column(df, "median_rent")?;
        let price = numeric_column(df, "median_price")?;
        let yields: Vec<Option<f64>> = rent
            .iter()
            .zip(price.iter())
            .map(|(&r, &p)| rental_yield(r, p))
            .collect();
        df.with_column(Series::new("yield_pct", yields))?;
        debug!("derived yield_pct from median_rent and median_price");
    }
    Ok(())
}
