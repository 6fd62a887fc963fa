//! Feature fusion: left-join per-region metric tables onto a base table.
//!
//! The base table (geometry + identity) defines the row set; every metric
//! table contributes nullable f64 columns keyed on the canonical region code.
//! Base rows without a match keep missing values, metric rows without a base
//! region are dropped, and base row order is preserved exactly.

use crate::data_utils::{canonical_codes, has_column, numeric_column};
use crate::error::Result;
use crate::schema::{resolve_column, try_resolve_column, ColumnRole};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// One external metric table plus a diagnostic label for logging.
#[derive(Clone, Debug)]
pub struct MetricTable {
    pub name: String,
    pub frame: DataFrame,
}

impl MetricTable {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }
}

/// Fuse zero or more metric tables onto the base table.
///
/// The base must expose a region code column (any recognized alias); it is
/// renamed to `region_code` and rewritten in canonical string form. A region
/// name column is optional and renamed to `region_name` when found. All other
/// base columns, geometry included, pass through untouched.
///
/// Output columns are the base columns followed by metric columns in
/// table-supply order. Duplicate region codes within one metric table are
/// last-wins; a metric column name repeated by a later table replaces the
/// earlier one. Supplying no metric tables is valid and yields the
/// canonicalized base unchanged.
pub fn fuse(base: &DataFrame, tables: &[MetricTable]) -> Result<DataFrame> {
    let code_col = resolve_column(base, ColumnRole::RegionCode, "base")?;
    let base_codes = canonical_codes(base.column(&code_col)?)?;

    // Inputs are caller-owned; all column writes happen on this copy.
    let mut fused = base.clone();
    if code_col != "region_code" {
        fused.rename(&code_col, "region_code")?;
    }
    fused.with_column(Series::new("region_code", base_codes.clone()))?;

    if let Some(name_col) = try_resolve_column(base, ColumnRole::RegionName) {
        if name_col != "region_name" && !has_column(&fused, "region_name") {
            fused.rename(&name_col, "region_name")?;
        }
    }

    for table in tables {
        fuse_one(&mut fused, &base_codes, table)?;
    }

    info!(
        regions = fused.height(),
        tables = tables.len(),
        "fused feature table"
    );
    Ok(fused)
}

fn fuse_one(fused: &mut DataFrame, base_codes: &[String], table: &MetricTable) -> Result<()> {
    let code_col = resolve_column(&table.frame, ColumnRole::RegionCode, &table.name)?;
    let codes = canonical_codes(table.frame.column(&code_col)?)?;

    // Last row wins for duplicate codes; deduplication is the supplier's job.
    let mut by_code: HashMap<&str, usize> = HashMap::with_capacity(codes.len());
    for (idx, code) in codes.iter().enumerate() {
        if !code.is_empty() {
            by_code.insert(code.as_str(), idx);
        }
    }

    let matched = base_codes
        .iter()
        .filter(|c| by_code.contains_key(c.as_str()))
        .count();
    debug!(
        table = %table.name,
        rows = table.frame.height(),
        matched,
        regions = base_codes.len(),
        "joining metric table"
    );

    let name_col = try_resolve_column(&table.frame, ColumnRole::RegionName);
    for col_name in table.frame.get_column_names() {
        if col_name == code_col {
            continue;
        }
        if name_col.as_deref() == Some(col_name) {
            continue;
        }
        let values = numeric_column(&table.frame, col_name)?;
        let aligned: Vec<Option<f64>> = base_codes
            .iter()
            .map(|code| by_code.get(code.as_str()).and_then(|&idx| values[idx]))
            .collect();
        fused.with_column(Series::new(col_name, aligned))?;
    }
    Ok(())
}
