//! Small frame utilities shared by fusion, derivation and scoring.

use crate::error::Result;
use polars::prelude::*;

/// Canonical string form of a region code.
///
/// Codes are opaque identifiers and must never be handled numerically
/// (leading zeros are significant). Canonicalization only trims whitespace
/// and undoes float round-tripping: a trailing ".0" on an otherwise
/// all-digit token is stripped, so a code that arrived as `101021007.0`
/// still joins against `"101021007"`.
pub fn canonical_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(stripped) = trimmed.strip_suffix(".0") {
        if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
            return stripped.to_string();
        }
    }
    trimmed.to_string()
}

/// Canonical codes for an entire key column, null codes becoming empty strings.
pub fn canonical_codes(series: &Series) -> Result<Vec<String>> {
    let as_str = series.cast(&DataType::String)?;
    let ca = as_str.str()?;
    Ok(ca
        .into_iter()
        .map(|v| canonical_code(v.unwrap_or("")))
        .collect())
}

/// Extract a column as nullable f64, coercing numeric-looking strings and
/// turning anything unparseable into a missing value.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?;
    let as_f64 = series.cast(&DataType::Float64)?;
    let ca = as_f64.f64()?;
    Ok(ca.into_iter().collect())
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|n| *n == name)
}
