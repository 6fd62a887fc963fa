//! Column role resolution for inconsistently-named upstream tables.
//!
//! ABS releases rename and re-case their key columns between vintages
//! ("SA2_CODE21", "sa2_code_2021", "SA2_CODE"). Hard-coding one exact name
//! causes silent join failures, so each semantic role carries a declarative
//! alias table: exact lower-cased names first, then recognized substrings.

use crate::error::{Result, ScoreError};
use itertools::Itertools;
use polars::prelude::*;

/// Semantic role a column can play in fusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    /// The region join key. Mandatory in every input table.
    RegionCode,
    /// Human-readable region name. Optional; fusion proceeds without it.
    RegionName,
}

impl ColumnRole {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::RegionCode => "region code",
            ColumnRole::RegionName => "region name",
        }
    }

    /// Exact lower-cased names accepted for this role, in priority order.
    fn exact_aliases(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::RegionCode => &[
                "region_code",
                "sa2_code21",
                "sa2_code_2021",
                "sa2_code",
                "sa2_code_21",
            ],
            ColumnRole::RegionName => &[
                "region_name",
                "sa2_name21",
                "sa2_name_2021",
                "sa2_name",
                "sa2_name_21",
            ],
        }
    }

    /// Substring fallbacks, matched against lower-cased column names.
    fn substring_aliases(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::RegionCode => &["sa2_code", "region_code"],
            ColumnRole::RegionName => &["sa2_name", "region_name"],
        }
    }
}

/// Find the column filling `role`, or `None` if no column matches.
///
/// Pure lookup: case-insensitive, exact aliases win over substring matches,
/// first match in column order wins within each tier.
pub fn try_resolve_column(df: &DataFrame, role: ColumnRole) -> Option<String> {
    let names = df.get_column_names();

    for alias in role.exact_aliases() {
        if let Some(name) = names.iter().find(|n| n.to_lowercase() == *alias) {
            return Some(name.to_string());
        }
    }
    for alias in role.substring_aliases() {
        if let Some(name) = names.iter().find(|n| n.to_lowercase().contains(alias)) {
            return Some(name.to_string());
        }
    }
    None
}

/// Find the column filling `role`, failing with `SchemaMismatch` when absent.
///
/// `table` is a diagnostic label naming which input table was being resolved.
pub fn resolve_column(df: &DataFrame, role: ColumnRole, table: &str) -> Result<String> {
    try_resolve_column(df, role).ok_or_else(|| ScoreError::SchemaMismatch {
        role: role.label().to_string(),
        table: table.to_string(),
        columns: df.get_column_names().iter().join(", "),
    })
}
