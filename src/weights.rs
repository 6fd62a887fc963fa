//! Weight configuration for the composite score.
//!
//! The recognized metric set is a closed enumeration: a weight file with a
//! typoed metric name is rejected outright instead of being silently dropped
//! and becoming indistinguishable from an absent optional metric.

use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};

/// The closed set of metrics the scorer recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    OwnershipPct,
    IrsadRank,
    IrsadScore,
    MedianPrice,
    MedianRent,
    VacancyPct,
    Growth1y,
    YieldPct,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::OwnershipPct,
        Metric::IrsadRank,
        Metric::IrsadScore,
        Metric::MedianPrice,
        Metric::MedianRent,
        Metric::VacancyPct,
        Metric::Growth1y,
        Metric::YieldPct,
    ];

    /// The column name this metric carries in fused tables.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::OwnershipPct => "ownership_pct",
            Metric::IrsadRank => "irsad_rank",
            Metric::IrsadScore => "irsad_score",
            Metric::MedianPrice => "median_price",
            Metric::MedianRent => "median_rent",
            Metric::VacancyPct => "vacancy_pct",
            Metric::Growth1y => "growth_1y",
            Metric::YieldPct => "yield_pct",
        }
    }
}

/// Signed per-metric weights for one scoring pass.
///
/// Positive weight: higher raw value is better. Negative weight: higher raw
/// value is worse (the normalized value is inverted before weighting). A
/// zero weight removes the metric from the score and from the weight total.
///
/// Immutable input to the scorer; presets are just alternate values of this
/// struct with no separate code path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub ownership_pct: f64,
    pub irsad_rank: f64,
    pub irsad_score: f64,
    pub median_price: f64,
    pub median_rent: f64,
    pub vacancy_pct: f64,
    pub growth_1y: f64,
    pub yield_pct: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            ownership_pct: 0.15,
            irsad_rank: -0.10,
            irsad_score: 0.0,
            median_price: -0.20,
            median_rent: 0.10,
            vacancy_pct: -0.25,
            growth_1y: 0.10,
            yield_pct: 0.20,
        }
    }
}

impl Weights {
    /// Preset favoring cash flow and entry price over amenity.
    pub fn investor() -> Self {
        Self {
            ownership_pct: 0.05,
            irsad_rank: -0.05,
            irsad_score: 0.0,
            median_price: -0.15,
            median_rent: 0.10,
            vacancy_pct: -0.25,
            growth_1y: 0.15,
            yield_pct: 0.25,
        }
    }

    /// Preset favoring stable, owner-occupied, well-ranked areas.
    pub fn owner_occupier() -> Self {
        Self {
            ownership_pct: 0.25,
            irsad_rank: -0.20,
            irsad_score: 0.0,
            median_price: -0.25,
            median_rent: 0.0,
            vacancy_pct: -0.10,
            growth_1y: 0.10,
            yield_pct: 0.10,
        }
    }

    /// The weight assigned to one metric.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::OwnershipPct => self.ownership_pct,
            Metric::IrsadRank => self.irsad_rank,
            Metric::IrsadScore => self.irsad_score,
            Metric::MedianPrice => self.median_price,
            Metric::MedianRent => self.median_rent,
            Metric::VacancyPct => self.vacancy_pct,
            Metric::Growth1y => self.growth_1y,
            Metric::YieldPct => self.yield_pct,
        }
    }

    /// All metrics with their weights, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Parse a weight configuration from JSON.
    ///
    /// Fields are optional and default to the standard weights; unrecognized
    /// fields are a hard error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScoreError::WeightConfig(e.to_string()))
    }
}
