pub mod data_utils;
pub mod derive;
pub mod error;
pub mod fuse;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod score;
pub mod view;
pub mod weights;

pub use error::{Result, ScoreError};
pub use fuse::MetricTable;
pub use pipeline::{build_feature_table, score_regions};
pub use score::{score_rows, score_table, MissingPolicy, NEUTRAL_SCORE};
pub use weights::{Metric, Weights};
