use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Schema mismatch: no {role} column in table '{table}' (columns: {columns})")]
    SchemaMismatch {
        role: String,
        table: String,
        columns: String,
    },

    #[error("Weight configuration error: {0}")]
    WeightConfig(String),

    #[error("Frame error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
