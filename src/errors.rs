use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;

/// Error type covering forecast computation and configuration failures.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),
    #[error("Invalid pay settings: {0}")]
    InvalidSettings(String),
    #[error("Catch-up from {anchor} to {as_of} exceeded {steps} steps")]
    CatchUpLimit {
        anchor: NaiveDate,
        as_of: NaiveDate,
        steps: usize,
    },
    #[error("Invalid goal: {0}")]
    InvalidGoal(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ForecastError>;

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}
