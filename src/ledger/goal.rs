use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ForecastError, Result};

/// A savings target. `current_amount` may exceed `target_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64, current_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount,
            deadline: None,
            notes: None,
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(ForecastError::InvalidGoal(format!(
                "target for `{}` must be positive, got {}",
                self.name, self.target_amount
            )));
        }
        if !self.current_amount.is_finite() || self.current_amount < 0.0 {
            return Err(ForecastError::InvalidGoal(format!(
                "saved amount for `{}` must be a non-negative number, got {}",
                self.name, self.current_amount
            )));
        }
        Ok(())
    }

    /// Amount still needed; negative once the goal is overfunded.
    pub fn remaining(&self) -> f64 {
        self.target_amount - self.current_amount
    }
}
