use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bill::check_amount;
use super::recurrence::RecurrenceRule;
use crate::errors::Result;

/// A paycheck or other repeating deposit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringIncome {
    pub id: Uuid,
    pub source: String,
    pub amount: f64,
    pub rule: RecurrenceRule,
    pub next_occurrence: NaiveDate,
}

impl RecurringIncome {
    pub fn new(
        source: impl Into<String>,
        amount: f64,
        rule: RecurrenceRule,
        next_occurrence: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            amount,
            rule,
            next_occurrence,
        }
    }

    /// Rejects negative or non-finite amounts.
    pub fn validate(&self) -> Result<()> {
        check_amount(&self.source, self.amount)
    }
}
