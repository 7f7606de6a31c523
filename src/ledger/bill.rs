use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recurrence::RecurrenceRule;
use crate::errors::{ForecastError, Result};

/// A recurring expense as stored by the user.
///
/// `due_date` may be stale; projection rolls it forward without touching the
/// stored value. Payment status is informational and does not change what the
/// forecast reserves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringExpense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub rule: RecurrenceRule,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_date: Option<NaiveDate>,
}

impl RecurringExpense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        rule: RecurrenceRule,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            rule,
            due_date,
            paid: false,
            last_paid_date: None,
        }
    }

    /// Rejects negative or non-finite amounts.
    pub fn validate(&self) -> Result<()> {
        check_amount(&self.name, self.amount)
    }

    pub fn mark_paid(&mut self, on: NaiveDate) {
        self.paid = true;
        self.last_paid_date = Some(on);
    }
}

pub(crate) fn check_amount(name: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ForecastError::InvalidAmount(format!(
            "amount for `{name}` must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent(amount: f64) -> RecurringExpense {
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        RecurringExpense::new("Rent", amount, RecurrenceRule::monthly(), due)
    }

    #[test]
    fn zero_and_positive_amounts_are_valid() {
        assert!(rent(0.0).validate().is_ok());
        assert!(rent(1200.0).validate().is_ok());
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        for amount in [-0.01, f64::NAN, f64::INFINITY] {
            let err = rent(amount).validate().unwrap_err();
            assert!(matches!(err, ForecastError::InvalidAmount(_)), "{amount}");
        }
    }

    #[test]
    fn mark_paid_records_the_payment_day() {
        let mut bill = rent(1200.0);
        let day = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        bill.mark_paid(day);
        assert!(bill.paid);
        assert_eq!(bill.last_paid_date, Some(day));
    }
}
