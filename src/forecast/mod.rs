//! Pay-cycle forecasting: bill projection, income aggregation, and the
//! discretionary figure derived from them.

pub mod assembler;
pub mod bills;
pub mod goals;
pub mod income;
pub mod periods;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ForecastError;
use crate::ledger::{Goal, PaySettings, RecurringExpense, RecurringIncome};

pub use assembler::{build_forecast, build_forecast_with};
pub use bills::{project_bills, project_bills_bounded, BillProjection, BillSchedule};
pub use goals::{goal_progress, GoalProgress};
pub use income::{current_cycle_income, current_cycle_income_bounded, CycleIncome};
pub use periods::{pay_periods, PayPeriod, PayPlan};

/// Snapshot handed to the engine by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastInput {
    pub current_balance: f64,
    #[serde(default)]
    pub income: Vec<RecurringIncome>,
    #[serde(default)]
    pub bills: Vec<RecurringExpense>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    pub pay_settings: PaySettings,
    /// Reference day; the injected clock's today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl ForecastInput {
    pub fn new(current_balance: f64, pay_settings: PaySettings) -> Self {
        Self {
            current_balance,
            income: Vec::new(),
            bills: Vec::new(),
            goals: Vec::new(),
            pay_settings,
            as_of: None,
        }
    }

    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn with_income(mut self, income: RecurringIncome) -> Self {
        self.income.push(income);
        self
    }

    pub fn with_bill(mut self, bill: RecurringExpense) -> Self {
        self.bills.push(bill);
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goals.push(goal);
        self
    }
}

/// Result of a forecast run, built once for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutput {
    pub as_of: NaiveDate,
    pub current_balance: f64,
    pub income_this_cycle: f64,
    pub bills_due_now: f64,
    pub reserved_for_bills: f64,
    /// Balance after income and bills, before clamping; negative means a shortfall.
    pub raw_discretionary: f64,
    pub discretionary: f64,
    pub next_pay_date: NaiveDate,
    pub cycle_length_days: i64,
    pub upcoming_bills: Vec<BillProjection>,
    pub goals_progress: Vec<GoalProgress>,
    #[serde(default)]
    pub diagnostics: Vec<ForecastDiagnostic>,
}

impl ForecastOutput {
    pub fn has_shortfall(&self) -> bool {
        self.raw_discretionary < 0.0
    }

    /// Money missing to cover every counted bill; zero when there is none.
    pub fn shortfall(&self) -> f64 {
        (-self.raw_discretionary).max(0.0)
    }

    pub fn bills_in_current_cycle(&self) -> impl Iterator<Item = &BillProjection> {
        self.upcoming_bills.iter().filter(|bill| bill.is_in_current_cycle)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Bill,
    Income,
    Goal,
}

/// An input item left out of the forecast, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastDiagnostic {
    pub item_id: Uuid,
    pub item_name: String,
    pub kind: ItemKind,
    pub message: String,
}

impl ForecastDiagnostic {
    pub(crate) fn skipped(
        kind: ItemKind,
        item_id: Uuid,
        item_name: &str,
        err: &ForecastError,
    ) -> Self {
        tracing::warn!(
            ?kind,
            %item_id,
            item = item_name,
            error = %err,
            "item excluded from forecast"
        );
        Self {
            item_id,
            item_name: item_name.to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

/// First day after the cycle window that starts at `as_of`.
///
/// Windows reaching past the calendar end at `NaiveDate::MAX`.
pub(crate) fn cycle_end(as_of: NaiveDate, cycle_length_days: i64) -> NaiveDate {
    Duration::try_days(cycle_length_days)
        .and_then(|window| as_of.checked_add_signed(window))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_window_ends_at_calendar_max() {
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(cycle_end(as_of, i64::MAX), NaiveDate::MAX);
        assert_eq!(cycle_end(as_of, 1_000_000_000), NaiveDate::MAX);
        assert_eq!(cycle_end(as_of, 14), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }
}
