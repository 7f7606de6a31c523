use chrono::NaiveDate;

use super::{cycle_end, ForecastDiagnostic, ItemKind};
use crate::ledger::recurrence::{catch_up, MAX_CATCH_UP_STEPS};
use crate::ledger::RecurringIncome;

/// Income expected inside the current cycle window.
#[derive(Debug, Clone, Default)]
pub struct CycleIncome {
    pub total: f64,
    /// Number of sources that contributed to `total`.
    pub contributing: usize,
    pub skipped: Vec<ForecastDiagnostic>,
}

pub fn current_cycle_income(
    income: &[RecurringIncome],
    as_of: NaiveDate,
    cycle_length_days: i64,
) -> CycleIncome {
    current_cycle_income_bounded(income, as_of, cycle_length_days, MAX_CATCH_UP_STEPS)
}

/// Sums sources whose next occurrence on or after `as_of` falls strictly
/// before `as_of + cycle_length_days`.
pub fn current_cycle_income_bounded(
    income: &[RecurringIncome],
    as_of: NaiveDate,
    cycle_length_days: i64,
    max_steps: usize,
) -> CycleIncome {
    let window_end = cycle_end(as_of, cycle_length_days);
    let mut result = CycleIncome::default();

    for source in income {
        let next = source
            .validate()
            .and_then(|_| catch_up(source.next_occurrence, &source.rule, as_of, max_steps));
        match next {
            Ok(next) if next < window_end => {
                result.total += source.amount;
                result.contributing += 1;
            }
            Ok(_) => {}
            Err(err) => result.skipped.push(ForecastDiagnostic::skipped(
                ItemKind::Income,
                source.id,
                &source.source,
                &err,
            )),
        }
    }

    tracing::debug!(
        total = result.total,
        contributing = result.contributing,
        skipped = result.skipped.len(),
        "cycle income aggregated"
    );
    result
}
