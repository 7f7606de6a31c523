use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{cycle_end, ForecastDiagnostic, ItemKind};
use crate::ledger::recurrence::{catch_up, MAX_CATCH_UP_STEPS};
use crate::ledger::RecurringExpense;

/// A bill rolled forward to its next due date on or after the reference day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillProjection {
    pub bill_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub is_in_current_cycle: bool,
    pub needs_reservation: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BillSchedule {
    /// Sorted by due date; ties keep input order.
    pub projections: Vec<BillProjection>,
    pub skipped: Vec<ForecastDiagnostic>,
}

impl BillSchedule {
    /// Sum of bills due inside the current cycle window.
    pub fn due_now(&self) -> f64 {
        self.projections
            .iter()
            .filter(|bill| bill.is_in_current_cycle)
            .map(|bill| bill.amount)
            .sum()
    }

    /// Sum of bills falling after the next payday.
    pub fn reserved(&self) -> f64 {
        self.projections
            .iter()
            .filter(|bill| bill.needs_reservation)
            .map(|bill| bill.amount)
            .sum()
    }
}

pub fn project_bills(
    bills: &[RecurringExpense],
    as_of: NaiveDate,
    next_pay_date: NaiveDate,
    cycle_length_days: i64,
) -> BillSchedule {
    project_bills_bounded(
        bills,
        as_of,
        next_pay_date,
        cycle_length_days,
        MAX_CATCH_UP_STEPS,
    )
}

/// Projects every bill, recording a diagnostic instead of failing when a
/// bill's schedule cannot be resolved within `max_steps`.
pub fn project_bills_bounded(
    bills: &[RecurringExpense],
    as_of: NaiveDate,
    next_pay_date: NaiveDate,
    cycle_length_days: i64,
    max_steps: usize,
) -> BillSchedule {
    let window_end = cycle_end(as_of, cycle_length_days);
    let mut schedule = BillSchedule::default();

    for bill in bills {
        let projected = bill
            .validate()
            .and_then(|_| catch_up(bill.due_date, &bill.rule, as_of, max_steps));
        let due_date = match projected {
            Ok(date) => date,
            Err(err) => {
                schedule.skipped.push(ForecastDiagnostic::skipped(
                    ItemKind::Bill,
                    bill.id,
                    &bill.name,
                    &err,
                ));
                continue;
            }
        };
        schedule.projections.push(BillProjection {
            bill_id: bill.id,
            name: bill.name.clone(),
            amount: bill.amount,
            due_date,
            is_in_current_cycle: due_date < window_end,
            needs_reservation: due_date > next_pay_date,
        });
    }

    // sort_by_key is stable, so equal dates keep input order.
    schedule.projections.sort_by_key(|bill| bill.due_date);
    tracing::debug!(
        projected = schedule.projections.len(),
        skipped = schedule.skipped.len(),
        %as_of,
        %next_pay_date,
        "bills projected"
    );
    schedule
}
