use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ForecastDiagnostic, ForecastInput, ItemKind};
use crate::config::ForecastConfig;
use crate::errors::{ForecastError, Result};
use crate::ledger::recurrence::{next_occurrence, occurrences_between, RecurrenceRule};
use crate::time::Clock;

/// One pay period, `[start, end)`, with the cash expected to move inside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl PayPeriod {
    fn empty(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            income: 0.0,
            expenses: 0.0,
            net: 0.0,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayPlan {
    pub periods: Vec<PayPeriod>,
    pub skipped: Vec<ForecastDiagnostic>,
}

/// Lists the current pay period and the ones after it, up to
/// `config.pay_period_horizon` periods in total.
pub fn pay_periods(
    input: &ForecastInput,
    config: &ForecastConfig,
    clock: &dyn Clock,
) -> Result<PayPlan> {
    let as_of = input.as_of.unwrap_or_else(|| clock.today());
    let rule = &input.pay_settings.pay_frequency;
    let anchor = input.pay_settings.anchor()?;
    let start = current_cycle_start(anchor, rule, as_of, config.max_catch_up_steps)?;

    let mut plan = PayPlan::default();
    let mut period_start = start;
    for _ in 0..config.pay_period_horizon {
        let period_end = next_occurrence(period_start, rule)?;
        plan.periods.push(PayPeriod::empty(period_start, period_end));
        period_start = period_end;
    }
    if plan.periods.is_empty() {
        return Ok(plan);
    }
    let (horizon_start, horizon_end) = (start, period_start);

    for source in &input.income {
        let dates = source.validate().and_then(|_| {
            occurrences_between(
                source.next_occurrence,
                &source.rule,
                horizon_start,
                horizon_end,
                config.max_catch_up_steps,
            )
        });
        match dates {
            Ok(dates) => allocate(&mut plan.periods, &dates, source.amount, Flow::In),
            Err(err) => plan.skipped.push(ForecastDiagnostic::skipped(
                ItemKind::Income,
                source.id,
                &source.source,
                &err,
            )),
        }
    }

    for bill in &input.bills {
        let dates = bill.validate().and_then(|_| {
            occurrences_between(
                bill.due_date,
                &bill.rule,
                horizon_start,
                horizon_end,
                config.max_catch_up_steps,
            )
        });
        match dates {
            Ok(dates) => allocate(&mut plan.periods, &dates, bill.amount, Flow::Out),
            Err(err) => plan.skipped.push(ForecastDiagnostic::skipped(
                ItemKind::Bill,
                bill.id,
                &bill.name,
                &err,
            )),
        }
    }

    for period in &mut plan.periods {
        period.net = period.income - period.expenses;
    }
    Ok(plan)
}

#[derive(Clone, Copy)]
enum Flow {
    In,
    Out,
}

fn allocate(periods: &mut [PayPeriod], dates: &[NaiveDate], amount: f64, flow: Flow) {
    for date in dates {
        if let Some(period) = periods.iter_mut().find(|period| period.contains(*date)) {
            match flow {
                Flow::In => period.income += amount,
                Flow::Out => period.expenses += amount,
            }
        }
    }
}

/// The pay date that opens the cycle containing `as_of`: the step in the
/// chain from `anchor` just before the first pay date on or after `as_of`.
fn current_cycle_start(
    anchor: NaiveDate,
    rule: &RecurrenceRule,
    as_of: NaiveDate,
    max_steps: usize,
) -> Result<NaiveDate> {
    let mut start = anchor;
    for _ in 0..max_steps {
        let next = next_occurrence(start, rule)?;
        if next >= as_of {
            return Ok(start);
        }
        start = next;
    }
    Err(ForecastError::CatchUpLimit {
        anchor,
        as_of,
        steps: max_steps,
    })
}
