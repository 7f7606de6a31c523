use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ForecastError, Result};

/// Upper bound on catch-up steps before a schedule is treated as unusable.
pub const MAX_CATCH_UP_STEPS: usize = 10_000;

const WEEK_DAYS: i64 = 7;
const FORTNIGHT_DAYS: i64 = 14;
/// Fixed cycle-window length used for monthly schedules.
const MONTH_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Custom,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Custom => "custom",
        };
        f.write_str(label)
    }
}

/// How often a bill, income source, or paycheck repeats.
///
/// `custom_interval_days` is only meaningful for [`Frequency::Custom`], where it
/// must be present and positive. Rules arrive from an external store, so a
/// malformed rule is representable and rejected when resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_interval_days: Option<i64>,
}

impl RecurrenceRule {
    pub fn weekly() -> Self {
        Self::fixed(Frequency::Weekly)
    }

    pub fn biweekly() -> Self {
        Self::fixed(Frequency::Biweekly)
    }

    pub fn monthly() -> Self {
        Self::fixed(Frequency::Monthly)
    }

    pub fn custom(days: i64) -> Self {
        Self {
            frequency: Frequency::Custom,
            custom_interval_days: Some(days),
        }
    }

    fn fixed(frequency: Frequency) -> Self {
        Self {
            frequency,
            custom_interval_days: None,
        }
    }

    /// Checks the rule can be resolved.
    pub fn validate(&self) -> Result<()> {
        self.custom_days().map(|_| ())
    }

    fn custom_days(&self) -> Result<Option<i64>> {
        if self.frequency != Frequency::Custom {
            return Ok(None);
        }
        match self.custom_interval_days {
            Some(days) if days > 0 => Ok(Some(days)),
            Some(days) => Err(ForecastError::InvalidRule(format!(
                "custom interval must be positive, got {days} days"
            ))),
            None => Err(ForecastError::InvalidRule(
                "custom frequency requires an interval in days".into(),
            )),
        }
    }

    pub fn label(&self) -> String {
        match (self.frequency, self.custom_interval_days) {
            (Frequency::Weekly, _) => "Weekly".into(),
            (Frequency::Biweekly, _) => "Every 2 Weeks".into(),
            (Frequency::Monthly, _) => "Monthly".into(),
            (Frequency::Custom, Some(1)) => "Daily".into(),
            (Frequency::Custom, Some(n)) => format!("Every {n} Days"),
            (Frequency::Custom, None) => "Custom".into(),
        }
    }
}

/// Returns the occurrence that follows `anchor` under `rule`.
pub fn next_occurrence(anchor: NaiveDate, rule: &RecurrenceRule) -> Result<NaiveDate> {
    let next = match rule.frequency {
        Frequency::Weekly => anchor.checked_add_signed(Duration::days(WEEK_DAYS)),
        Frequency::Biweekly => anchor.checked_add_signed(Duration::days(FORTNIGHT_DAYS)),
        Frequency::Monthly => shift_month(anchor, 1),
        Frequency::Custom => {
            let days = rule.custom_days()?.unwrap_or_default();
            Duration::try_days(days).and_then(|step| anchor.checked_add_signed(step))
        }
    };
    next.ok_or_else(|| {
        ForecastError::InvalidRule(format!(
            "{} step from {anchor} leaves the calendar",
            rule.frequency
        ))
    })
}

/// Length in days of the window treated as "the current cycle" for `rule`.
///
/// Monthly schedules use a flat 30 days here even though [`next_occurrence`]
/// moves by calendar months.
pub fn period_length_days(rule: &RecurrenceRule) -> Result<i64> {
    match rule.frequency {
        Frequency::Weekly => Ok(WEEK_DAYS),
        Frequency::Biweekly => Ok(FORTNIGHT_DAYS),
        Frequency::Monthly => Ok(MONTH_WINDOW_DAYS),
        Frequency::Custom => Ok(rule.custom_days()?.unwrap_or_default()),
    }
}

/// Advances `anchor` until it lands on or after `as_of`.
///
/// An anchor already on or after `as_of` is returned unchanged.
pub fn catch_up(
    anchor: NaiveDate,
    rule: &RecurrenceRule,
    as_of: NaiveDate,
    max_steps: usize,
) -> Result<NaiveDate> {
    rule.validate()?;
    advance_while_before(anchor, anchor, rule, as_of, max_steps)
}

/// Takes at least one step from `anchor`, then keeps advancing until the
/// result is on or after `as_of`.
pub fn next_on_or_after(
    anchor: NaiveDate,
    rule: &RecurrenceRule,
    as_of: NaiveDate,
    max_steps: usize,
) -> Result<NaiveDate> {
    let first = next_occurrence(anchor, rule)?;
    advance_while_before(anchor, first, rule, as_of, max_steps)
}

/// Lists occurrences of the series anchored at `anchor` that fall in `[start, end)`.
///
/// Occurrences before `anchor` are never generated.
pub fn occurrences_between(
    anchor: NaiveDate,
    rule: &RecurrenceRule,
    start: NaiveDate,
    end: NaiveDate,
    max_steps: usize,
) -> Result<Vec<NaiveDate>> {
    let mut date = catch_up(anchor, rule, start, max_steps)?;
    let mut dates = Vec::new();
    while date < end {
        if dates.len() >= max_steps {
            return Err(ForecastError::CatchUpLimit {
                anchor,
                as_of: end,
                steps: max_steps,
            });
        }
        dates.push(date);
        date = next_occurrence(date, rule)?;
    }
    Ok(dates)
}

fn advance_while_before(
    anchor: NaiveDate,
    start: NaiveDate,
    rule: &RecurrenceRule,
    as_of: NaiveDate,
    max_steps: usize,
) -> Result<NaiveDate> {
    let mut date = start;
    let mut steps = 0usize;
    while date < as_of {
        if steps >= max_steps {
            return Err(ForecastError::CatchUpLimit {
                anchor,
                as_of,
                steps: max_steps,
            });
        }
        date = next_occurrence(date, rule)?;
        steps += 1;
    }
    Ok(date)
}

fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32)?);
    NaiveDate::from_ymd_opt(year, month as u32, day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}
