#![allow(dead_code)]

use budget_forecast::ledger::{PaySettings, RecurrenceRule};
use chrono::{Duration, NaiveDate};

/// Reference day shared by scenario tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Biweekly pay, last paid a week ago, so payday is a week out.
pub fn biweekly_pay() -> PaySettings {
    PaySettings::new(RecurrenceRule::biweekly(), days_from_today(-7))
}

pub fn assert_money(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
