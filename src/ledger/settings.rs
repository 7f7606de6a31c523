use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::recurrence::{Frequency, RecurrenceRule};
use crate::errors::{ForecastError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pay cadence used to delimit the current pay cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaySettings {
    pub pay_frequency: RecurrenceRule,
    #[serde(default)]
    pub last_pay_date: Option<NaiveDate>,
}

impl PaySettings {
    pub fn new(pay_frequency: RecurrenceRule, last_pay_date: NaiveDate) -> Self {
        Self {
            pay_frequency,
            last_pay_date: Some(last_pay_date),
        }
    }

    /// Builds settings from the loosely typed values a settings record carries.
    ///
    /// The last pay date must be an ISO `YYYY-MM-DD` string; a timestamp suffix
    /// (`2025-01-15T00:00:00Z`) is tolerated and ignored.
    pub fn parse(
        frequency: Frequency,
        custom_days: Option<i64>,
        last_pay_date: Option<&str>,
    ) -> Result<Self> {
        let raw = last_pay_date
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ForecastError::InvalidSettings("last pay date is missing".into()))?;
        let date_part = raw.split('T').next().unwrap_or(raw);
        let parsed = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|err| {
            ForecastError::InvalidSettings(format!("last pay date `{raw}` is not a date: {err}"))
        })?;
        let pay_frequency = RecurrenceRule {
            frequency,
            custom_interval_days: custom_days,
        };
        Ok(Self::new(pay_frequency, parsed))
    }

    /// Returns the pay-cycle anchor, failing when it was never recorded.
    pub fn anchor(&self) -> Result<NaiveDate> {
        self.last_pay_date
            .ok_or_else(|| ForecastError::InvalidSettings("last pay date is missing".into()))
    }
}
