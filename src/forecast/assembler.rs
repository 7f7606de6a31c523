use super::{
    bills::project_bills_bounded, goals::goal_progress, income::current_cycle_income_bounded,
    ForecastDiagnostic, ForecastInput, ForecastOutput, ItemKind,
};
use crate::config::ForecastConfig;
use crate::errors::Result;
use crate::ledger::recurrence::{next_on_or_after, period_length_days};
use crate::time::{Clock, SystemClock};

/// Builds a forecast with default settings, dated by the system clock when
/// the input carries no `as_of`.
pub fn build_forecast(input: &ForecastInput) -> Result<ForecastOutput> {
    build_forecast_with(input, &ForecastConfig::default(), &SystemClock)
}

/// Builds a forecast using the given configuration and clock.
///
/// Item-level problems (a bill or income source with a malformed rule, a goal
/// with a non-positive target) are excluded and listed in `diagnostics`.
/// Problems with the pay settings abort the whole forecast.
pub fn build_forecast_with(
    input: &ForecastInput,
    config: &ForecastConfig,
    clock: &dyn Clock,
) -> Result<ForecastOutput> {
    let as_of = input.as_of.unwrap_or_else(|| clock.today());
    let pay_rule = &input.pay_settings.pay_frequency;
    let anchor = input.pay_settings.anchor()?;
    let next_pay_date = next_on_or_after(anchor, pay_rule, as_of, config.max_catch_up_steps)?;
    let cycle_length_days = period_length_days(pay_rule)?;

    let schedule = project_bills_bounded(
        &input.bills,
        as_of,
        next_pay_date,
        cycle_length_days,
        config.max_catch_up_steps,
    );
    let bills_due_now = schedule.due_now();
    let reserved_for_bills = schedule.reserved();

    let income = current_cycle_income_bounded(
        &input.income,
        as_of,
        cycle_length_days,
        config.max_catch_up_steps,
    );

    let raw_discretionary =
        input.current_balance + income.total - bills_due_now - reserved_for_bills;
    let discretionary = raw_discretionary.max(0.0);
    let suggested = discretionary * config.goal_contribution_rate;

    let mut diagnostics = schedule.skipped;
    diagnostics.extend(income.skipped);

    let mut goals_progress = Vec::with_capacity(input.goals.len());
    for goal in &input.goals {
        match goal_progress(goal, suggested, as_of) {
            Ok(progress) => goals_progress.push(progress),
            Err(err) => diagnostics.push(ForecastDiagnostic::skipped(
                ItemKind::Goal,
                goal.id,
                &goal.name,
                &err,
            )),
        }
    }

    tracing::info!(
        %as_of,
        %next_pay_date,
        cycle_length_days,
        bills_due_now,
        reserved_for_bills,
        raw_discretionary,
        discretionary,
        diagnostics = diagnostics.len(),
        "forecast built"
    );

    Ok(ForecastOutput {
        as_of,
        current_balance: input.current_balance,
        income_this_cycle: income.total,
        bills_due_now,
        reserved_for_bills,
        raw_discretionary,
        discretionary,
        next_pay_date,
        cycle_length_days,
        upcoming_bills: schedule.projections,
        goals_progress,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::errors::ForecastError;
    use crate::ledger::{PaySettings, RecurrenceRule};
    use crate::time::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn clock_supplies_missing_reference_day() {
        let settings = PaySettings::new(RecurrenceRule::weekly(), date(2025, 8, 1));
        let input = ForecastInput::new(100.0, settings);
        let clock = FixedClock(date(2025, 8, 20));

        let output = build_forecast_with(&input, &ForecastConfig::default(), &clock).unwrap();
        assert_eq!(output.as_of, date(2025, 8, 20));
        assert_eq!(output.next_pay_date, date(2025, 8, 22));
    }

    #[test]
    fn missing_last_pay_date_is_fatal() {
        let settings = PaySettings {
            pay_frequency: RecurrenceRule::biweekly(),
            last_pay_date: None,
        };
        let input = ForecastInput::new(100.0, settings).as_of(date(2025, 8, 20));
        let err = build_forecast(&input).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidSettings(_)));
    }

    #[test]
    fn invalid_pay_frequency_is_fatal() {
        let settings = PaySettings::new(RecurrenceRule::custom(0), date(2025, 8, 1));
        let input = ForecastInput::new(100.0, settings).as_of(date(2025, 8, 20));
        let err = build_forecast(&input).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidRule(_)));
    }

    #[test]
    fn configured_contribution_rate_is_applied() {
        let settings = PaySettings::new(RecurrenceRule::biweekly(), date(2025, 8, 15));
        let input = ForecastInput::new(1000.0, settings)
            .as_of(date(2025, 8, 20))
            .with_goal(crate::ledger::Goal::new("Fund", 5000.0, 0.0));
        let config = ForecastConfig {
            goal_contribution_rate: 0.25,
            ..ForecastConfig::default()
        };
        let output = build_forecast_with(&input, &config, &SystemClock).unwrap();
        assert_eq!(output.goals_progress[0].suggested_monthly_contribution, 250.0);
    }
}
