use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::Goal;

const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    pub goal: Goal,
    /// Uncapped; above 100 once the goal is overfunded.
    pub progress_percent: f64,
    pub suggested_monthly_contribution: f64,
    /// Present only for goals with a deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_monthly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_remaining: Option<f64>,
    pub on_track: bool,
}

/// Scores a goal against the flat suggested contribution.
///
/// Goals without a deadline are always on track. Deadlines closer than a
/// month, or already passed, count as one month away.
pub fn goal_progress(
    goal: &Goal,
    suggested_monthly_contribution: f64,
    as_of: NaiveDate,
) -> Result<GoalProgress> {
    goal.validate()?;
    let progress_percent = goal.current_amount / goal.target_amount * 100.0;

    let (months_remaining, required_monthly, on_track) = match goal.deadline {
        Some(deadline) => {
            let days = (deadline - as_of).num_days() as f64;
            let months = (days / DAYS_PER_MONTH).max(1.0);
            let required = goal.remaining() / months;
            (
                Some(months),
                Some(required),
                suggested_monthly_contribution >= required,
            )
        }
        None => (None, None, true),
    };

    Ok(GoalProgress {
        goal: goal.clone(),
        progress_percent,
        suggested_monthly_contribution,
        required_monthly,
        months_remaining,
        on_track,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_deadline_counts_as_one_month() {
        let goal = Goal::new("Trip", 1000.0, 400.0).with_deadline(date(2025, 1, 1));
        let progress = goal_progress(&goal, 100.0, date(2025, 3, 1)).unwrap();
        assert_eq!(progress.months_remaining, Some(1.0));
        assert_eq!(progress.required_monthly, Some(600.0));
        assert!(!progress.on_track);
    }

    #[test]
    fn overfunded_goal_reports_above_hundred_and_on_track() {
        let goal = Goal::new("Buffer", 500.0, 750.0).with_deadline(date(2025, 12, 31));
        let progress = goal_progress(&goal, 0.0, date(2025, 6, 1)).unwrap();
        assert_eq!(progress.progress_percent, 150.0);
        assert!(progress.on_track);
    }

    #[test]
    fn no_deadline_is_always_on_track() {
        let goal = Goal::new("Someday", 10_000.0, 0.0);
        let progress = goal_progress(&goal, 0.0, date(2025, 6, 1)).unwrap();
        assert!(progress.on_track);
        assert_eq!(progress.required_monthly, None);
    }

    #[test]
    fn zero_target_is_rejected() {
        let goal = Goal::new("Empty", 0.0, 0.0);
        assert!(goal_progress(&goal, 10.0, date(2025, 6, 1)).is_err());
    }

    #[test]
    fn negative_saved_amount_is_rejected() {
        let goal = Goal::new("Overdrawn", 500.0, -20.0);
        let err = goal_progress(&goal, 10.0, date(2025, 6, 1)).unwrap_err();
        assert!(matches!(err, crate::errors::ForecastError::InvalidGoal(_)));
    }
}
