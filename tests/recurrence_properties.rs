use budget_forecast::errors::ForecastError;
use budget_forecast::ledger::recurrence::{
    catch_up, next_occurrence, period_length_days, RecurrenceRule, MAX_CATCH_UP_STEPS,
};
use chrono::{Duration, NaiveDate};

fn rules() -> Vec<RecurrenceRule> {
    vec![
        RecurrenceRule::weekly(),
        RecurrenceRule::biweekly(),
        RecurrenceRule::monthly(),
        RecurrenceRule::custom(1),
        RecurrenceRule::custom(45),
    ]
}

fn sample_anchors() -> impl Iterator<Item = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
    (0..800).step_by(7).map(move |offset| start + Duration::days(offset))
}

#[test]
fn next_occurrence_is_strictly_after_anchor() {
    for rule in rules() {
        for anchor in sample_anchors() {
            let next = next_occurrence(anchor, &rule).expect("valid rule");
            assert!(next > anchor, "{} from {anchor} gave {next}", rule.label());
        }
    }
}

#[test]
fn test_next_occurrence_fixed_steps() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    assert_eq!(
        next_occurrence(start, &RecurrenceRule::weekly()).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    );
    assert_eq!(
        next_occurrence(start, &RecurrenceRule::biweekly()).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    );
    assert_eq!(
        next_occurrence(start, &RecurrenceRule::monthly()).unwrap(),
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    );
    assert_eq!(
        next_occurrence(start, &RecurrenceRule::custom(3)).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
    );
}

#[test]
fn catch_up_lands_within_one_period_of_reference() {
    let as_of = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
    for rule in rules() {
        for anchor in sample_anchors() {
            let caught = catch_up(anchor, &rule, as_of, MAX_CATCH_UP_STEPS).expect("terminates");
            assert!(caught >= as_of);
            if anchor < as_of {
                // The step before the result must still be before the reference day,
                // so there is no overshoot beyond one period.
                let window = period_length_days(&rule).unwrap().max(31);
                assert!(caught - as_of < Duration::days(window));
            } else {
                assert_eq!(caught, anchor);
            }
        }
    }
}

#[test]
fn catch_up_is_idempotent() {
    let as_of = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
    let anchor = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    for rule in rules() {
        let once = catch_up(anchor, &rule, as_of, MAX_CATCH_UP_STEPS).unwrap();
        let twice = catch_up(once, &rule, as_of, MAX_CATCH_UP_STEPS).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn period_lengths_use_fixed_month_window() {
    assert_eq!(period_length_days(&RecurrenceRule::weekly()).unwrap(), 7);
    assert_eq!(period_length_days(&RecurrenceRule::biweekly()).unwrap(), 14);
    assert_eq!(period_length_days(&RecurrenceRule::monthly()).unwrap(), 30);
    assert_eq!(period_length_days(&RecurrenceRule::custom(21)).unwrap(), 21);
}

#[test]
fn non_positive_custom_intervals_are_rejected() {
    let anchor = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for days in [0, -1, -30] {
        let rule = RecurrenceRule::custom(days);
        assert!(matches!(
            next_occurrence(anchor, &rule),
            Err(ForecastError::InvalidRule(_))
        ));
        assert!(matches!(
            catch_up(anchor, &rule, anchor, MAX_CATCH_UP_STEPS),
            Err(ForecastError::InvalidRule(_))
        ));
    }
}

#[test]
fn month_end_anchor_drifts_after_short_month() {
    // Each step is taken from the previous result, so a clamp sticks.
    let rule = RecurrenceRule::monthly();
    let jan = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let feb = next_occurrence(jan, &rule).unwrap();
    let mar = next_occurrence(feb, &rule).unwrap();
    assert_eq!(feb, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    assert_eq!(mar, NaiveDate::from_ymd_opt(2025, 3, 28).unwrap());
}
