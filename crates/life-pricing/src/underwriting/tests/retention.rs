use super::common::*;
use crate::underwriting::history::HistoricalDataset;
use crate::underwriting::retention::{estimate_policy_outlook, PolicyOutlook};
use crate::underwriting::{CohortTier, EstimateSource};
use chrono::NaiveDate;

fn issued(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[test]
fn closed_form_without_history() {
    let applicant = healthy_applicant("no-history");
    let outlook = estimate_policy_outlook(&applicant, 0.4, None, as_of());
    assert_eq!(outlook, PolicyOutlook::closed_form(0.4));
    assert!((outlook.predicted_duration_years - 9.6).abs() < 1e-12);
    assert!((outlook.attrition_likelihood - 0.22).abs() < 1e-12);
}

#[test]
fn primary_cohort_used_when_large_enough() {
    let records = repeat_records(50, |i| {
        let mut record = history_record(26.0, "Never", "Class I (Low Risk)", 0.2);
        record.policy_active = Some(i % 5 != 0);
        record.policy_issue_date = issued(2021);
        record
    });
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("primary"), 0.17, Some(&dataset), as_of());
    assert_eq!(
        outlook.source,
        EstimateSource::Cohort {
            tier: CohortTier::Primary,
            cohort_size: 50,
            accepted: 50,
        }
    );
    assert!((outlook.attrition_likelihood - 0.2).abs() < 1e-12);
    // 2021-01-01 to 2025-01-01 is 1461 days.
    assert!((outlook.predicted_duration_years - 4.0).abs() < 1e-12);
}

#[test]
fn relaxes_to_widened_age_when_primary_is_thin() {
    // Only rows outside ±5 years but inside ±10, different class, same smoking status.
    let records = repeat_records(35, |i| {
        let mut record = history_record(33.0, "Never", "Class II (Moderate Risk)", 0.3);
        record.policy_active = Some(i >= 7);
        record.policy_issue_date = issued(2021);
        record
    });
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("widened"), 0.17, Some(&dataset), as_of());
    assert_eq!(
        outlook.source,
        EstimateSource::Cohort {
            tier: CohortTier::WidenedAge,
            cohort_size: 35,
            accepted: 35,
        }
    );
    assert!((outlook.attrition_likelihood - 7.0 / 35.0).abs() < 1e-12);
}

#[test]
fn drops_smoking_filter_when_widened_cohort_is_thin() {
    let records = repeat_records(10, |_| {
        history_record(33.0, "Current", "Class II (Moderate Risk)", 0.6)
    });
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("age-only"), 0.17, Some(&dataset), as_of());
    assert_eq!(
        outlook.source,
        EstimateSource::Cohort {
            tier: CohortTier::AgeOnly,
            cohort_size: 10,
            accepted: 10,
        }
    );
    assert_eq!(outlook.attrition_likelihood, 0.0);
    assert!((outlook.predicted_duration_years - 1096.0 / 365.25).abs() < 1e-12);
}

#[test]
fn prefers_tenure_of_active_policies() {
    let mut records = repeat_records(3, |_| {
        let mut record = history_record(25.0, "Never", "Class I (Low Risk)", 0.2);
        record.policy_issue_date = issued(2015);
        record
    });
    let mut lapsed = history_record(25.0, "Never", "Class I (Low Risk)", 0.2);
    lapsed.policy_active = Some(false);
    lapsed.policy_issue_date = issued(2024);
    records.push(lapsed);
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("tenure"), 0.17, Some(&dataset), as_of());
    let expected = (as_of() - NaiveDate::from_ymd_opt(2015, 1, 1).expect("date")).num_days() as f64
        / 365.25;
    assert!((outlook.predicted_duration_years - expected).abs() < 1e-12);
    assert!((outlook.attrition_likelihood - 0.25).abs() < 1e-12);
}

#[test]
fn falls_back_when_no_policy_was_issued() {
    let records = repeat_records(5, |_| {
        let mut record = history_record(25.0, "Never", "Class I (Low Risk)", 0.2);
        record.policy_accepted = Some(false);
        record.policy_active = Some(false);
        record
    });
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("declined"), 0.3, Some(&dataset), as_of());
    assert_eq!(outlook, PolicyOutlook::closed_form(0.3));
}

#[test]
fn falls_back_when_issue_dates_are_unusable() {
    let records = repeat_records(5, |_| {
        let mut record = history_record(25.0, "Never", "Class I (Low Risk)", 0.2);
        record.policy_issue_date = None;
        record
    });
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("undated"), 0.3, Some(&dataset), as_of());
    assert_eq!(outlook.source, EstimateSource::ClosedForm);
}

#[test]
fn duration_is_clamped_to_a_year() {
    let records = repeat_records(5, |_| {
        let mut record = history_record(25.0, "Never", "Class I (Low Risk)", 0.2);
        record.policy_issue_date = NaiveDate::from_ymd_opt(2024, 10, 1);
        record
    });
    let dataset = HistoricalDataset::new(records);

    let outlook = estimate_policy_outlook(&healthy_applicant("recent"), 0.3, Some(&dataset), as_of());
    assert_eq!(outlook.predicted_duration_years, 1.0);
}

#[test]
fn engine_reports_relaxed_cohort() {
    let engine = engine_with(repeat_records(35, |_| {
        history_record(33.0, "Never", "Class II (Moderate Risk)", 0.3)
    }));
    let result = engine.score(&healthy_applicant("engine-relax")).expect("scores");
    assert!(matches!(
        result.outlook.source,
        EstimateSource::Cohort {
            tier: CohortTier::WidenedAge,
            ..
        }
    ));
}
