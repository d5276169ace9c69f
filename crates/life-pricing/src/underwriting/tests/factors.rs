use super::common::*;
use crate::underwriting::history::HistoricalRecord;
use crate::underwriting::RiskFactor;

fn risk_of(factor: RiskFactor, result: &crate::underwriting::PricingResult) -> f64 {
    result
        .steps
        .iter()
        .find(|step| step.factor == factor)
        .map(|step| step.risk)
        .expect("factor scored")
}

#[test]
fn chronic_condition_boundaries() {
    let engine = engine_without_history();

    let none = engine.score(&healthy_applicant("chronic-0")).expect("scores");
    assert_eq!(risk_of(RiskFactor::ChronicConditions, &none), 0.1);

    let mut two = healthy_applicant("chronic-2");
    two.chronic_conditions = "Diabetes;Asthma".to_string();
    let two = engine.score(&two).expect("scores");
    assert!((risk_of(RiskFactor::ChronicConditions, &two) - 0.8).abs() < 1e-12);

    let mut blank = healthy_applicant("chronic-blank");
    blank.chronic_conditions = "  ".to_string();
    let blank = engine.score(&blank).expect("scores");
    assert_eq!(risk_of(RiskFactor::ChronicConditions, &blank), 0.1);
}

#[test]
fn current_smoker_always_rates_095() {
    let engine = engine_without_history();
    for mut applicant in [healthy_applicant("smoker-1"), high_risk_applicant("smoker-2")] {
        applicant.smoking_status = "Current".to_string();
        let result = engine.score(&applicant).expect("scores");
        assert_eq!(risk_of(RiskFactor::Smoking, &result), 0.95);
    }
}

#[test]
fn binary_factors() {
    let engine = engine_without_history();
    let mut applicant = healthy_applicant("binary");
    let baseline = engine.score(&applicant).expect("scores");
    assert_eq!(risk_of(RiskFactor::Gender, &baseline), 0.45);
    assert_eq!(risk_of(RiskFactor::DangerousHobbies, &baseline), 0.1);

    applicant.gender = "Male".to_string();
    applicant.dangerous_hobbies = "Skydiving".to_string();
    let flagged = engine.score(&applicant).expect("scores");
    assert_eq!(risk_of(RiskFactor::Gender, &flagged), 0.55);
    assert_eq!(risk_of(RiskFactor::DangerousHobbies, &flagged), 0.9);
    assert!(flagged.steps[11].explanation.contains("skydiving"));
}

#[test]
fn tiered_factors_display_their_band() {
    let result = engine_without_history()
        .score(&high_risk_applicant("bands"))
        .expect("scores");

    assert_eq!(result.steps[0].value, "65.0 years");
    assert_eq!(result.steps[3].value, "37.0 (Obese Class II)");
    assert_eq!(result.steps[4].value, "165/100 mmHg (Very High (Crisis))");
    assert_eq!(result.steps[5].value, "260 mg/dL (High)");
    assert!((risk_of(RiskFactor::FamilyHistory, &result) - 0.6).abs() < 1e-12);
}

#[test]
fn comparisons_use_factor_specific_cohorts() {
    let mut smoker = history_record(60.0, "Current", "Class IV (Very High Risk)", 0.8);
    smoker.annual_premium_assigned = Some(4_250.0);
    smoker.chronic_conditions = "Diabetes;Hypertension".to_string();
    smoker.claim_filed = Some(true);
    smoker.dangerous_hobbies = "Motorcycle Racing".to_string();
    let records: Vec<HistoricalRecord> = vec![
        smoker.clone(),
        smoker,
        history_record(30.0, "Never", "Class I (Low Risk)", 0.2),
    ];

    let result = engine_with(records)
        .score(&high_risk_applicant("cohorts"))
        .expect("scores");

    let smoking = result.steps[6].comparison.as_ref().expect("smoking cohort");
    assert_eq!(smoking.cohort_size, 2);
    assert_eq!(smoking.avg_premium, Some(4_250.0));
    assert!(result.steps[6].explanation.contains("$4,250 annual premiums"));

    let chronic = result.steps[9].comparison.as_ref().expect("chronic cohort");
    assert_eq!(chronic.cohort_size, 2);
    assert_eq!(chronic.claim_rate, Some(100.0));

    let hobby = result.steps[11].comparison.as_ref().expect("hobby cohort");
    assert_eq!(hobby.cohort_size, 2);

    // No historical applicant is within 2 BMI points of 37.
    assert!(result.steps[3].comparison.is_none());
}

#[test]
fn comparisons_are_omitted_when_outcomes_are_missing() {
    let mut record = history_record(25.0, "Never", "Class I (Low Risk)", 0.2);
    record.risk_score_assigned = None;

    let result = engine_with(vec![record])
        .score(&healthy_applicant("no-outcomes"))
        .expect("scores");
    assert!(result.steps.iter().all(|step| step.comparison.is_none()));
}
