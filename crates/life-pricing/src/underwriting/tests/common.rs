use std::sync::Arc;

use chrono::NaiveDate;

use crate::underwriting::domain::{ApplicantId, ApplicantRecord};
use crate::underwriting::history::{HistoricalDataset, HistoricalRecord};
use crate::underwriting::RiskScoringEngine;

pub(crate) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub(crate) fn healthy_applicant(id: &str) -> ApplicantRecord {
    ApplicantRecord {
        customer_id: ApplicantId(id.to_string()),
        age: 25.0,
        gender: "Female".to_string(),
        occupation: "Software Engineer".to_string(),
        occupation_class: "Class I (Low Risk)".to_string(),
        height_inches: 66.0,
        weight_lbs: 136.0,
        bmi: 22.0,
        blood_pressure_systolic: 115,
        blood_pressure_diastolic: 75,
        total_cholesterol: 180,
        hdl_cholesterol: 60,
        ldl_cholesterol: 100,
        smoking_status: "Never".to_string(),
        alcohol_consumption: "None".to_string(),
        exercise_frequency: "Active (5+/week)".to_string(),
        chronic_conditions: "None".to_string(),
        family_history: "None".to_string(),
        dangerous_hobbies: "None".to_string(),
        annual_income: 85_000,
        coverage_amount_requested: 500_000,
        credit_score: 760,
        existing_coverage: 0,
    }
}

pub(crate) fn high_risk_applicant(id: &str) -> ApplicantRecord {
    ApplicantRecord {
        customer_id: ApplicantId(id.to_string()),
        age: 65.0,
        gender: "Male".to_string(),
        occupation: "Commercial Fisherman".to_string(),
        occupation_class: "Class IV (Very High Risk)".to_string(),
        height_inches: 70.0,
        weight_lbs: 258.0,
        bmi: 37.0,
        blood_pressure_systolic: 165,
        blood_pressure_diastolic: 100,
        total_cholesterol: 260,
        hdl_cholesterol: 35,
        ldl_cholesterol: 180,
        smoking_status: "Current".to_string(),
        alcohol_consumption: "Heavy (>7/week)".to_string(),
        exercise_frequency: "Sedentary".to_string(),
        chronic_conditions: "Diabetes;Hypertension".to_string(),
        family_history: "Heart Disease".to_string(),
        dangerous_hobbies: "Motorcycle Racing".to_string(),
        annual_income: 60_000,
        coverage_amount_requested: 250_000,
        credit_score: 610,
        existing_coverage: 50_000,
    }
}

/// Accepted, active, claim-free policy issued on 2022-01-01.
pub(crate) fn history_record(
    age: f64,
    smoking_status: &str,
    occupation_class: &str,
    risk_score: f64,
) -> HistoricalRecord {
    HistoricalRecord {
        customer_id: None,
        age: Some(age),
        gender: "Female".to_string(),
        occupation_class: occupation_class.to_string(),
        bmi: Some(24.0),
        blood_pressure_systolic: Some(118.0),
        total_cholesterol: Some(190.0),
        smoking_status: smoking_status.to_string(),
        alcohol_consumption: "None".to_string(),
        exercise_frequency: "Active (5+/week)".to_string(),
        chronic_conditions: "None".to_string(),
        family_history: "None".to_string(),
        dangerous_hobbies: "None".to_string(),
        risk_score_assigned: Some(risk_score),
        annual_premium_assigned: Some(500.0),
        policy_accepted: Some(true),
        policy_active: Some(true),
        claim_filed: Some(false),
        policy_issue_date: NaiveDate::from_ymd_opt(2022, 1, 1),
    }
}

pub(crate) fn repeat_records(
    count: usize,
    template: impl Fn(usize) -> HistoricalRecord,
) -> Vec<HistoricalRecord> {
    (0..count).map(template).collect()
}

pub(crate) fn engine_with(records: Vec<HistoricalRecord>) -> RiskScoringEngine {
    RiskScoringEngine::new(Some(Arc::new(HistoricalDataset::new(records)))).with_as_of(as_of())
}

pub(crate) fn engine_without_history() -> RiskScoringEngine {
    RiskScoringEngine::new(None).with_as_of(as_of())
}
