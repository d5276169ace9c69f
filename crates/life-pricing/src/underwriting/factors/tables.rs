//! Risk lookup tables. Every threshold and risk value the factor scorers use
//! lives here so the rating basis can be audited in one place.

use super::RiskFactor;
use crate::underwriting::domain::{
    AlcoholConsumption, ExerciseFrequency, OccupationClass, SmokingStatus,
};

/// Fixed factor weights in scoring order. They sum to [`FACTOR_WEIGHT_TOTAL`],
/// so a profile with every factor at maximum risk scores above 1.0.
pub const FACTOR_WEIGHTS: [(RiskFactor, f64); 12] = [
    (RiskFactor::Age, 0.20),
    (RiskFactor::Gender, 0.05),
    (RiskFactor::Occupation, 0.10),
    (RiskFactor::Bmi, 0.15),
    (RiskFactor::BloodPressure, 0.10),
    (RiskFactor::Cholesterol, 0.08),
    (RiskFactor::Smoking, 0.15),
    (RiskFactor::Alcohol, 0.05),
    (RiskFactor::Exercise, 0.04),
    (RiskFactor::ChronicConditions, 0.10),
    (RiskFactor::FamilyHistory, 0.05),
    (RiskFactor::DangerousHobbies, 0.03),
];

/// Published total of the rating basis weights.
pub const FACTOR_WEIGHT_TOTAL: f64 = 1.10;

pub fn total_weight() -> f64 {
    FACTOR_WEIGHTS.iter().map(|(_, weight)| weight).sum()
}

/// Half-open band `[previous upper, upper)` with its risk value and label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub upper: f64,
    pub risk: f64,
    pub label: &'static str,
}

const fn band(upper: f64, risk: f64, label: &'static str) -> Band {
    Band { upper, risk, label }
}

pub const AGE_BANDS: [Band; 6] = [
    band(30.0, 0.10, "under 30"),
    band(40.0, 0.15, "30-39"),
    band(50.0, 0.25, "40-49"),
    band(60.0, 0.40, "50-59"),
    band(70.0, 0.60, "60-69"),
    band(f64::INFINITY, 0.80, "70+"),
];

pub const BMI_BANDS: [Band; 6] = [
    band(18.5, 0.40, "Underweight"),
    band(25.0, 0.20, "Normal"),
    band(30.0, 0.40, "Overweight"),
    band(35.0, 0.60, "Obese Class I"),
    band(40.0, 0.80, "Obese Class II"),
    band(f64::INFINITY, 0.95, "Obese Class III"),
];

/// Staged on the systolic reading.
pub const BLOOD_PRESSURE_BANDS: [Band; 5] = [
    band(120.0, 0.10, "Normal"),
    band(130.0, 0.30, "Elevated"),
    band(140.0, 0.50, "High (Stage 1)"),
    band(160.0, 0.70, "High (Stage 2)"),
    band(f64::INFINITY, 0.90, "Very High (Crisis)"),
];

/// Staged on total cholesterol.
pub const CHOLESTEROL_BANDS: [Band; 3] = [
    band(200.0, 0.20, "Desirable"),
    band(240.0, 0.50, "Borderline High"),
    band(f64::INFINITY, 0.80, "High"),
];

/// First band whose upper bound exceeds `value`. NaN falls into the last band.
pub fn lookup(bands: &[Band], value: f64) -> Band {
    bands
        .iter()
        .copied()
        .find(|band| value < band.upper)
        .unwrap_or_else(|| bands[bands.len() - 1])
}

pub const MALE_RISK: f64 = 0.55;
pub const NON_MALE_RISK: f64 = 0.45;

pub const fn occupation_risk(class: OccupationClass) -> f64 {
    match class {
        OccupationClass::ClassI => 0.2,
        OccupationClass::ClassII => 0.4,
        OccupationClass::ClassIII => 0.7,
        OccupationClass::ClassIV => 0.9,
    }
}

pub const fn smoking_risk(status: SmokingStatus) -> f64 {
    match status {
        SmokingStatus::Never => 0.1,
        SmokingStatus::FormerOverFiveYears => 0.3,
        SmokingStatus::FormerUnderFiveYears => 0.5,
        SmokingStatus::Current => 0.95,
    }
}

pub const fn alcohol_risk(level: AlcoholConsumption) -> f64 {
    match level {
        AlcoholConsumption::None => 0.2,
        AlcoholConsumption::Light => 0.25,
        AlcoholConsumption::Moderate => 0.4,
        AlcoholConsumption::Heavy => 0.8,
    }
}

pub const fn exercise_risk(level: ExerciseFrequency) -> f64 {
    match level {
        ExerciseFrequency::Sedentary => 0.7,
        ExerciseFrequency::Light => 0.5,
        ExerciseFrequency::Moderate => 0.3,
        ExerciseFrequency::Active => 0.15,
    }
}

pub fn chronic_condition_risk(count: usize) -> f64 {
    if count == 0 {
        0.1
    } else {
        (0.4 + count as f64 * 0.2).min(0.95)
    }
}

pub fn family_history_risk(count: usize) -> f64 {
    if count == 0 {
        0.2
    } else {
        (0.4 + count as f64 * 0.2).min(0.8)
    }
}

pub const fn hobby_risk(present: bool) -> f64 {
    if present {
        0.9
    } else {
        0.1
    }
}

// Cohort comparison half-widths.
pub const AGE_COMPARISON_WINDOW: f64 = 5.0;
pub const BMI_COMPARISON_WINDOW: f64 = 2.0;
pub const SYSTOLIC_COMPARISON_WINDOW: f64 = 10.0;
pub const CHOLESTEROL_COMPARISON_WINDOW: f64 = 20.0;
