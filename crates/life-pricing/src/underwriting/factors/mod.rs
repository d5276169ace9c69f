mod demographics;
mod health;
mod lifestyle;
mod medical;
pub mod tables;

use super::cohort::{Cohort, CohortFilter, CohortSummary, SummaryMetric};
use super::domain::{ApplicantRecord, ScoringError};
use super::history::HistoricalDataset;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use tables::{FACTOR_WEIGHTS, FACTOR_WEIGHT_TOTAL};

/// The twelve rated factors, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Age,
    Gender,
    Occupation,
    Bmi,
    BloodPressure,
    Cholesterol,
    Smoking,
    Alcohol,
    Exercise,
    ChronicConditions,
    FamilyHistory,
    DangerousHobbies,
}

impl RiskFactor {
    pub fn ordered() -> [Self; 12] {
        FACTOR_WEIGHTS.map(|(factor, _)| factor)
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskFactor::Age => "Age",
            RiskFactor::Gender => "Gender",
            RiskFactor::Occupation => "Occupation",
            RiskFactor::Bmi => "Body Mass Index (BMI)",
            RiskFactor::BloodPressure => "Blood Pressure",
            RiskFactor::Cholesterol => "Cholesterol",
            RiskFactor::Smoking => "Smoking Status",
            RiskFactor::Alcohol => "Alcohol Consumption",
            RiskFactor::Exercise => "Exercise Frequency",
            RiskFactor::ChronicConditions => "Chronic Conditions",
            RiskFactor::FamilyHistory => "Family History",
            RiskFactor::DangerousHobbies => "Dangerous Hobbies",
        }
    }

    pub const fn category(self) -> FactorCategory {
        match self {
            RiskFactor::Age | RiskFactor::Gender | RiskFactor::Occupation => {
                FactorCategory::Demographics
            }
            RiskFactor::Bmi | RiskFactor::BloodPressure | RiskFactor::Cholesterol => {
                FactorCategory::HealthMetrics
            }
            RiskFactor::Smoking
            | RiskFactor::Alcohol
            | RiskFactor::Exercise
            | RiskFactor::DangerousHobbies => FactorCategory::Lifestyle,
            RiskFactor::ChronicConditions | RiskFactor::FamilyHistory => {
                FactorCategory::MedicalHistory
            }
        }
    }

    pub fn weight(self) -> f64 {
        FACTOR_WEIGHTS
            .iter()
            .find(|(factor, _)| *factor == self)
            .map(|(_, weight)| *weight)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Demographics,
    HealthMetrics,
    Lifestyle,
    MedicalHistory,
}

impl FactorCategory {
    pub const fn label(self) -> &'static str {
        match self {
            FactorCategory::Demographics => "Demographics",
            FactorCategory::HealthMetrics => "Health Metrics",
            FactorCategory::Lifestyle => "Lifestyle",
            FactorCategory::MedicalHistory => "Medical History",
        }
    }
}

/// One factor's contribution to the final score, with its explanation trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringStep {
    pub factor: RiskFactor,
    pub category: FactorCategory,
    /// Input as shown to underwriters, e.g. `"128/82 mmHg (Elevated)"`.
    pub value: String,
    pub risk: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub explanation: String,
    pub comparison: Option<CohortSummary>,
}

impl ScoringStep {
    fn new(
        factor: RiskFactor,
        value: String,
        risk: f64,
        explanation: String,
        comparison: Option<CohortSummary>,
    ) -> Self {
        let weight = factor.weight();
        Self {
            factor,
            category: factor.category(),
            value,
            risk,
            weight,
            weighted_score: risk * weight,
            explanation,
            comparison,
        }
    }
}

/// Inputs shared by every factor scorer.
pub(crate) struct FactorContext<'a> {
    pub applicant: &'a ApplicantRecord,
    pub history: Option<&'a HistoricalDataset>,
}

impl FactorContext<'_> {
    /// Cohort comparison for `factor`, or `None` without history or matches.
    fn compare(
        &self,
        factor: RiskFactor,
        filters: &[CohortFilter],
        metrics: &[SummaryMetric],
    ) -> Option<CohortSummary> {
        let history = self.history?;
        let cohort = Cohort::select(history, filters);
        let summary = CohortSummary::from_cohort(&cohort, metrics);
        if summary.is_none() {
            debug!(
                factor = factor.label(),
                applicant = %self.applicant.customer_id,
                "cohort comparison unavailable"
            );
        }
        summary
    }
}

/// Scores every factor in order. Stops at the first invalid category.
pub(crate) fn score_factors(context: &FactorContext<'_>) -> Result<Vec<ScoringStep>, ScoringError> {
    Ok(vec![
        demographics::score_age(context),
        demographics::score_gender(context),
        demographics::score_occupation(context)?,
        health::score_bmi(context),
        health::score_blood_pressure(context),
        health::score_cholesterol(context),
        lifestyle::score_smoking(context)?,
        lifestyle::score_alcohol(context)?,
        lifestyle::score_exercise(context)?,
        medical::score_chronic_conditions(context),
        medical::score_family_history(context),
        lifestyle::score_hobbies(context),
    ])
}
