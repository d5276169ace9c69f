use super::domain::ApplicantRecord;
use super::normalizer::condition_count;
use serde::{Deserialize, Serialize};

/// How much weight an underwriter should put on the automated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.95 {
            ConfidenceLevel::VeryHigh
        } else if score >= 0.85 {
            ConfidenceLevel::High
        } else if score >= 0.75 {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "Very High",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Moderate => "Moderate",
            ConfidenceLevel::Low => "Low",
        }
    }
}

/// Multiplicative confidence: thin data at the age extremes, extreme totals,
/// dangerous hobbies and comorbidity each discount it.
pub fn confidence_score(applicant: &ApplicantRecord, total_weighted_risk: f64) -> f64 {
    let mut score = 1.0;

    if applicant.age < 25.0 || applicant.age > 70.0 {
        score *= 0.9;
    }
    if total_weighted_risk > 0.7 {
        score *= 0.85;
    }
    if applicant.has_dangerous_hobby() {
        score *= 0.9;
    }
    if condition_count(&applicant.chronic_conditions) >= 2 {
        score *= 0.92;
    }

    score
}

pub fn assess_confidence(applicant: &ApplicantRecord, total_weighted_risk: f64) -> ConfidenceLevel {
    ConfidenceLevel::from_score(confidence_score(applicant, total_weighted_risk))
}
