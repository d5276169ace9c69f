//! Life insurance risk scoring.
//!
//! [`RiskScoringEngine::score`] rates an applicant on twelve weighted factors,
//! turns the total into a premium band, estimates policy duration and
//! attrition from comparable historical policies, and explains every step.

pub mod cohort;
pub mod confidence;
pub mod domain;
mod engine;
pub mod factors;
pub mod history;
pub mod intake;
pub mod normalizer;
pub mod pricing;
pub mod retention;
pub mod summary;
mod views;

#[cfg(test)]
mod tests;

pub use cohort::{CohortSummary, CohortTier};
pub use confidence::ConfidenceLevel;
pub use domain::{
    AlcoholConsumption, ApplicantId, ApplicantRecord, ExerciseFrequency, OccupationClass,
    ScoringError, SmokingStatus,
};
pub use engine::{PricingResult, RiskScoringEngine};
pub use factors::{FactorCategory, RiskFactor, ScoringStep, FACTOR_WEIGHTS, FACTOR_WEIGHT_TOTAL};
pub use history::{DatasetStats, HistoricalDataset, HistoricalImportError, HistoricalRecord};
pub use intake::{ApplicantIntake, IntakeError, IntakeRow};
pub use pricing::PriceBand;
pub use retention::{EstimateSource, PolicyOutlook};
pub use summary::RiskTier;
pub use views::{PricingReport, ScoringStepView};
