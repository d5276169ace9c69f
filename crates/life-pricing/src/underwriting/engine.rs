use super::confidence::{assess_confidence, ConfidenceLevel};
use super::domain::{
    AlcoholConsumption, ApplicantId, ApplicantRecord, ExerciseFrequency, OccupationClass,
    ScoringError, SmokingStatus,
};
use super::factors::{self, tables, FactorContext, ScoringStep};
use super::history::HistoricalDataset;
use super::pricing::PriceBand;
use super::retention::{estimate_policy_outlook, PolicyOutlook};
use super::summary::{render_summary, RiskTier};
use super::views::PricingReport;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless scorer. Holds only the read-only historical dataset and the
/// evaluation date, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct RiskScoringEngine {
    history: Option<Arc<HistoricalDataset>>,
    as_of: NaiveDate,
}

impl RiskScoringEngine {
    pub fn new(history: Option<Arc<HistoricalDataset>>) -> Self {
        let total = tables::total_weight();
        if (total - tables::FACTOR_WEIGHT_TOTAL).abs() > 1e-9 {
            warn!(
                total,
                expected = tables::FACTOR_WEIGHT_TOTAL,
                "factor weights drifted from the published total"
            );
        }
        Self {
            history,
            as_of: Local::now().date_naive(),
        }
    }

    /// Fixes the date policy tenures are measured against.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn history(&self) -> Option<&HistoricalDataset> {
        self.history.as_deref()
    }

    pub fn score(&self, applicant: &ApplicantRecord) -> Result<PricingResult, ScoringError> {
        let applicant = prepare(applicant)?;
        let history = self.history();

        let context = FactorContext {
            applicant: &applicant,
            history,
        };
        let steps = factors::score_factors(&context)?;
        let risk_score: f64 = steps.iter().map(|step| step.weighted_score).sum();

        let band = PriceBand::calculate(applicant.age, applicant.coverage_amount_requested, risk_score);
        let outlook = estimate_policy_outlook(&applicant, risk_score, history, self.as_of);
        let confidence = assess_confidence(&applicant, risk_score);
        let summary = render_summary(&applicant, risk_score, &steps, &band);

        debug!(
            applicant = %applicant.customer_id,
            risk_score,
            recommended = band.recommended,
            confidence = confidence.label(),
            "applicant scored"
        );

        Ok(PricingResult {
            applicant,
            risk_score,
            band,
            outlook,
            confidence,
            steps,
            summary,
        })
    }
}

/// Normalizes categoricals, rewrites mapped ones to their canonical labels and
/// rejects unusable numeric inputs.
fn prepare(applicant: &ApplicantRecord) -> Result<ApplicantRecord, ScoringError> {
    let mut record = applicant.normalized();

    if record.customer_id.0.trim().is_empty() {
        return Err(ScoringError::MissingField {
            field: "customer_id",
        });
    }
    for (field, value) in [("age", record.age), ("bmi", record.bmi)] {
        if !value.is_finite() {
            return Err(ScoringError::MissingField { field });
        }
    }

    record.occupation_class = OccupationClass::parse(&record.occupation_class)?
        .label()
        .to_string();
    record.smoking_status = SmokingStatus::parse(&record.smoking_status)?
        .label()
        .to_string();
    record.alcohol_consumption = AlcoholConsumption::parse(&record.alcohol_consumption)?
        .label()
        .to_string();
    record.exercise_frequency = ExerciseFrequency::parse(&record.exercise_frequency)?
        .label()
        .to_string();

    Ok(record)
}

/// Full outcome of one scoring call. Figures are unrounded; use
/// [`PricingResult::to_view`] for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub applicant: ApplicantRecord,
    pub risk_score: f64,
    pub band: PriceBand,
    pub outlook: PolicyOutlook,
    pub confidence: ConfidenceLevel,
    pub steps: Vec<ScoringStep>,
    pub summary: String,
}

impl PricingResult {
    pub fn customer_id(&self) -> &ApplicantId {
        &self.applicant.customer_id
    }

    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.risk_score)
    }

    /// Moves the recommended premium within the band (e.g. from an external
    /// pricing insight) and refreshes the summary. Returns whether it moved.
    pub fn apply_price_position(&mut self, position: f64) -> bool {
        if !self.band.reposition(position) {
            return false;
        }
        self.summary = render_summary(&self.applicant, self.risk_score, &self.steps, &self.band);
        true
    }

    pub fn to_view(&self) -> PricingReport {
        PricingReport::from_result(self)
    }
}
