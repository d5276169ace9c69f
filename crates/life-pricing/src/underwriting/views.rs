use super::cohort::CohortSummary;
use super::engine::PricingResult;
use super::factors::{FactorCategory, RiskFactor, ScoringStep};
use super::retention::EstimateSource;
use super::summary::RiskTier;
use serde::Serialize;

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringStepView {
    pub category: FactorCategory,
    pub category_label: &'static str,
    pub factor: RiskFactor,
    pub factor_label: &'static str,
    pub value: String,
    pub risk_contribution: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_data: Option<CohortSummary>,
}

impl ScoringStepView {
    fn from_step(step: &ScoringStep) -> Self {
        let supporting_data = step.comparison.as_ref().map(|summary| CohortSummary {
            cohort_size: summary.cohort_size,
            avg_risk_score: round_to(summary.avg_risk_score, 2),
            claim_rate: summary.claim_rate.map(|rate| round_to(rate, 2)),
            avg_premium: summary.avg_premium.map(|premium| round_to(premium, 2)),
            chronic_condition_rate: summary.chronic_condition_rate.map(|rate| round_to(rate, 2)),
            avg_bmi: summary.avg_bmi.map(|bmi| round_to(bmi, 1)),
        });

        Self {
            category: step.category,
            category_label: step.category.label(),
            factor: step.factor,
            factor_label: step.factor.label(),
            value: step.value.clone(),
            risk_contribution: step.risk,
            weight: step.weight,
            weighted_score: round_to(step.weighted_score, 4),
            explanation: step.explanation.clone(),
            supporting_data,
        }
    }
}

/// Reporting shape of a [`PricingResult`], rounded the way quotes are shown.
#[derive(Debug, Clone, Serialize)]
pub struct PricingReport {
    pub customer_id: String,
    pub final_risk_score: f64,
    pub risk_tier: RiskTier,
    pub risk_tier_label: &'static str,
    pub annual_premium_low: f64,
    pub annual_premium_calculated: f64,
    pub annual_premium_recommended: f64,
    pub annual_premium_high: f64,
    pub predicted_policy_duration_years: f64,
    pub attrition_likelihood: f64,
    pub outlook_source: EstimateSource,
    pub confidence_level: &'static str,
    pub scoring_steps: Vec<ScoringStepView>,
    pub summary: String,
}

impl PricingReport {
    pub fn from_result(result: &PricingResult) -> Self {
        let tier = result.risk_tier();
        Self {
            customer_id: result.customer_id().0.clone(),
            final_risk_score: round_to(result.risk_score, 4),
            risk_tier: tier,
            risk_tier_label: tier.label(),
            annual_premium_low: round_to(result.band.low, 2),
            annual_premium_calculated: round_to(result.band.calculated, 2),
            annual_premium_recommended: round_to(result.band.recommended, 2),
            annual_premium_high: round_to(result.band.high, 2),
            predicted_policy_duration_years: round_to(result.outlook.predicted_duration_years, 1),
            attrition_likelihood: round_to(result.outlook.attrition_likelihood, 3),
            outlook_source: result.outlook.source,
            confidence_level: result.confidence.label(),
            scoring_steps: result.steps.iter().map(ScoringStepView::from_step).collect(),
            summary: result.summary.clone(),
        }
    }
}
