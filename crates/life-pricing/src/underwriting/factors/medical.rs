use super::tables;
use super::{FactorContext, RiskFactor, ScoringStep};
use crate::underwriting::cohort::{CategoryColumn, CohortFilter, SummaryMetric};
use crate::underwriting::normalizer::condition_count;

pub(super) fn score_chronic_conditions(context: &FactorContext<'_>) -> ScoringStep {
    let conditions = context.applicant.chronic_conditions.as_str();
    let count = condition_count(conditions);
    let risk = tables::chronic_condition_risk(count);

    let comparison = context.compare(
        RiskFactor::ChronicConditions,
        &[CohortFilter::ConditionCount {
            column: CategoryColumn::ChronicConditions,
            count,
        }],
        &[SummaryMetric::ClaimRate],
    );

    let mut explanation = format!("Chronic Conditions: {conditions}. ");
    if count == 0 {
        explanation.push_str(&format!(
            "No chronic conditions present, which is favorable. Risk factor: {risk:.2}."
        ));
    } else {
        explanation.push_str(&format!(
            "Presence of {count} chronic condition(s) significantly increases mortality risk. \
Each condition adds compounding risk through disease progression and comorbidity effects. \
Risk factor: {risk:.2}."
        ));
    }
    if let Some(summary) = &comparison {
        match summary.claim_rate {
            Some(rate) => explanation.push_str(&format!(
                " Customers with similar condition profiles (n={}) have {rate:.2}% claim rates.",
                summary.cohort_size
            )),
            None => explanation.push_str(&format!(
                " Customers with similar condition profiles (n={}) average {:.2} risk.",
                summary.cohort_size, summary.avg_risk_score
            )),
        }
    }

    ScoringStep::new(
        RiskFactor::ChronicConditions,
        conditions.to_string(),
        risk,
        explanation,
        comparison,
    )
}

pub(super) fn score_family_history(context: &FactorContext<'_>) -> ScoringStep {
    let history = context.applicant.family_history.as_str();
    let count = condition_count(history);
    let risk = tables::family_history_risk(count);

    let comparison = context.compare(
        RiskFactor::FamilyHistory,
        &[CohortFilter::ConditionCount {
            column: CategoryColumn::FamilyHistory,
            count,
        }],
        &[],
    );

    let mut explanation = format!("Family History: {history}. ");
    if count == 0 {
        explanation.push_str(&format!(
            "No significant family history reported. Risk factor: {risk:.2}."
        ));
    } else {
        explanation.push_str(&format!(
            "Family history of {} indicates genetic predisposition to these conditions. \
Hereditary factors account for significant disease risk, particularly for heart disease and cancer. \
Risk factor: {risk:.2}.",
            history.to_lowercase()
        ));
    }
    if let Some(summary) = &comparison {
        explanation.push_str(&format!(
            " Similar family histories (n={}) average {:.2} risk.",
            summary.cohort_size, summary.avg_risk_score
        ));
    }

    ScoringStep::new(
        RiskFactor::FamilyHistory,
        history.to_string(),
        risk,
        explanation,
        comparison,
    )
}
