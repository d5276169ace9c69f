//! Policy duration and attrition estimates.
//!
//! Outcomes of comparable historical policies are preferred. When there is no
//! history, no issued policy in the cohort, or no usable issue date, a
//! closed-form approximation driven by the risk score is used instead.

use super::cohort::{mean, CategoryColumn, CohortFilter, CohortTier, NumericColumn, RelaxationLadder};
use super::domain::ApplicantRecord;
use super::history::HistoricalDataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PRIMARY_AGE_WINDOW: f64 = 5.0;
const WIDENED_AGE_WINDOW: f64 = 10.0;
const PRIMARY_MIN_COHORT: usize = 50;
const WIDENED_MIN_COHORT: usize = 30;

const DAYS_PER_YEAR: f64 = 365.25;
const MIN_DURATION_YEARS: f64 = 1.0;
const MAX_DURATION_YEARS: f64 = 30.0;

/// How an outlook was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EstimateSource {
    Cohort {
        tier: CohortTier,
        cohort_size: usize,
        accepted: usize,
    },
    ClosedForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyOutlook {
    pub predicted_duration_years: f64,
    pub attrition_likelihood: f64,
    pub source: EstimateSource,
}

impl PolicyOutlook {
    pub fn closed_form(risk_score: f64) -> Self {
        Self {
            predicted_duration_years: (12.0 - risk_score * 6.0).clamp(3.0, 20.0),
            attrition_likelihood: (0.12 + risk_score * 0.25).clamp(0.05, 0.6),
            source: EstimateSource::ClosedForm,
        }
    }
}

/// Cohort ladder for duration estimates: narrow and specific first, then
/// widen the age window, then drop the smoking constraint too.
pub(crate) fn outlook_ladder(applicant: &ApplicantRecord) -> RelaxationLadder {
    let age = applicant.age;
    let smoking = CohortFilter::equals(CategoryColumn::SmokingStatus, &applicant.smoking_status);

    RelaxationLadder::new()
        .rung(
            CohortTier::Primary,
            vec![
                CohortFilter::window(NumericColumn::Age, age, PRIMARY_AGE_WINDOW),
                CohortFilter::equals(CategoryColumn::OccupationClass, &applicant.occupation_class),
                smoking.clone(),
            ],
            PRIMARY_MIN_COHORT,
        )
        .rung(
            CohortTier::WidenedAge,
            vec![
                CohortFilter::window(NumericColumn::Age, age, WIDENED_AGE_WINDOW),
                smoking,
            ],
            WIDENED_MIN_COHORT,
        )
        .rung(
            CohortTier::AgeOnly,
            vec![CohortFilter::window(NumericColumn::Age, age, WIDENED_AGE_WINDOW)],
            0,
        )
}

pub fn estimate_policy_outlook(
    applicant: &ApplicantRecord,
    risk_score: f64,
    history: Option<&HistoricalDataset>,
    as_of: NaiveDate,
) -> PolicyOutlook {
    let Some(history) = history.filter(|dataset| !dataset.is_empty()) else {
        debug!(applicant = %applicant.customer_id, "no historical data, using closed-form outlook");
        return PolicyOutlook::closed_form(risk_score);
    };

    let Some((tier, cohort)) = outlook_ladder(applicant).resolve(history) else {
        return PolicyOutlook::closed_form(risk_score);
    };

    let accepted = cohort.accepted();
    let active_rate = mean(
        accepted
            .iter()
            .filter_map(|record| record.policy_active)
            .map(|active| if active { 1.0 } else { 0.0 }),
    );
    let Some(active_rate) = active_rate else {
        debug!(
            applicant = %applicant.customer_id,
            tier = tier.label(),
            cohort_size = cohort.len(),
            "cohort has no issued policies, using closed-form outlook"
        );
        return PolicyOutlook::closed_form(risk_score);
    };

    let tenures: Vec<(f64, bool)> = accepted
        .iter()
        .filter_map(|record| {
            let issued = record.policy_issue_date?;
            let years = (as_of - issued).num_days() as f64 / DAYS_PER_YEAR;
            Some((years, record.policy_active == Some(true)))
        })
        .collect();

    let active_tenure = mean(
        tenures
            .iter()
            .filter(|(_, active)| *active)
            .map(|(years, _)| *years),
    );
    let Some(average_tenure) =
        active_tenure.or_else(|| mean(tenures.iter().map(|(years, _)| *years)))
    else {
        debug!(
            applicant = %applicant.customer_id,
            "no usable policy issue dates, using closed-form outlook"
        );
        return PolicyOutlook::closed_form(risk_score);
    };

    PolicyOutlook {
        predicted_duration_years: average_tenure.clamp(MIN_DURATION_YEARS, MAX_DURATION_YEARS),
        attrition_likelihood: (1.0 - active_rate).clamp(0.0, 1.0),
        source: EstimateSource::Cohort {
            tier,
            cohort_size: cohort.len(),
            accepted: accepted.len(),
        },
    }
}
