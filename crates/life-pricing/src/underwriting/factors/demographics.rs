use super::tables::{self, AGE_BANDS, AGE_COMPARISON_WINDOW};
use super::{FactorContext, RiskFactor, ScoringStep};
use crate::underwriting::cohort::{CategoryColumn, CohortFilter, NumericColumn, SummaryMetric};
use crate::underwriting::domain::{OccupationClass, ScoringError};

pub(super) fn score_age(context: &FactorContext<'_>) -> ScoringStep {
    let age = context.applicant.age;
    let band = tables::lookup(&AGE_BANDS, age);

    let comparison = context.compare(
        RiskFactor::Age,
        &[CohortFilter::window(
            NumericColumn::Age,
            age,
            AGE_COMPARISON_WINDOW,
        )],
        &[SummaryMetric::ClaimRate],
    );

    let mut explanation = format!(
        "Applicant age of {age:.1} places them in the {} bracket. \
Mortality risk increases with age; this bracket has a base risk factor of {:.2}. \
Actuarial tables show mortality rates increase exponentially after age 50.",
        band.label, band.risk
    );
    if let Some(summary) = &comparison {
        explanation.push_str(&format!(
            " In our historical data, customers aged {:.0}-{:.0} (n={}) had an average risk score of {:.2}",
            age - AGE_COMPARISON_WINDOW,
            age + AGE_COMPARISON_WINDOW,
            summary.cohort_size,
            summary.avg_risk_score
        ));
        match summary.claim_rate {
            Some(rate) => explanation.push_str(&format!(" with a {rate:.2}% claim rate.")),
            None => explanation.push('.'),
        }
    }

    ScoringStep::new(
        RiskFactor::Age,
        format!("{age:.1} years"),
        band.risk,
        explanation,
        comparison,
    )
}

pub(super) fn score_gender(context: &FactorContext<'_>) -> ScoringStep {
    let gender = context.applicant.gender.as_str();
    let risk = if gender == "Male" {
        tables::MALE_RISK
    } else {
        tables::NON_MALE_RISK
    };

    let comparison = context.compare(
        RiskFactor::Gender,
        &[CohortFilter::equals(CategoryColumn::Gender, gender)],
        &[SummaryMetric::AvgPremium],
    );

    let mut explanation = format!(
        "Gender: {gender}. Actuarial data consistently shows males have 10-15% higher mortality rates \
across most age groups due to higher rates of heart disease, accidents, and risky behaviors. \
This results in a risk factor of {risk:.2}."
    );
    if let Some(summary) = &comparison {
        explanation.push_str(&format!(
            " Historical {} customers (n={}) average a {:.2} risk score.",
            gender.to_lowercase(),
            summary.cohort_size,
            summary.avg_risk_score
        ));
    }

    ScoringStep::new(
        RiskFactor::Gender,
        gender.to_string(),
        risk,
        explanation,
        comparison,
    )
}

pub(super) fn score_occupation(context: &FactorContext<'_>) -> Result<ScoringStep, ScoringError> {
    let occupation = context.applicant.occupation.as_str();
    let raw_class = context.applicant.occupation_class.as_str();
    let class = OccupationClass::parse(raw_class)?;
    let risk = tables::occupation_risk(class);

    let comparison = context.compare(
        RiskFactor::Occupation,
        &[CohortFilter::equals(
            CategoryColumn::OccupationClass,
            class.label(),
        )],
        &[SummaryMetric::ClaimRate],
    );

    let mut explanation = format!(
        "Occupation: {occupation} ({}). Occupational mortality varies significantly based on \
workplace hazards, stress levels, and accident risk. This occupation class carries a {risk:.2} risk factor.",
        class.label()
    );
    if let Some(summary) = &comparison {
        match summary.claim_rate {
            Some(rate) => explanation.push_str(&format!(
                " {} workers in our data (n={}) show {rate:.2}% claim rates.",
                class.label(),
                summary.cohort_size
            )),
            None => explanation.push_str(&format!(
                " {} workers in our data (n={}) average {:.2} risk.",
                class.label(),
                summary.cohort_size,
                summary.avg_risk_score
            )),
        }
    }

    Ok(ScoringStep::new(
        RiskFactor::Occupation,
        format!("{occupation} ({})", class.label()),
        risk,
        explanation,
        comparison,
    ))
}
