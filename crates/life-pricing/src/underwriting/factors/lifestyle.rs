use super::tables;
use super::{FactorContext, RiskFactor, ScoringStep};
use crate::underwriting::cohort::{CategoryColumn, CohortFilter, SummaryMetric};
use crate::underwriting::domain::{
    AlcoholConsumption, ExerciseFrequency, ScoringError, SmokingStatus,
};
use crate::underwriting::summary::format_currency;

pub(super) fn score_smoking(context: &FactorContext<'_>) -> Result<ScoringStep, ScoringError> {
    let status = SmokingStatus::parse(&context.applicant.smoking_status)?;
    let risk = tables::smoking_risk(status);

    let comparison = context.compare(
        RiskFactor::Smoking,
        &[CohortFilter::equals(
            CategoryColumn::SmokingStatus,
            status.label(),
        )],
        &[SummaryMetric::AvgPremium],
    );

    let mut explanation = format!(
        "Smoking Status: {}. Smoking is the single largest modifiable risk factor for mortality. \
Current smokers have 2-3x higher mortality rates than non-smokers due to cancer, heart disease, \
and respiratory illness. This status carries a {risk:.2} risk factor ({:.0}% of total score).",
        status.label(),
        RiskFactor::Smoking.weight() * 100.0
    );
    if let Some(summary) = &comparison {
        match summary.avg_premium {
            Some(premium) => explanation.push_str(&format!(
                " {} customers (n={}) average {} annual premiums.",
                status.label(),
                summary.cohort_size,
                format_currency(premium, 0)
            )),
            None => explanation.push_str(&format!(
                " {} customers (n={}) average {:.2} risk.",
                status.label(),
                summary.cohort_size,
                summary.avg_risk_score
            )),
        }
    }

    Ok(ScoringStep::new(
        RiskFactor::Smoking,
        status.label().to_string(),
        risk,
        explanation,
        comparison,
    ))
}

pub(super) fn score_alcohol(context: &FactorContext<'_>) -> Result<ScoringStep, ScoringError> {
    let level = AlcoholConsumption::parse(&context.applicant.alcohol_consumption)?;
    let risk = tables::alcohol_risk(level);

    let comparison = context.compare(
        RiskFactor::Alcohol,
        &[CohortFilter::equals(
            CategoryColumn::AlcoholConsumption,
            level.label(),
        )],
        &[],
    );

    let mut explanation = format!(
        "Alcohol Consumption: {}. Heavy alcohol use increases mortality through liver disease, \
accidents, and cardiovascular issues. Moderate consumption shows a J-curved mortality pattern, \
while heavy use is clearly harmful. This consumption level has a {risk:.2} risk factor.",
        level.label()
    );
    if let Some(summary) = &comparison {
        explanation.push_str(&format!(
            " Customers with {} consumption (n={}) average {:.2} risk.",
            level.label().to_lowercase(),
            summary.cohort_size,
            summary.avg_risk_score
        ));
    }

    Ok(ScoringStep::new(
        RiskFactor::Alcohol,
        level.label().to_string(),
        risk,
        explanation,
        comparison,
    ))
}

pub(super) fn score_exercise(context: &FactorContext<'_>) -> Result<ScoringStep, ScoringError> {
    let level = ExerciseFrequency::parse(&context.applicant.exercise_frequency)?;
    let risk = tables::exercise_risk(level);

    let comparison = context.compare(
        RiskFactor::Exercise,
        &[CohortFilter::equals(
            CategoryColumn::ExerciseFrequency,
            level.label(),
        )],
        &[SummaryMetric::AvgBmi],
    );

    let mut explanation = format!(
        "Exercise Frequency: {}. Regular physical activity is strongly protective against \
all-cause mortality, reducing risk by 20-30%. Exercise improves cardiovascular health, maintains \
healthy weight, and reduces chronic disease risk. This activity level has a {risk:.2} risk factor.",
        level.label()
    );
    if let Some(summary) = &comparison {
        if let Some(bmi) = summary.avg_bmi {
            explanation.push_str(&format!(
                " {} customers (n={}) have average BMI of {bmi:.1}.",
                level.label(),
                summary.cohort_size
            ));
        }
    }

    Ok(ScoringStep::new(
        RiskFactor::Exercise,
        level.label().to_string(),
        risk,
        explanation,
        comparison,
    ))
}

pub(super) fn score_hobbies(context: &FactorContext<'_>) -> ScoringStep {
    let hobby = context.applicant.dangerous_hobbies.as_str();
    let present = context.applicant.has_dangerous_hobby();
    let risk = tables::hobby_risk(present);

    let comparison = context.compare(
        RiskFactor::DangerousHobbies,
        &[CohortFilter::HasDangerousHobby(present)],
        &[],
    );

    let mut explanation = format!("Dangerous Hobbies: {hobby}. ");
    if present {
        explanation.push_str(&format!(
            "Participation in {} significantly increases accident and fatality risk. \
These activities carry substantially higher mortality rates than the general population. \
Risk factor: {risk:.2}.",
            hobby.to_lowercase()
        ));
    } else {
        explanation.push_str(&format!(
            "No high-risk recreational activities reported. Risk factor: {risk:.2}."
        ));
    }
    if let Some(summary) = &comparison {
        let group = if present {
            "with dangerous hobbies"
        } else {
            "without dangerous hobbies"
        };
        explanation.push_str(&format!(
            " Customers {group} (n={}) average {:.2} risk.",
            summary.cohort_size, summary.avg_risk_score
        ));
    }

    ScoringStep::new(
        RiskFactor::DangerousHobbies,
        hobby.to_string(),
        risk,
        explanation,
        comparison,
    )
}
