use super::tables::{
    self, BLOOD_PRESSURE_BANDS, BMI_BANDS, BMI_COMPARISON_WINDOW, CHOLESTEROL_BANDS,
    CHOLESTEROL_COMPARISON_WINDOW, SYSTOLIC_COMPARISON_WINDOW,
};
use super::{FactorContext, RiskFactor, ScoringStep};
use crate::underwriting::cohort::{CohortFilter, NumericColumn, SummaryMetric};

pub(super) fn score_bmi(context: &FactorContext<'_>) -> ScoringStep {
    let bmi = context.applicant.bmi;
    let band = tables::lookup(&BMI_BANDS, bmi);

    let comparison = context.compare(
        RiskFactor::Bmi,
        &[CohortFilter::window(
            NumericColumn::Bmi,
            bmi,
            BMI_COMPARISON_WINDOW,
        )],
        &[SummaryMetric::ChronicConditionRate],
    );

    let mut explanation = format!(
        "BMI: {bmi:.1} ({}). Body Mass Index is strongly correlated with mortality risk. \
Both underweight and overweight conditions increase mortality through different mechanisms \
(malnutrition vs. cardiovascular disease, diabetes). This BMI level carries a {:.2} risk factor.",
        band.label, band.risk
    );
    if let Some(summary) = &comparison {
        if let Some(rate) = summary.chronic_condition_rate {
            explanation.push_str(&format!(
                " Customers with similar BMI (n={}) have {rate:.2}% chronic condition rates.",
                summary.cohort_size
            ));
        }
    }

    ScoringStep::new(
        RiskFactor::Bmi,
        format!("{bmi:.1} ({})", band.label),
        band.risk,
        explanation,
        comparison,
    )
}

pub(super) fn score_blood_pressure(context: &FactorContext<'_>) -> ScoringStep {
    let systolic = context.applicant.blood_pressure_systolic;
    let diastolic = context.applicant.blood_pressure_diastolic;
    let band = tables::lookup(&BLOOD_PRESSURE_BANDS, f64::from(systolic));

    let comparison = context.compare(
        RiskFactor::BloodPressure,
        &[CohortFilter::window(
            NumericColumn::SystolicPressure,
            f64::from(systolic),
            SYSTOLIC_COMPARISON_WINDOW,
        )],
        &[],
    );

    let mut explanation = format!(
        "Blood Pressure: {systolic}/{diastolic} mmHg ({}). Hypertension is a leading risk factor \
for heart disease, stroke, and kidney disease. The American Heart Association defines stages based \
on systolic readings. This reading indicates {} blood pressure with a {:.2} risk factor.",
        band.label,
        band.label.to_lowercase(),
        band.risk
    );
    if let Some(summary) = &comparison {
        explanation.push_str(&format!(
            " Customers with similar BP (n={}) average {:.2} risk scores.",
            summary.cohort_size, summary.avg_risk_score
        ));
    }

    ScoringStep::new(
        RiskFactor::BloodPressure,
        format!("{systolic}/{diastolic} mmHg ({})", band.label),
        band.risk,
        explanation,
        comparison,
    )
}

pub(super) fn score_cholesterol(context: &FactorContext<'_>) -> ScoringStep {
    let total = context.applicant.total_cholesterol;
    let hdl = context.applicant.hdl_cholesterol;
    let ldl = context.applicant.ldl_cholesterol;
    let band = tables::lookup(&CHOLESTEROL_BANDS, f64::from(total));

    let comparison = context.compare(
        RiskFactor::Cholesterol,
        &[CohortFilter::window(
            NumericColumn::TotalCholesterol,
            f64::from(total),
            CHOLESTEROL_COMPARISON_WINDOW,
        )],
        &[],
    );

    let mut explanation = format!(
        "Total Cholesterol: {total} mg/dL (HDL: {hdl}, LDL: {ldl}), {}. High cholesterol is a major \
risk factor for atherosclerosis and coronary artery disease. LDL should ideally be below 100 mg/dL \
and HDL above 40 mg/dL. This profile indicates {} risk with a {:.2} factor.",
        band.label,
        band.label.to_lowercase(),
        band.risk
    );
    if let Some(summary) = &comparison {
        explanation.push_str(&format!(
            " Similar cholesterol profiles (n={}) average {:.2} risk.",
            summary.cohort_size, summary.avg_risk_score
        ));
    }

    ScoringStep::new(
        RiskFactor::Cholesterol,
        format!("{total} mg/dL ({})", band.label),
        band.risk,
        explanation,
        comparison,
    )
}
