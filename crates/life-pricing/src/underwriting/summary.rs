use super::domain::ApplicantRecord;
use super::factors::ScoringStep;
use super::pricing::PriceBand;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Underwriting class implied by the final risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Preferred,
    StandardPlus,
    Standard,
    StandardRated,
    TableRated,
}

impl RiskTier {
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score < 0.25 {
            RiskTier::Preferred
        } else if risk_score < 0.35 {
            RiskTier::StandardPlus
        } else if risk_score < 0.50 {
            RiskTier::Standard
        } else if risk_score < 0.65 {
            RiskTier::StandardRated
        } else {
            RiskTier::TableRated
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Preferred => "Very Low Risk - Preferred Pricing",
            RiskTier::StandardPlus => "Low Risk - Standard Plus",
            RiskTier::Standard => "Average Risk - Standard",
            RiskTier::StandardRated => "Elevated Risk - Standard Rated",
            RiskTier::TableRated => "High Risk - Table Rated",
        }
    }
}

/// `$1,234.50`-style formatting with thousands separators.
pub fn format_currency(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}${grouped}.{fraction}"),
        None => format!("{sign}${grouped}"),
    }
}

fn by_weighted_score(a: &&ScoringStep, b: &&ScoringStep) -> Ordering {
    a.weighted_score.total_cmp(&b.weighted_score)
}

/// Highest contributors first. Ties keep scoring order.
pub fn top_risk_factors(steps: &[ScoringStep], count: usize) -> Vec<&ScoringStep> {
    let mut sorted: Vec<&ScoringStep> = steps.iter().collect();
    sorted.sort_by(|a, b| by_weighted_score(b, a));
    sorted.truncate(count);
    sorted
}

/// Lowest contributors first. Ties keep scoring order.
pub fn protective_factors(steps: &[ScoringStep], count: usize) -> Vec<&ScoringStep> {
    let mut sorted: Vec<&ScoringStep> = steps.iter().collect();
    sorted.sort_by(by_weighted_score);
    sorted.truncate(count);
    sorted
}

/// Executive summary for underwriters. Advisory text only.
pub fn render_summary(
    applicant: &ApplicantRecord,
    risk_score: f64,
    steps: &[ScoringStep],
    band: &PriceBand,
) -> String {
    let tier = RiskTier::from_score(risk_score);
    let recommended = format_currency(band.recommended, 2);
    let mut out = String::new();

    out.push_str(&format!(
        "EXECUTIVE SUMMARY - Customer {}\n",
        applicant.customer_id
    ));
    out.push_str(&format!("{}\n\n", "=".repeat(70)));
    out.push_str(&format!("RISK ASSESSMENT: {}\n", tier.label()));
    out.push_str(&format!(
        "Final Risk Score: {risk_score:.2} (0 = lowest risk, 1 = highest risk)\n\n"
    ));

    out.push_str("PRICING RECOMMENDATION:\n");
    out.push_str(&format!("  - Recommended Annual Premium: {recommended}\n"));
    out.push_str(&format!(
        "  - Price Range: {} - {}\n",
        format_currency(band.low, 2),
        format_currency(band.high, 2)
    ));
    out.push_str(&format!(
        "  - Coverage Amount: {}\n\n",
        format_currency(applicant.coverage_amount_requested as f64, 0)
    ));

    out.push_str("CUSTOMER PROFILE:\n");
    out.push_str(&format!(
        "  - Age: {:.0} | Gender: {} | Occupation: {}\n",
        applicant.age, applicant.gender, applicant.occupation
    ));
    out.push_str(&format!(
        "  - BMI: {:.1} | BP: {}/{}\n",
        applicant.bmi, applicant.blood_pressure_systolic, applicant.blood_pressure_diastolic
    ));
    out.push_str(&format!("  - Smoking: {}\n\n", applicant.smoking_status));

    out.push_str("TOP RISK FACTORS:\n");
    for (rank, step) in top_risk_factors(steps, 3).into_iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}: {} (+{:.2} to risk score)\n",
            rank + 1,
            step.factor.label(),
            step.value,
            step.weighted_score
        ));
    }
    out.push('\n');

    out.push_str("PROTECTIVE FACTORS:\n");
    for (rank, step) in protective_factors(steps, 2).into_iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}: {} (Low risk contribution: {:.2})\n",
            rank + 1,
            step.factor.label(),
            step.value,
            step.weighted_score
        ));
    }
    out.push('\n');

    out.push_str("UNDERWRITER NOTES:\n");
    out.push_str(&format!(
        "Based on the comprehensive risk assessment across {} factors, this customer presents a\n",
        steps.len()
    ));
    out.push_str(&format!(
        "{} profile. The pricing recommendation of {recommended} annually\n",
        tier.label().to_lowercase()
    ));
    out.push_str("provides adequate margin while remaining competitive in the market.");

    if risk_score > 0.6 {
        out.push_str(
            "\n\nHIGH RISK: Consider requiring additional medical examination or aviation/hobby questionnaire.",
        );
    } else if risk_score < 0.3 {
        out.push_str(
            "\n\nPREFERRED RISK: Excellent candidate for accelerated underwriting and competitive pricing.",
        );
    }

    out
}
