use super::HistoricalRecord;
use crate::underwriting::domain::OccupationClass;
use crate::underwriting::normalizer::normalize_category;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<HistoricalRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<HistoricalRow>() {
        let row = record?;
        records.push(row.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct HistoricalRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    age: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    occupation_class: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    bmi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    blood_pressure_systolic: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    total_cholesterol: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    smoking_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    alcohol_consumption: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    exercise_frequency: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    chronic_conditions: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    family_history: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dangerous_hobbies: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    risk_score_assigned: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    annual_premium_assigned: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    policy_accepted: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    policy_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    claim_filed: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    policy_issue_date: Option<String>,
}

impl HistoricalRow {
    fn into_record(self) -> HistoricalRecord {
        let policy_issue_date = self.policy_issue_date.as_deref().and_then(parse_date);

        HistoricalRecord {
            customer_id: self.customer_id,
            age: self.age,
            gender: normalize_category(self.gender.as_deref()),
            occupation_class: canonical_occupation(self.occupation_class.as_deref()),
            bmi: self.bmi,
            blood_pressure_systolic: self.blood_pressure_systolic,
            total_cholesterol: self.total_cholesterol,
            smoking_status: normalize_category(self.smoking_status.as_deref()),
            alcohol_consumption: normalize_category(self.alcohol_consumption.as_deref()),
            exercise_frequency: normalize_category(self.exercise_frequency.as_deref()),
            chronic_conditions: normalize_category(self.chronic_conditions.as_deref()),
            family_history: normalize_category(self.family_history.as_deref()),
            dangerous_hobbies: normalize_category(self.dangerous_hobbies.as_deref()),
            risk_score_assigned: self.risk_score_assigned,
            annual_premium_assigned: self.annual_premium_assigned,
            policy_accepted: self.policy_accepted,
            policy_active: self.policy_active,
            claim_filed: self.claim_filed,
            policy_issue_date,
        }
    }
}

/// Aliases such as `Class I` or `I` map to the label applicants are scored
/// with; unrecognised values are kept as normalized text.
fn canonical_occupation(value: Option<&str>) -> String {
    let normalized = normalize_category(value);
    OccupationClass::parse(&normalized)
        .map(|class| class.label().to_string())
        .unwrap_or(normalized)
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = empty_string_as_none(deserializer)?;
    Ok(opt.and_then(|value| value.trim().parse::<f64>().ok()).filter(|value| value.is_finite()))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = empty_string_as_none(deserializer)?;
    Ok(opt.and_then(|value| parse_bool(&value)))
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "1.0" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "0.0" | "no" | "n" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    None
}
