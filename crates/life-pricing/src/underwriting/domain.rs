use serde::{Deserialize, Serialize};

use super::normalizer::normalize_category;

/// Identifier wrapper for an applicant across intake, scoring and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl std::fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the engine needs to price one applicant.
///
/// Categorical fields hold display labels as they appear in intake files; the
/// scoring functions parse them into the typed domains below and reject values
/// outside those domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub customer_id: ApplicantId,
    pub age: f64,
    pub gender: String,
    pub occupation: String,
    pub occupation_class: String,
    pub height_inches: f64,
    pub weight_lbs: f64,
    pub bmi: f64,
    pub blood_pressure_systolic: i32,
    pub blood_pressure_diastolic: i32,
    pub total_cholesterol: i32,
    pub hdl_cholesterol: i32,
    pub ldl_cholesterol: i32,
    pub smoking_status: String,
    pub alcohol_consumption: String,
    pub exercise_frequency: String,
    /// `;`-separated condition names, or `"None"`.
    pub chronic_conditions: String,
    /// `;`-separated relative conditions, or `"None"`.
    pub family_history: String,
    pub dangerous_hobbies: String,
    pub annual_income: u64,
    pub coverage_amount_requested: u64,
    pub credit_score: u16,
    pub existing_coverage: u64,
}

impl ApplicantRecord {
    /// Returns a copy with every categorical field collapsed through the normalizer.
    pub fn normalized(&self) -> Self {
        let mut record = self.clone();
        for field in [
            &mut record.gender,
            &mut record.occupation,
            &mut record.occupation_class,
            &mut record.smoking_status,
            &mut record.alcohol_consumption,
            &mut record.exercise_frequency,
            &mut record.chronic_conditions,
            &mut record.family_history,
            &mut record.dangerous_hobbies,
        ] {
            *field = normalize_category(Some(field.as_str()));
        }
        record
    }

    pub fn has_dangerous_hobby(&self) -> bool {
        self.dangerous_hobbies != NONE_LABEL
    }
}

/// Sentinel for absent categorical values.
pub const NONE_LABEL: &str = "None";

/// Failures that reject a single scoring call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("{field} has unrecognized value '{value}'")]
    InvalidCategory { field: &'static str, value: String },
    #[error("required field {field} is missing")]
    MissingField { field: &'static str },
}

fn invalid(field: &'static str, value: &str) -> ScoringError {
    ScoringError::InvalidCategory {
        field,
        value: value.to_string(),
    }
}

/// Occupational hazard class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupationClass {
    ClassI,
    ClassII,
    ClassIII,
    ClassIV,
}

impl OccupationClass {
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        let trimmed = value.trim();
        let canonical = Self::ordered()
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(trimmed));
        if let Some(class) = canonical {
            return Ok(class);
        }

        // Short forms: `Class <numeral>` or a bare numeral, nothing more.
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let numeral = match tokens.as_slice() {
            [numeral] => *numeral,
            [prefix, numeral] if prefix.eq_ignore_ascii_case("class") => *numeral,
            _ => return Err(invalid("occupation_class", value)),
        };
        match numeral.to_ascii_uppercase().as_str() {
            "I" => Ok(Self::ClassI),
            "II" => Ok(Self::ClassII),
            "III" => Ok(Self::ClassIII),
            "IV" => Ok(Self::ClassIV),
            _ => Err(invalid("occupation_class", value)),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OccupationClass::ClassI => "Class I (Low Risk)",
            OccupationClass::ClassII => "Class II (Moderate Risk)",
            OccupationClass::ClassIII => "Class III (High Risk)",
            OccupationClass::ClassIV => "Class IV (Very High Risk)",
        }
    }

    pub fn ordered() -> [Self; 4] {
        [Self::ClassI, Self::ClassII, Self::ClassIII, Self::ClassIV]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingStatus {
    Never,
    FormerOverFiveYears,
    FormerUnderFiveYears,
    Current,
}

impl SmokingStatus {
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == value.trim())
            .ok_or_else(|| invalid("smoking_status", value))
    }

    pub const fn label(self) -> &'static str {
        match self {
            SmokingStatus::Never => "Never",
            SmokingStatus::FormerOverFiveYears => "Former (>5 years)",
            SmokingStatus::FormerUnderFiveYears => "Former (<5 years)",
            SmokingStatus::Current => "Current",
        }
    }

    pub fn ordered() -> [Self; 4] {
        [
            Self::Never,
            Self::FormerOverFiveYears,
            Self::FormerUnderFiveYears,
            Self::Current,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlcoholConsumption {
    None,
    Light,
    Moderate,
    Heavy,
}

impl AlcoholConsumption {
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == value.trim())
            .ok_or_else(|| invalid("alcohol_consumption", value))
    }

    pub const fn label(self) -> &'static str {
        match self {
            AlcoholConsumption::None => NONE_LABEL,
            AlcoholConsumption::Light => "Light (1-2/week)",
            AlcoholConsumption::Moderate => "Moderate (3-7/week)",
            AlcoholConsumption::Heavy => "Heavy (>7/week)",
        }
    }

    pub fn ordered() -> [Self; 4] {
        [Self::None, Self::Light, Self::Moderate, Self::Heavy]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseFrequency {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ExerciseFrequency {
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == value.trim())
            .ok_or_else(|| invalid("exercise_frequency", value))
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExerciseFrequency::Sedentary => "Sedentary",
            ExerciseFrequency::Light => "Light (1-2/week)",
            ExerciseFrequency::Moderate => "Moderate (3-4/week)",
            ExerciseFrequency::Active => "Active (5+/week)",
        }
    }

    pub fn ordered() -> [Self; 4] {
        [Self::Sedentary, Self::Light, Self::Moderate, Self::Active]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupation_class_accepts_labels_and_numerals() {
        assert_eq!(
            OccupationClass::parse("Class III (High Risk)").expect("label parses"),
            OccupationClass::ClassIII
        );
        assert_eq!(
            OccupationClass::parse("class ii").expect("short form parses"),
            OccupationClass::ClassII
        );
        assert_eq!(
            OccupationClass::parse("IV").expect("numeral parses"),
            OccupationClass::ClassIV
        );
    }

    #[test]
    fn occupation_class_rejects_unknown_class() {
        let error = OccupationClass::parse("Class V").expect_err("class V is unmapped");
        assert_eq!(
            error,
            ScoringError::InvalidCategory {
                field: "occupation_class",
                value: "Class V".to_string(),
            }
        );
        assert!(OccupationClass::parse("Class I (Made Up)").is_err());
    }

    #[test]
    fn occupation_class_rejects_trailing_tokens() {
        for value in ["Class I Foo", "Class I V", "I II", "Class IV Extra", "Class", "Grade II"] {
            assert_eq!(
                OccupationClass::parse(value),
                Err(ScoringError::InvalidCategory {
                    field: "occupation_class",
                    value: value.to_string(),
                }),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn lifestyle_domains_round_trip_their_labels() {
        for status in SmokingStatus::ordered() {
            assert_eq!(SmokingStatus::parse(status.label()), Ok(status));
        }
        assert!(AlcoholConsumption::parse("Occasional").is_err());
        assert_eq!(
            ExerciseFrequency::parse(" Active (5+/week) "),
            Ok(ExerciseFrequency::Active)
        );
    }

    #[test]
    fn normalized_collapses_blank_categoricals() {
        let mut record = super::super::tests::common::healthy_applicant("norm-1");
        record.chronic_conditions = "nan".to_string();
        record.dangerous_hobbies = "   ".to_string();

        let normalized = record.normalized();
        assert_eq!(normalized.chronic_conditions, NONE_LABEL);
        assert!(!normalized.has_dangerous_hobby());
    }
}
