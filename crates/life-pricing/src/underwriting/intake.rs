//! Applicant CSV intake for batch scoring.

use super::domain::{ApplicantId, ApplicantRecord, ScoringError};
use super::history::{empty_string_as_none, lenient_f64};
use super::normalizer::normalize_category;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read applicant file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One parsed applicant row. Rows that fail validation are kept so a batch can
/// report them alongside the successfully scored applicants.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeRow {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    pub applicant: Result<ApplicantRecord, ScoringError>,
}

pub struct ApplicantIntake;

impl ApplicantIntake {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IntakeRow>, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<IntakeRow>, IntakeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
            let row = record?;
            rows.push(IntakeRow {
                row: index + 1,
                applicant: row.into_record(),
            });
        }

        Ok(rows)
    }
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    age: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    occupation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    occupation_class: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    height_inches: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weight_lbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    bmi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    blood_pressure_systolic: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    blood_pressure_diastolic: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    total_cholesterol: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    hdl_cholesterol: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    ldl_cholesterol: Option<f64>,
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
    annual_income: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    coverage_amount_requested: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    credit_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    existing_coverage: Option<f64>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ScoringError> {
    value.ok_or(ScoringError::MissingField { field })
}

/// Imperial BMI: 703 * lb / in².
fn derive_bmi(height_inches: f64, weight_lbs: f64) -> Option<f64> {
    (height_inches > 0.0).then(|| 703.0 * weight_lbs / (height_inches * height_inches))
}

impl ApplicantRow {
    fn into_record(self) -> Result<ApplicantRecord, ScoringError> {
        let customer_id = required(self.customer_id, "customer_id")?;
        let age = required(self.age, "age")?;
        let height_inches = self.height_inches.unwrap_or_default();
        let weight_lbs = self.weight_lbs.unwrap_or_default();
        let bmi = match self.bmi {
            Some(bmi) => bmi,
            None => required(
                self.height_inches
                    .zip(self.weight_lbs)
                    .and_then(|(height, weight)| derive_bmi(height, weight)),
                "bmi",
            )?,
        };

        let whole = |value: Option<f64>, field: &'static str| required(value, field).map(|v| v.round());

        Ok(ApplicantRecord {
            customer_id: ApplicantId(customer_id),
            age,
            gender: normalize_category(self.gender.as_deref()),
            occupation: normalize_category(self.occupation.as_deref()),
            occupation_class: normalize_category(self.occupation_class.as_deref()),
            height_inches,
            weight_lbs,
            bmi,
            blood_pressure_systolic: whole(self.blood_pressure_systolic, "blood_pressure_systolic")?
                as i32,
            blood_pressure_diastolic: whole(
                self.blood_pressure_diastolic,
                "blood_pressure_diastolic",
            )? as i32,
            total_cholesterol: whole(self.total_cholesterol, "total_cholesterol")? as i32,
            hdl_cholesterol: self.hdl_cholesterol.unwrap_or_default().round() as i32,
            ldl_cholesterol: self.ldl_cholesterol.unwrap_or_default().round() as i32,
            smoking_status: normalize_category(self.smoking_status.as_deref()),
            alcohol_consumption: normalize_category(self.alcohol_consumption.as_deref()),
            exercise_frequency: normalize_category(self.exercise_frequency.as_deref()),
            chronic_conditions: normalize_category(self.chronic_conditions.as_deref()),
            family_history: normalize_category(self.family_history.as_deref()),
            dangerous_hobbies: normalize_category(self.dangerous_hobbies.as_deref()),
            annual_income: self.annual_income.unwrap_or_default().max(0.0).round() as u64,
            coverage_amount_requested: whole(
                self.coverage_amount_requested,
                "coverage_amount_requested",
            )?
            .max(0.0) as u64,
            credit_score: self.credit_score.unwrap_or_default().clamp(0.0, 999.0).round() as u16,
            existing_coverage: self.existing_coverage.unwrap_or_default().max(0.0).round() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "customer_id,age,gender,occupation,occupation_class,height_inches,weight_lbs,bmi,\
blood_pressure_systolic,blood_pressure_diastolic,total_cholesterol,hdl_cholesterol,ldl_cholesterol,\
smoking_status,alcohol_consumption,exercise_frequency,chronic_conditions,family_history,dangerous_hobbies,\
annual_income,coverage_amount_requested,credit_score,existing_coverage\n";

    #[test]
    fn parses_complete_rows_and_normalizes_categoricals() {
        let csv = format!(
            "{HEADER}C-1,34,Female,Librarian,Class I (Low Risk),65,140,23.3,118,76,185.0,55,110,Never,nan,Active (5+/week),,,,72000,500000,720,0\n"
        );
        let rows = ApplicantIntake::from_reader(Cursor::new(csv)).expect("parse");
        let applicant = rows[0].applicant.as_ref().expect("valid row");

        assert_eq!(rows[0].row, 1);
        assert_eq!(applicant.customer_id, ApplicantId("C-1".to_string()));
        assert_eq!(applicant.total_cholesterol, 185);
        assert_eq!(applicant.alcohol_consumption, "None");
        assert_eq!(applicant.chronic_conditions, "None");
        assert_eq!(applicant.coverage_amount_requested, 500_000);
    }

    #[test]
    fn derives_bmi_when_column_is_blank() {
        let csv = format!(
            "{HEADER}C-2,40,Male,Pilot,Class III (High Risk),70,200,,130,85,210,45,140,Never,None,Sedentary,None,None,None,90000,250000,680,0\n"
        );
        let rows = ApplicantIntake::from_reader(Cursor::new(csv)).expect("parse");
        let applicant = rows[0].applicant.as_ref().expect("valid row");
        assert!((applicant.bmi - 703.0 * 200.0 / 4900.0).abs() < 1e-9);
    }

    #[test]
    fn reports_missing_required_fields_per_row() {
        let csv = format!(
            "{HEADER}C-3,,Male,Pilot,Class III (High Risk),70,200,28,130,85,210,45,140,Never,None,Sedentary,None,None,None,90000,250000,680,0\n\
C-4,50,Male,Clerk,Class I (Low Risk),70,200,28,130,85,210,45,140,Never,None,Sedentary,None,None,None,90000,,680,0\n"
        );
        let rows = ApplicantIntake::from_reader(Cursor::new(csv)).expect("parse");
        assert_eq!(
            rows[0].applicant,
            Err(ScoringError::MissingField { field: "age" })
        );
        assert_eq!(
            rows[1].applicant,
            Err(ScoringError::MissingField {
                field: "coverage_amount_requested"
            })
        );
        assert_eq!(rows[1].row, 2);
    }
}
