mod parser;

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub(crate) use parser::{empty_string_as_none, lenient_f64};

#[derive(Debug, thiserror::Error)]
pub enum HistoricalImportError {
    #[error("failed to read historical dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid historical CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One past applicant together with the outcome of their policy.
///
/// Outcome columns are optional so a partial export still loads; cohort
/// statistics that depend on a missing column are simply not reported.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub customer_id: Option<String>,
    pub age: Option<f64>,
    pub gender: String,
    pub occupation_class: String,
    pub bmi: Option<f64>,
    pub blood_pressure_systolic: Option<f64>,
    pub total_cholesterol: Option<f64>,
    pub smoking_status: String,
    pub alcohol_consumption: String,
    pub exercise_frequency: String,
    pub chronic_conditions: String,
    pub family_history: String,
    pub dangerous_hobbies: String,
    pub risk_score_assigned: Option<f64>,
    pub annual_premium_assigned: Option<f64>,
    pub policy_accepted: Option<bool>,
    pub policy_active: Option<bool>,
    pub claim_filed: Option<bool>,
    pub policy_issue_date: Option<NaiveDate>,
}

/// Read-only table of past applicants. Loaded once and shared between
/// scoring calls.
#[derive(Debug, Clone, Default)]
pub struct HistoricalDataset {
    records: Vec<HistoricalRecord>,
}

impl HistoricalDataset {
    pub fn new(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HistoricalImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(path = %path.display(), records = dataset.len(), "historical dataset loaded");
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HistoricalImportError> {
        Ok(Self::new(parser::parse_records(reader)?))
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> DatasetStats {
        let accepted = rate(self.records.iter().map(|record| record.policy_accepted));
        let active = rate(self.records.iter().map(|record| record.policy_active));
        let claims_filed = self
            .records
            .iter()
            .filter(|record| record.claim_filed == Some(true))
            .count();
        let claim_rate = rate(self.records.iter().map(|record| record.claim_filed));

        DatasetStats {
            records: self.records.len(),
            acceptance_rate: accepted,
            active_rate: active,
            claims_filed,
            claim_rate,
        }
    }
}

/// Headline figures about a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub records: usize,
    pub acceptance_rate: Option<f64>,
    pub active_rate: Option<f64>,
    pub claims_filed: usize,
    pub claim_rate: Option<f64>,
}

fn rate(values: impl Iterator<Item = Option<bool>>) -> Option<f64> {
    let (hits, total) = values
        .flatten()
        .fold((0usize, 0usize), |(hits, total), value| {
            (hits + usize::from(value), total + 1)
        });
    if total == 0 {
        None
    } else {
        Some(hits as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stats_summarise_outcomes() {
        let csv = "age,policy_accepted,policy_active,claim_filed\n\
30,True,True,False\n\
40,True,False,False\n\
50,False,False,False\n\
60,True,True,True\n";
        let dataset = HistoricalDataset::from_reader(Cursor::new(csv)).expect("dataset loads");
        let stats = dataset.stats();

        assert_eq!(stats.records, 4);
        assert_eq!(stats.acceptance_rate, Some(0.75));
        assert_eq!(stats.active_rate, Some(0.5));
        assert_eq!(stats.claims_filed, 1);
        assert_eq!(stats.claim_rate, Some(0.25));
    }

    #[test]
    fn stats_report_missing_columns_as_none() {
        let dataset =
            HistoricalDataset::from_reader(Cursor::new("age\n33\n")).expect("dataset loads");
        let stats = dataset.stats();
        assert_eq!(stats.records, 1);
        assert!(stats.acceptance_rate.is_none());
        assert!(stats.claim_rate.is_none());
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = HistoricalDataset::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        match error {
            HistoricalImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
