use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::underwriting::{HistoricalImportError, IntakeError, ScoringError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    History(HistoricalImportError),
    Intake(IntakeError),
    Scoring(ScoringError),
    Render(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::History(err) => write!(f, "historical data error: {}", err),
            AppError::Intake(err) => write!(f, "applicant intake error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Render(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::History(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Render(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HistoricalImportError> for AppError {
    fn from(value: HistoricalImportError) -> Self {
        Self::History(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn scoring_errors_keep_their_source() {
        let error = AppError::from(ScoringError::InvalidCategory {
            field: "occupation_class",
            value: "Class V".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "scoring error: occupation_class has unrecognized value 'Class V'"
        );
        assert!(error.source().is_some());
    }
}
