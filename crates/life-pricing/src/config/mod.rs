use chrono::{Local, NaiveDate};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the pricing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the pricing engine and its command-line driver.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub pricing: PricingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()));
        let historical_path = match env::var("HISTORICAL_DATA_PATH") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(PathBuf::from(value.trim())),
            Err(_) => Some(data_dir.join("historical_customers.csv")),
        };
        let applicants_path = env::var("NEW_APPLICANTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("new_customers.csv"));

        let as_of = match env::var("PRICING_AS_OF") {
            Ok(value) if !value.trim().is_empty() => Some(
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
                    ConfigError::InvalidAsOf {
                        value: value.clone(),
                        source,
                    }
                })?,
            ),
            _ => None,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(value) if !value.trim().is_empty() => LogFormat::parse(&value)
                .ok_or_else(|| ConfigError::InvalidLogFormat { value: value.clone() })?,
            _ => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            data: DataConfig {
                data_dir,
                historical_path,
                applicants_path,
            },
            pricing: PricingConfig { as_of },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

/// Locations of the CSV inputs read by the engine and the batch scorer.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    /// `None` disables cohort comparisons and historical duration estimates.
    pub historical_path: Option<PathBuf>,
    pub applicants_path: PathBuf,
}

impl DataConfig {
    pub fn historical_path(&self) -> Option<&Path> {
        self.historical_path.as_deref()
    }
}

/// Engine-level knobs.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub as_of: Option<NaiveDate>,
}

impl PricingConfig {
    /// Evaluation date for policy tenure; defaults to the local calendar date.
    pub fn as_of_or_today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset or unparsable.
    pub log_level: String,
    pub format: LogFormat,
    pub ansi: bool,
}

/// Line layout of emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAsOf {
        value: String,
        source: chrono::ParseError,
    },
    InvalidLogFormat {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAsOf { value, .. } => {
                write!(f, "PRICING_AS_OF must be a YYYY-MM-DD date (found '{value}')")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'full' (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidAsOf { source, .. } => Some(source),
            ConfigError::InvalidLogFormat { .. } => None,
        }
    }
}
