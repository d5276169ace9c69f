use crate::config::{LogFormat, TelemetryConfig};
use std::env;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "invalid log filter '{directive}' (check APP_LOG_LEVEL)")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "global tracing subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins when it parses; otherwise the configured level applies.
fn resolve_filter(rust_log: Option<&str>, configured: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log.and_then(|directive| EnvFilter::try_new(directive).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(configured).map_err(|source| TelemetryError::InvalidFilter {
        directive: configured.to_string(),
        source,
    })
}

/// Installs the global subscriber. Events go to stderr so scored output on
/// stdout stays machine readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(rust_log.as_deref(), &config.log_level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi);

    match config.format {
        LogFormat::Compact => builder.with_target(false).compact().try_init(),
        LogFormat::Full => builder.try_init(),
    }
    .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_without_override() {
        let filter = resolve_filter(None, "debug").expect("filter builds");
        assert_eq!(filter.to_string(), "debug");
        assert!(resolve_filter(None, "life_pricing=debug,warn").is_ok());
    }

    #[test]
    fn unparsable_override_falls_back_to_configured_level() {
        let filter = resolve_filter(Some("life_pricing=loudest"), "info").expect("falls back");
        assert_eq!(filter.to_string(), "info");

        let filter = resolve_filter(Some("trace"), "info").expect("override applies");
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn invalid_configured_level_is_reported() {
        let error = resolve_filter(None, "life_pricing=loudest").expect_err("invalid directive");
        assert!(matches!(error, TelemetryError::InvalidFilter { .. }));
        assert!(error.to_string().contains("APP_LOG_LEVEL"));
    }
}
