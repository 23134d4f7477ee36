//! Logging setup and the credential health report for the `bcl` binary.
//!
//! Logs always go to stderr so that stdout carries only result JSON.

use std::io;

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for terminals.
    Pretty,
    /// One JSON object per line for log aggregation.
    Json,
}

impl LogFormat {
    /// Reads the format from `LOG_FORMAT`; unset or unknown values mean [`LogFormat::Pretty`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("LOG_FORMAT").unwrap_or_default())
    }

    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") { Self::Json } else { Self::Pretty }
    }
}

/// Installs the global tracing subscriber.
///
/// The level filter comes from `RUST_LOG` and defaults to `info`. Span close events are
/// emitted so each batch and item reports its duration.
pub fn init_observability(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

/// Overall status of a health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Every check passed.
    Healthy,
    /// At least one check failed.
    Unhealthy,
}

impl HealthStatus {
    /// Returns the lowercase name used in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    /// Check name.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Details, if any.
    pub message: Option<String>,
    /// Status code reported by the API for a failed check.
    pub status_code: Option<u16>,
}

impl HealthCheck {
    /// Creates a passing check.
    #[must_use]
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), passed: true, message: Some(message.into()), status_code: None }
    }

    /// Creates a failing check.
    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: Some(message.into()),
            status_code: Some(status_code),
        }
    }
}

/// Report printed by `bcl check`.
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// Binary version.
    pub version: String,
    /// API base URL that was checked.
    pub base_url: String,
    /// Individual checks.
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    /// Creates a report for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>, checks: Vec<HealthCheck>) -> Self {
        Self { version: env!("CARGO_PKG_VERSION").to_owned(), base_url: base_url.into(), checks }
    }

    /// Returns [`HealthStatus::Unhealthy`] if any check failed.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        if self.checks.iter().all(|c| c.passed) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }

    /// Serializes the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let checks: Vec<_> = self
            .checks
            .iter()
            .map(|c| {
                let mut obj = serde_json::json!({
                    "name": c.name,
                    "status": if c.passed { "pass" } else { "fail" },
                });
                if let Some(msg) = &c.message {
                    obj["message"] = serde_json::Value::String(msg.clone());
                }
                if let Some(code) = c.status_code {
                    obj["statusCode"] = code.into();
                }
                obj
            })
            .collect();

        serde_json::to_string_pretty(&serde_json::json!({
            "status": self.status().as_str(),
            "version": self.version,
            "base_url": self.base_url,
            "checks": checks,
        }))
    }
}
