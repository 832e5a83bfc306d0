//! Structured logger facade
//!
//! - One log record = one event
//! - Deterministic field ordering (alphabetical by key)
//! - Records are emitted through `tracing`; the host decides where they go

use std::fmt;

use serde_json::{Map, Value};

/// `tracing` target for every record emitted by this crate
pub const TARGET: &str = "ldcheck";

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-run detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger
///
/// Never installs a subscriber. Without one, records are dropped by `tracing`.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let rendered = Self::render(fields);
        match severity {
            Severity::Trace => {
                tracing::trace!(target: TARGET, event = event, fields = %rendered, "{}", event)
            }
            Severity::Info => {
                tracing::info!(target: TARGET, event = event, fields = %rendered, "{}", event)
            }
            Severity::Warn => {
                tracing::warn!(target: TARGET, event = event, fields = %rendered, "{}", event)
            }
            Severity::Error => {
                tracing::error!(target: TARGET, event = event, fields = %rendered, "{}", event)
            }
        }
    }

    /// Render fields as a JSON object with keys in alphabetical order
    pub fn render(fields: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        let mut object = Map::new();
        for (key, value) in sorted {
            object.insert((*key).to_string(), Value::String((*value).to_string()));
        }
        Value::Object(object).to_string()
    }
}
