//! Observability for ldcheck
//!
//! Structured, typed lifecycle events emitted through `tracing`.
//!
//! # Principles
//!
//! 1. Observability is read-only: logging never changes a finding
//! 2. Library code never installs a subscriber
//! 3. Field ordering is deterministic
//!
//! # Usage
//!
//! ```ignore
//! use ldcheck::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RuleFault, &[("rule", "MyRule"), ("path", "$.name")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, TARGET};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
