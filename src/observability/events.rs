//! Observable events of a validation run
//!
//! Events are explicit and typed. Each maps to a stable string code that is
//! emitted as the `event` field of the structured log record.

use std::fmt;

use super::Severity;

/// Observable events in ldcheck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Validation lifecycle
    /// A document validation run begins
    ValidationBegin,
    /// A document validation run finished
    ValidationComplete,
    /// The input was rejected before a tree was built
    InputRejected,
    /// The input is a paginated feed envelope
    FeedDetected,

    // Specification registry
    /// A specification version was built and memoized
    SpecificationLoaded,
    /// A specification version could not be loaded
    SpecificationLoadFailed,

    // Rules
    /// A rule handler returned an error; its check was skipped
    RuleFault,

    // Remote documents
    /// A referenced context document could not be fetched
    ContextFetchFailed,
    /// A remote fetch was skipped because remote loading is disabled
    RemoteLoadSkipped,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::InputRejected => "INPUT_REJECTED",
            Event::FeedDetected => "FEED_DETECTED",

            Event::SpecificationLoaded => "SPECIFICATION_LOADED",
            Event::SpecificationLoadFailed => "SPECIFICATION_LOAD_FAILED",

            Event::RuleFault => "RULE_FAULT",

            Event::ContextFetchFailed => "CONTEXT_FETCH_FAILED",
            Event::RemoteLoadSkipped => "REMOTE_LOAD_SKIPPED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationBegin | Event::ValidationComplete | Event::RemoteLoadSkipped => {
                Severity::Trace
            }
            Event::InputRejected | Event::FeedDetected | Event::SpecificationLoaded => {
                Severity::Info
            }
            Event::ContextFetchFailed => Severity::Warn,
            Event::SpecificationLoadFailed | Event::RuleFault => Severity::Error,
        }
    }

    /// Returns true if this event reports a failure inside the engine
    pub fn is_failure(&self) -> bool {
        self.severity() >= Severity::Warn
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
