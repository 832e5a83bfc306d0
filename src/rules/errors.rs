//! # Rule Errors
//!
//! A rule error skips one node or field check. It never aborts a run.

use thiserror::Error;

/// Result type for rule handlers
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors raised inside rule handlers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// `create_error` was called with a test key the rule does not define
    #[error("Rule {rule} has no test named '{test}'")]
    UnknownTest { rule: String, test: String },

    /// The rule met data it cannot check
    #[error("Rule {rule} cannot check {path}: {reason}")]
    InvalidData {
        rule: String,
        path: String,
        reason: String,
    },
}

impl RuleError {
    pub fn invalid_data(
        rule: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RuleError::InvalidData {
            rule: rule.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}
