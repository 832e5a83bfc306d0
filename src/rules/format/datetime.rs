//! ISO 8601 date-time format check

use chrono::{DateTime, NaiveDateTime};

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::DataType;
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

use super::typed_strings;

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub struct DateTimeFormatRule {
    meta: RuleMeta,
}

impl DateTimeFormatRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "DateTimeFormatRule",
            "Validates that DateTime fields are in the correct format.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::InvalidFormat,
                "DateTimes should be expressed as ISO 8601 date-times with a time zone. For example, 2018-08-01T10:51:02Z.",
            ),
        );
        Self { meta }
    }
}

impl Default for DateTimeFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

/// An ISO 8601 date-time, with or without an offset
///
/// Used for ordering checks. `DateTimeFormatRule` itself requires an offset.
pub(crate) fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.naive_utc());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

impl Rule for DateTimeFormatRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        typed_strings(node, field, DataType::DateTime)
            .into_iter()
            .filter(|(_, value)| DateTime::parse_from_rfc3339(value).is_err())
            .map(|(path, value)| {
                self.meta
                    .create_error("default", Some(value.into()), path, &[])
            })
            .collect()
    }
}
