//! Time of day format check

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::types::is_time;
use crate::model::DataType;
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

use super::typed_strings;

pub struct TimeFormatRule {
    meta: RuleMeta,
}

impl TimeFormatRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "TimeFormatRule",
            "Validates that Time fields are in the correct format.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::InvalidFormat,
                "Times should be expressed as ISO 8601 times. For example, 19:30.",
            ),
        );
        Self { meta }
    }
}

impl Default for TimeFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TimeFormatRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        typed_strings(node, field, DataType::Time)
            .into_iter()
            .filter(|(_, value)| !is_time(value))
            .map(|(path, value)| {
                self.meta
                    .create_error("default", Some(value.into()), path, &[])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{located, run};
    use serde_json::json;

    #[test]
    fn test_time_fields() {
        let errors = run(
            TimeFormatRule::new(),
            json!({
                "type": "Event",
                "eventSchedule": [
                    {"type": "Schedule", "startTime": "19:30"},
                    {"type": "Schedule", "startTime": "19:30:00Z"},
                    {"type": "Schedule", "startTime": "7.30pm"},
                    {"type": "Schedule", "startTime": "25:00"}
                ]
            }),
        );
        assert_eq!(
            located(&errors),
            vec![
                ("$.eventSchedule[2].startTime".to_string(), "invalid_format"),
                ("$.eventSchedule[3].startTime".to_string(), "invalid_format"),
            ]
        );
    }
}
