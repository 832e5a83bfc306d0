//! ISO 8601 duration format check

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::types::is_duration;
use crate::model::DataType;
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

use super::typed_strings;

pub struct DurationFormatRule {
    meta: RuleMeta,
}

impl DurationFormatRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "DurationFormatRule",
            "Validates that duration fields are in the correct format.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::InvalidFormat,
                "Durations should be expressed as ISO 8601 durations. For example, P1D, PT1H or PT1H30M.",
            ),
        );
        Self { meta }
    }
}

impl Default for DurationFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DurationFormatRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        typed_strings(node, field, DataType::Duration)
            .into_iter()
            .filter(|(_, value)| !is_duration(value))
            .map(|(path, value)| {
                self.meta
                    .create_error("default", Some(value.into()), path, &[])
            })
            .collect()
    }
}
