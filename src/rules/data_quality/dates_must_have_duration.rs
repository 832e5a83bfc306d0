//! Duration presence for dated events

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};

/// Checks models with both start and end dates also give a duration
pub struct DatesMustHaveDurationRule {
    meta: RuleMeta,
}

impl DatesMustHaveDurationRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "DatesMustHaveDurationRule",
            "Validates that a duration is given when both startDate and endDate are set.",
        )
        .with_capability(Capability::Model)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::DatesMustHaveDuration,
                "A duration should be provided when a startDate and endDate are set on \"{{model}}\".",
            ),
        );
        Self { meta }
    }
}

impl Default for DatesMustHaveDurationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DatesMustHaveDurationRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let model = node.model();
        if !model.has_field_in_spec("duration") {
            return Ok(Vec::new());
        }
        let has = |field: &str| node.get_value_with_inheritance(field).is_some();
        if !has("startDate") || !has("endDate") || has("duration") {
            return Ok(Vec::new());
        }
        Ok(vec![self.meta.create_error(
            "default",
            None,
            node.path_to("duration"),
            &[("model", model.type_name().unwrap_or_default())],
        )?])
    }
}
