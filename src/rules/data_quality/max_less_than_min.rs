//! QuantitativeValue bounds ordering

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetModels, TestDefinition,
};

/// Checks `minValue` does not exceed `maxValue`
pub struct MaxLessThanMinRule {
    meta: RuleMeta,
}

impl MaxLessThanMinRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "MaxLessThanMinRule",
            "Validates that the minValue of a QuantitativeValue is not greater than its maxValue.",
        )
        .with_capability(Capability::Model)
        .targeting_models(TargetModels::only(&["QuantitativeValue"]))
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::MinValueGreaterThanMaxValue,
                "minValue ({{min}}) should not be greater than maxValue ({{max}}).",
            ),
        );
        Self { meta }
    }
}

impl Default for MaxLessThanMinRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MaxLessThanMinRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let number = |field: &str| {
            node.get_value_with_inheritance(field)
                .and_then(|value| value.as_f64())
        };
        let (Some(min), Some(max)) = (number("minValue"), number("maxValue")) else {
            return Ok(Vec::new());
        };
        if min <= max {
            return Ok(Vec::new());
        }

        let key = node.key_for("minValue").unwrap_or("minValue");
        let (min, max) = (min.to_string(), max.to_string());
        Ok(vec![self.meta.create_error(
            "default",
            node.get_value(key).cloned(),
            node.path_to(key),
            &[("min", min.as_str()), ("max", max.as_str())],
        )?])
    }
}
