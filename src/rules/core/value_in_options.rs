//! Allowed value checks for option-restricted fields

use serde_json::Value;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};
use crate::vocabulary::same_iri;

/// Checks values of enumerated fields are among the allowed values
pub struct ValueInOptionsRule {
    meta: RuleMeta,
}

impl ValueInOptionsRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "ValueInOptionsRule",
            "Validates that properties contain allowed values.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::FieldNotInDefinedValues,
                "Value \"{{value}}\" is not in the allowed values for this property. Allowed values are: {{allowedValues}}.",
            ),
        );
        Self { meta }
    }
}

impl Default for ValueInOptionsRule {
    fn default() -> Self {
        Self::new()
    }
}

fn is_allowed(value: &Value, options: &[Value]) -> bool {
    options.iter().any(|option| match (option, value) {
        (Value::String(a), Value::String(b)) => same_iri(a, b),
        (a, b) => a == b,
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Rule for ValueInOptionsRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let Some(options) = node.field_for(field).and_then(|definition| definition.options())
        else {
            return Ok(Vec::new());
        };
        let Some(value) = node.get_value(field) else {
            return Ok(Vec::new());
        };

        let candidates: Vec<(String, &Value)> = match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (node.path_to_index(field, i), item))
                .collect(),
            Value::Null => Vec::new(),
            other => vec![(node.path_to(field), other)],
        };

        let allowed = options.iter().map(describe).collect::<Vec<_>>().join(", ");
        let mut errors = Vec::new();
        for (path, candidate) in candidates {
            if candidate.is_null() || is_allowed(candidate, options) {
                continue;
            }
            let described = describe(candidate);
            errors.push(self.meta.create_error(
                "default",
                Some(candidate.clone()),
                path,
                &[("value", described.as_str()), ("allowedValues", allowed.as_str())],
            )?);
        }
        Ok(errors)
    }
}
