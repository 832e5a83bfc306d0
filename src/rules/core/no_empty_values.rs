//! Null and empty value detection

use serde_json::Value;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

/// Flags null and empty values
pub struct NoEmptyValuesRule {
    meta: RuleMeta,
}

impl NoEmptyValuesRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "NoEmptyValuesRule",
            "Validates that fields are not null or empty.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::FieldIsEmpty,
                "Fields should not be null or empty. Please remove `{{field}}` or give it a value.",
            ),
        );
        Self { meta }
    }
}

impl Default for NoEmptyValuesRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NoEmptyValuesRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let Some(value) = node.get_value(field) else {
            return Ok(Vec::new());
        };
        let empty = match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        };
        if !empty {
            return Ok(Vec::new());
        }
        Ok(vec![self.meta.create_error(
            "default",
            Some(value.clone()),
            node.path_to(field),
            &[("field", field)],
        )?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{located, run};
    use serde_json::json;

    #[test]
    fn test_empty_values() {
        let errors = run(
            NoEmptyValuesRule::new(),
            json!({"type": "Event", "name": null, "description": "", "activity": [], "location": {}, "maximumAttendeeCapacity": 0, "isAccessible": false}),
        );
        assert_eq!(
            located(&errors),
            vec![
                ("$.name".to_string(), "field_is_empty"),
                ("$.description".to_string(), "field_is_empty"),
                ("$.activity".to_string(), "field_is_empty"),
                ("$.location".to_string(), "field_is_empty"),
            ]
        );
        assert!(errors.iter().all(|e| e.category == ValidationErrorCategory::DataQuality));
    }
}
