//! Field value type conformance

use serde_json::Value;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::types::is_value_object;
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

/// Checks field values against their declared types
pub struct FieldsCorrectTypeRule {
    meta: RuleMeta,
}

impl FieldsCorrectTypeRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "FieldsCorrectTypeRule",
            "Validates that all fields are the correct type.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::InvalidType,
                "Invalid type, expected one of {{expectedTypes}} but found {{foundType}}.",
            ),
        )
        .with_test(
            "valueObject",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::UnsupportedValue,
                "Values wrapped in `@value` objects are not supported by the validator. Please use the plain value instead.",
            ),
        );
        Self { meta }
    }
}

impl Default for FieldsCorrectTypeRule {
    fn default() -> Self {
        Self::new()
    }
}

fn has_value_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => is_value_object(map),
        Value::Array(items) => items
            .iter()
            .any(|item| matches!(item, Value::Object(map) if is_value_object(map))),
        _ => false,
    }
}

/// Null and empty values are reported by `NoEmptyValuesRule`
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl Rule for FieldsCorrectTypeRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let (Some(definition), Some(value)) = (node.field_for(field), node.get_value(field)) else {
            return Ok(Vec::new());
        };
        if is_empty(value) {
            return Ok(Vec::new());
        }

        if has_value_object(value) {
            return Ok(vec![self.meta.create_error(
                "valueObject",
                Some(value.clone()),
                node.path_to(field),
                &[],
            )?]);
        }

        if definition.accepts(value) {
            return Ok(Vec::new());
        }
        let expected = definition.describe_types();
        let found = definition.detect_type(value).to_string();
        Ok(vec![self.meta.create_error(
            "default",
            Some(value.clone()),
            node.path_to(field),
            &[("expectedTypes", expected.as_str()), ("foundType", found.as_str())],
        )?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{located, run};
    use serde_json::json;

    #[test]
    fn test_correct_types() {
        let errors = run(
            FieldsCorrectTypeRule::new(),
            json!({
                "type": "Event",
                "name": "Yoga",
                "url": "https://example.org/yoga",
                "startDate": "2018-01-01T10:00:00Z",
                "maximumAttendeeCapacity": 20,
                "location": {"type": "Place"},
                "activity": [{"type": "Concept"}]
            }),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_wrong_scalar_type() {
        let errors = run(
            FieldsCorrectTypeRule::new(),
            json!({"type": "Event", "name": 42, "maximumAttendeeCapacity": "twenty"}),
        );
        assert_eq!(
            located(&errors),
            vec![
                ("$.name".to_string(), "invalid_type"),
                ("$.maximumAttendeeCapacity".to_string(), "invalid_type"),
            ]
        );
        assert!(errors[0].message.contains("https://schema.org/Text"));
        assert!(errors[0].message.contains("https://schema.org/Integer"));
    }

    #[test]
    fn test_array_with_bad_element() {
        let errors = run(
            FieldsCorrectTypeRule::new(),
            json!({"type": "Event", "activity": [{"type": "Concept"}, "Yoga"]}),
        );
        assert_eq!(located(&errors), vec![("$.activity".to_string(), "invalid_type")]);
    }

    #[test]
    fn test_nested_array() {
        let errors = run(
            FieldsCorrectTypeRule::new(),
            json!({"type": "Event", "activity": [[{"type": "Concept"}]]}),
        );
        assert_eq!(located(&errors), vec![("$.activity".to_string(), "invalid_type")]);
    }

    #[test]
    fn test_value_object() {
        let errors = run(
            FieldsCorrectTypeRule::new(),
            json!({"type": "Event", "name": {"@value": "Yoga", "@language": "en"}}),
        );
        assert_eq!(located(&errors), vec![("$.name".to_string(), "unsupported_value")]);
    }

    #[test]
    fn test_empty_and_undeclared_values_are_skipped() {
        let errors = run(
            FieldsCorrectTypeRule::new(),
            json!({"type": "Event", "name": null, "url": "", "colour": 3}),
        );
        assert!(errors.is_empty());
    }
}
