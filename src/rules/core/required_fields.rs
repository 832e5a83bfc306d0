//! Required field presence

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};

/// Checks every required field is present under some spelling
pub struct RequiredFieldsRule {
    meta: RuleMeta,
}

impl RequiredFieldsRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "RequiredFieldsRule",
            "Validates that all required fields are present in the JSON data.",
        )
        .with_capability(Capability::Model)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::MissingRequiredField,
                "Required field \"{{field}}\" is missing from \"{{model}}\".",
            ),
        );
        Self { meta }
    }
}

impl Default for RequiredFieldsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RequiredFieldsRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let model = node.model();
        if !model.has_specification() {
            return Ok(Vec::new());
        }
        let model_name = model.type_name().unwrap_or_default();

        model
            .required_fields()
            .iter()
            .filter(|field| node.get_value_with_inheritance(field).is_none())
            .map(|field| {
                self.meta.create_error(
                    "default",
                    None,
                    node.path_to(field),
                    &[("field", field.as_str()), ("model", model_name)],
                )
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
    fn test_all_present() {
        let errors = run(RequiredFieldsRule::new(), json!({"type": "Event", "name": "Yoga"}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_field() {
        let errors = run(RequiredFieldsRule::new(), json!({"type": "Event"}));
        assert_eq!(located(&errors), vec![("$.name".to_string(), "missing_required_field")]);
        assert_eq!(errors[0].message, "Required field \"name\" is missing from \"Event\".");
    }

    #[test]
    fn test_present_under_alias() {
        let errors = run(
            RequiredFieldsRule::new(),
            json!({"@type": "Event", "schema:name": "Yoga"}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_null_counts_as_present() {
        let errors = run(RequiredFieldsRule::new(), json!({"type": "Event", "name": null}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_nested_path() {
        let errors = run(
            RequiredFieldsRule::new(),
            json!({"type": "Event", "name": "Yoga", "location": {"type": "Place", "geo": {"type": "GeoCoordinates", "latitude": 51.5}}}),
        );
        assert_eq!(
            located(&errors),
            vec![("$.location.geo.longitude".to_string(), "missing_required_field")]
        );
    }

    #[test]
    fn test_unknown_model_is_skipped() {
        let errors = run(RequiredFieldsRule::new(), json!({"type": "Dragon"}));
        assert!(errors.is_empty());
    }
}
