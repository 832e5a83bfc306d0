//! Recommended field presence

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};

/// Checks recommended fields are present
pub struct RecommendedFieldsRule {
    meta: RuleMeta,
}

impl RecommendedFieldsRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "RecommendedFieldsRule",
            "Validates that all recommended fields are present in the JSON data.",
        )
        .with_capability(Capability::Model)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::MissingRecommendedField,
                "Recommended field \"{{field}}\" is missing from \"{{model}}\".",
            ),
        );
        Self { meta }
    }
}

impl Default for RecommendedFieldsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RecommendedFieldsRule {
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
            .recommended_fields()
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
    fn test_missing_recommended_field() {
        let errors = run(RecommendedFieldsRule::new(), json!({"type": "Event"}));
        assert_eq!(
            located(&errors),
            vec![("$.description".to_string(), "missing_recommended_field")]
        );
        assert_eq!(errors[0].severity, ValidationErrorSeverity::Warning);
    }

    #[test]
    fn test_present() {
        let errors = run(
            RecommendedFieldsRule::new(),
            json!({"type": "Event", "description": "Gentle"}),
        );
        assert!(errors.is_empty());
    }
}
