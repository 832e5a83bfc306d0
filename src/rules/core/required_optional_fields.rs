//! Required-optional field groups

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::{path, ModelNode};
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};

/// Checks at least one field of every required-option group is present
pub struct RequiredOptionalFieldsRule {
    meta: RuleMeta,
}

impl RequiredOptionalFieldsRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "RequiredOptionalFieldsRule",
            "Validates that all optional fields that are part of a required group are present in the JSON data.",
        )
        .with_capability(Capability::Model)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::MissingRequiredField,
                "One of {{fields}} is required on \"{{model}}\".",
            ),
        );
        Self { meta }
    }
}

impl Default for RequiredOptionalFieldsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RequiredOptionalFieldsRule {
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

        let mut errors = Vec::new();
        for group in model.required_options() {
            let satisfied = group
                .options
                .iter()
                .any(|field| node.get_value_with_inheritance(field).is_some());
            if satisfied {
                continue;
            }

            let fields = group
                .options
                .iter()
                .map(|field| format!("\"{}\"", field))
                .collect::<Vec<_>>()
                .join(", ");
            let mut error = self.meta.create_error(
                "default",
                None,
                path::union_path(node.path(), &group.options),
                &[("fields", fields.as_str()), ("model", model.type_name().unwrap_or_default())],
            )?;
            if let Some(description) = &group.description {
                error.message = description.clone();
            }
            errors.push(error);
        }
        Ok(errors)
    }
}
