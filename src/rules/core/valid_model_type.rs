//! Model type recognition

use serde_json::Value;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::types::type_indicator;
use crate::node::ModelNode;
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};
use crate::vocabulary::{resolve_property, PropertyForm};

/// Checks every object carries a type the specification knows
pub struct ValidModelTypeRule {
    meta: RuleMeta,
}

impl ValidModelTypeRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "ValidModelTypeRule",
            "Validates that objects are submitted with a recognised type.",
        )
        .with_capability(Capability::Model)
        .with_test(
            "noType",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::MissingRequiredField,
                "Please add a \"type\" property to this JSON object.",
            ),
        )
        .with_test(
            "noTypeWithHint",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::MissingRequiredField,
                "Objects in \"{{field}}\" must be of type \"{{model}}\". Please add \"type\": \"{{model}}\" to this object to allow for further validation.",
            ),
        )
        .with_test(
            "modelNotFound",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::ModelNotFound,
                "Type \"{{type}}\" is not recognised by the validator, and cannot be checked for validity.",
            ),
        )
        .with_test(
            "experimental",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Suggestion,
                ValidationErrorType::ExperimentalFieldsNotChecked,
                "Type \"{{type}}\" is an extension type, and cannot be checked for validity.",
            ),
        );
        Self { meta }
    }
}

impl Default for ValidModelTypeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ValidModelTypeRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let model = node.model();
        if !model.is_json_ld() {
            return Ok(Vec::new());
        }

        let Some(raw) = type_indicator(node.value()) else {
            // A type supplied by the caller, or by the enclosing field, that
            // the specification does not know
            if !model.has_specification() {
                if let Some(type_name) = model.type_name() {
                    return Ok(vec![self.meta.create_error(
                        "modelNotFound",
                        None,
                        node.path(),
                        &[("type", type_name)],
                    )?]);
                }
            }

            let hint = node
                .parent_field()
                .and_then(|field| field.single_model())
                .zip(node.name());
            let error = match hint {
                Some((model_name, field)) => self.meta.create_error(
                    "noTypeWithHint",
                    None,
                    node.path(),
                    &[("field", field), ("model", model_name)],
                )?,
                None => self.meta.create_error("noType", None, node.path(), &[])?,
            };
            return Ok(vec![error]);
        };

        let value = Some(Value::String(raw.to_string()));
        let property = resolve_property(raw, ctx.metadata(), &[]);
        let extension = matches!(property.form, PropertyForm::Compact | PropertyForm::Absolute)
            && !property.is_registry(ctx.metadata());

        let test_key = if extension {
            "experimental"
        } else if !model.has_specification() {
            "modelNotFound"
        } else {
            return Ok(Vec::new());
        };
        Ok(vec![self.meta.create_error(test_key, value, node.path(), &[("type", raw)])?])
    }
}
