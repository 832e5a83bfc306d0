//! Rule metadata: targets, capabilities and named tests

use serde_json::Value;

use super::errors::{RuleError, RuleResult};
use super::{Capability, TargetFields, TargetModels};
use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::Model;

/// A named check a rule can report
#[derive(Debug, Clone, PartialEq)]
pub struct TestDefinition {
    pub description: &'static str,
    pub category: ValidationErrorCategory,
    pub severity: ValidationErrorSeverity,
    pub error_type: ValidationErrorType,
    /// Message with `{{name}}` placeholders
    pub message: &'static str,
}

impl TestDefinition {
    pub fn new(
        category: ValidationErrorCategory,
        severity: ValidationErrorSeverity,
        error_type: ValidationErrorType,
        message: &'static str,
    ) -> Self {
        Self {
            description: "",
            category,
            severity,
            error_type,
            message,
        }
    }

    pub fn described(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Everything a rule declares about itself at construction
#[derive(Debug, Clone)]
pub struct RuleMeta {
    name: &'static str,
    description: &'static str,
    capabilities: Vec<Capability>,
    target_models: TargetModels,
    target_fields: TargetFields,
    tests: Vec<(&'static str, TestDefinition)>,
}

impl RuleMeta {
    /// A rule with no capabilities, targeting every model and no fields
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            capabilities: Vec::new(),
            target_models: TargetModels::All,
            target_fields: TargetFields::None,
            tests: Vec::new(),
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn targeting_models(mut self, target_models: TargetModels) -> Self {
        self.target_models = target_models;
        self
    }

    pub fn targeting_fields(mut self, target_fields: TargetFields) -> Self {
        self.target_fields = target_fields;
        self
    }

    pub fn with_test(mut self, key: &'static str, test: TestDefinition) -> Self {
        self.tests.push((key, test));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn target_models(&self) -> &TargetModels {
        &self.target_models
    }

    pub fn target_fields(&self) -> &TargetFields {
        &self.target_fields
    }

    pub fn handles(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn test(&self, key: &str) -> Option<&TestDefinition> {
        self.tests.iter().find(|(k, _)| *k == key).map(|(_, test)| test)
    }

    pub fn tests(&self) -> impl Iterator<Item = (&'static str, &TestDefinition)> {
        self.tests.iter().map(|(key, test)| (*key, test))
    }

    /// Whether the model handler runs for `model`
    pub fn is_model_targeted(&self, model: &Model) -> bool {
        self.handles(Capability::Model) && self.target_models.matches(model)
    }

    /// Whether the field handler runs for `key` on `model`
    pub fn is_field_targeted(&self, model: &Model, key: &str, canonical: Option<&str>) -> bool {
        self.handles(Capability::Field) && self.target_fields.matches(model, key, canonical)
    }

    /// Build a finding from the named test
    pub fn create_error(
        &self,
        test_key: &str,
        value: Option<Value>,
        path: impl Into<String>,
        message_values: &[(&str, &str)],
    ) -> RuleResult<ValidationError> {
        let test = self.test(test_key).ok_or_else(|| RuleError::UnknownTest {
            rule: self.name.to_string(),
            test: test_key.to_string(),
        })?;

        let mut error = ValidationError::new(test.category, test.error_type, test.severity, path)
            .with_message(render_template(test.message, message_values))
            .with_rule(self.name);
        error.value = value;
        Ok(error)
    }
}

/// Replace each `{{name}}` token with its value
///
/// Single pass and literal: substituted text is never rescanned, and tokens
/// without a value are left as they are.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rendered.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => rendered.push_str(value),
            None => {
                rendered.push_str("{{");
                rendered.push_str(name);
                rendered.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    rendered.push_str(rest);
    rendered
}
