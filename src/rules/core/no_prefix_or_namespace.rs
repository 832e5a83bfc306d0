//! Prefixed and namespaced key detection

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

/// Flags keys spelled as an alias or namespaced form of a declared field
pub struct NoPrefixOrNamespaceRule {
    meta: RuleMeta,
}

impl NoPrefixOrNamespaceRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "NoPrefixOrNamespaceRule",
            "Validates that fields are not prefixed or namespaced.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::UseFieldAliases,
                "Use `{{field}}` rather than `{{alias}}`.",
            ),
        );
        Self { meta }
    }
}

impl Default for NoPrefixOrNamespaceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NoPrefixOrNamespaceRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        match node.canonical_field(field) {
            Some(canonical) if canonical != field => Ok(vec![self.meta.create_error(
                "default",
                node.get_value(field).cloned(),
                node.path_to(field),
                &[("field", canonical.as_str()), ("alias", field)],
            )?]),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{located, run};
    use serde_json::json;

    #[test]
    fn test_plain_fields() {
        let errors = run(
            NoPrefixOrNamespaceRule::new(),
            json!({"@context": "https://openactive.io/", "type": "Event", "name": "Yoga", "ext:name": "x"}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_alias_forms() {
        let errors = run(
            NoPrefixOrNamespaceRule::new(),
            json!({
                "@type": "Event",
                "@id": "https://example.org/events/1",
                "schema:name": "Yoga",
                "https://openactive.io/description": "Gentle"
            }),
        );
        assert_eq!(
            located(&errors),
            vec![
                ("$[\"@type\"]".to_string(), "use_field_aliases"),
                ("$[\"@id\"]".to_string(), "use_field_aliases"),
                ("$[\"schema:name\"]".to_string(), "use_field_aliases"),
                ("$[\"https://openactive.io/description\"]".to_string(), "use_field_aliases"),
            ]
        );
        assert_eq!(errors[0].message, "Use `type` rather than `@type`.");
    }
}
