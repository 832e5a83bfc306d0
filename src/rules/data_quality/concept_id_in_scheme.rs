//! Concept `id` and `inScheme` pairing

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

/// Checks a Concept carrying one of `id` and `inScheme` carries both
pub struct ConceptIdInSchemeRule {
    meta: RuleMeta,
}

impl ConceptIdInSchemeRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "ConceptIdInSchemeRule",
            "Validates that both id and inScheme are set on Concept if one of them is set.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::per_model(&[("Concept", &["id", "inScheme"])]))
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::ConceptIdAndInSchemeTogether,
                "`{{field}}` is set on this Concept, so `{{otherField}}` should be set too.",
            ),
        );
        Self { meta }
    }
}

impl Default for ConceptIdInSchemeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ConceptIdInSchemeRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let canonical = node.canonical_field(field);
        let other = match canonical.as_deref() {
            Some("id") => "inScheme",
            Some("inScheme") => "id",
            _ => return Ok(Vec::new()),
        };
        if node.get_value_with_inheritance(other).is_some() {
            return Ok(Vec::new());
        }
        Ok(vec![self.meta.create_error(
            "default",
            node.get_value(field).cloned(),
            node.path_to(field),
            &[("field", field), ("otherField", other)],
        )?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{located, run};
    use serde_json::json;

    #[test]
    fn test_both_set() {
        let errors = run(
            ConceptIdInSchemeRule::new(),
            json!({"type": "Event", "activity": [{
                "type": "Concept",
                "@id": "https://openactive.io/activity-list#c16df6ed",
                "inScheme": "https://openactive.io/activity-list"
            }]}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_one_missing() {
        let errors = run(
            ConceptIdInSchemeRule::new(),
            json!({"type": "Event", "activity": [
                {"type": "Concept", "id": "https://openactive.io/activity-list#c16df6ed"},
                {"type": "Concept", "inScheme": "https://openactive.io/activity-list"},
                {"type": "Concept", "prefLabel": "Yoga"}
            ]}),
        );
        assert_eq!(
            located(&errors),
            vec![
                ("$.activity[0].id".to_string(), "concept_id_and_in_scheme_together"),
                ("$.activity[1].inScheme".to_string(), "concept_id_and_in_scheme_together"),
            ]
        );
    }
}
