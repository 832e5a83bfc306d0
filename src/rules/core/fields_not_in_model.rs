//! Field membership against the model definition

use serde_json::Value;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::types::SCHEMA_ORG;
use crate::model::{MetaData, Model};
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};
use crate::vocabulary::{is_property_in_class, resolve_property, Property, PropertyForm};

/// Checks every key of a node is a property of its model
///
/// Exactly one outcome per key, first match wins:
/// 1. disallowed by the model
/// 2. declared by the model, under any spelling
/// 3. outside the registry namespaces, unless a context graph documents it
/// 4. a known misspelling
/// 5. documented for the superclass by a supplied vocabulary graph
/// 6. not in the specification
pub struct FieldsNotInModelRule {
    meta: RuleMeta,
}

impl FieldsNotInModelRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "FieldsNotInModelRule",
            "Validates that all properties are present in the specification.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "notAllowed",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::FieldNotAllowedInSpec,
                "This property is not allowed in \"{{model}}\".",
            ),
        )
        .with_test(
            "invalidExperimental",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Notice,
                ValidationErrorType::ExperimentalFieldsNotChecked,
                "No definition for the extension property \"{{field}}\" could be found. Extension properties must be described by a published JSON-LD definition referenced in the `@context`.",
            )
            .described("Raises a notice if extension properties have no definition in the @context."),
        )
        .with_test(
            "typoHint",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::FieldCouldBeTypo,
                "`{{typoField}}` is a common misspelling for the property `{{actualField}}`. Please correct this property to `{{actualField}}`.",
            ),
        )
        .with_test(
            "inSchemaOrg",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Notice,
                ValidationErrorType::SchemaOrgFieldsNotChecked,
                "`{{field}}` is declared in schema.org but this validator is not yet capable of checking whether it has the right format or values.",
            ),
        )
        .with_test(
            "notInSpec",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::FieldNotInSpec,
                "This property is not defined in the specification. If you are trying to add your own property, rename it to `ext:{{field}}`.",
            ),
        );
        Self { meta }
    }
}

impl Default for FieldsNotInModelRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Class IRIs a property of `model` may be documented under
fn class_candidates(model: &Model, metadata: &MetaData) -> Vec<String> {
    let mut classes: Vec<String> = model.derived_from().map(str::to_string).into_iter().collect();
    if let (Some(namespace), Some(type_name)) = (metadata.vocabulary_namespace(), model.type_name()) {
        classes.push(format!("{}{}", namespace, type_name));
    }
    classes
}

/// Namespace part of a class IRI
fn namespace_of(class: &str) -> &str {
    match class.rfind(['/', '#']) {
        Some(end) => &class[..=end],
        None => class,
    }
}

/// IRIs a superclass vocabulary may use for `property`
fn superclass_candidates(property: &Property, derived_from: &str) -> Vec<String> {
    let mut candidates: Vec<String> = property.iri().into_iter().collect();
    if matches!(property.form, PropertyForm::Bare) {
        candidates.push(format!("{}{}", namespace_of(derived_from), property.name));
        candidates.push(format!("{}{}", SCHEMA_ORG, property.name));
    }
    candidates.dedup();
    candidates
}

fn documented_in(graphs: &[Value], properties: &[String], classes: &[String]) -> bool {
    graphs.iter().any(|graph| {
        properties.iter().any(|property| {
            classes
                .iter()
                .any(|class| is_property_in_class(graph, property, class))
        })
    })
}

impl Rule for FieldsNotInModelRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let model = node.model();
        if !model.has_specification() || field == "@context" {
            return Ok(Vec::new());
        }

        let metadata = ctx.metadata();
        let model_name = model.type_name().unwrap_or_default();
        let property = resolve_property(field, metadata, ctx.contexts());
        let registry = property.is_registry(metadata);
        let value = node.get_value(field).cloned();
        let path = node.path_to(field);

        if model.has_field_not_in_spec(field)
            || (registry && model.has_field_not_in_spec(&property.name))
        {
            return Ok(vec![self.meta.create_error(
                "notAllowed",
                value,
                path,
                &[("model", model_name)],
            )?]);
        }

        if node.canonical_field(field).is_some() {
            return Ok(Vec::new());
        }

        if !registry {
            if let Some(iri) = property.iri() {
                let classes = class_candidates(model, metadata);
                if documented_in(ctx.contexts(), &[iri], &classes) {
                    return Ok(Vec::new());
                }
            }
            return Ok(vec![self.meta.create_error(
                "invalidExperimental",
                value,
                path,
                &[("field", field)],
            )?]);
        }

        if let Some(actual) = model.common_typo(field) {
            return Ok(vec![self.meta.create_error(
                "typoHint",
                value,
                path,
                &[("typoField", field), ("actualField", actual)],
            )?]);
        }

        if let Some(derived_from) = model.derived_from() {
            let candidates = superclass_candidates(&property, derived_from);
            let classes = [derived_from.to_string()];
            if documented_in(&ctx.options().schema_org_specifications, &candidates, &classes) {
                return Ok(vec![self.meta.create_error(
                    "inSchemaOrg",
                    value,
                    path,
                    &[("field", property.name.as_str())],
                )?]);
            }
        }

        Ok(vec![self.meta.create_error(
            "notInSpec",
            value,
            path,
            &[("field", property.name.as_str())],
        )?])
    }
}
