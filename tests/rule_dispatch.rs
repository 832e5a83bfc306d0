//! Rule Dispatch Tests
//!
//! Dispatch is driven by rule declarations alone:
//! - document handlers run once, before the tree
//! - nodes are visited in pre-order, children in key order
//! - per node, rules run in registration order
//! - field targets match canonical spellings
//! - a failing or panicking handler is logged and skipped, never fatal

mod common;

use common::{fixture_registry, located};
use ldcheck::rules::{
    Capability, RuleContext, RuleError, RuleMeta, RuleResult, TargetFields, TargetModels,
    TestDefinition,
};
use ldcheck::{
    ModelNode, Rule, RuleSet, ValidationError, ValidationErrorCategory, ValidationErrorSeverity,
    ValidationErrorType, ValidationOptions, Validator,
};
use serde_json::{json, Map, Value};

fn notice(tag: &'static str, message: &'static str) -> TestDefinition {
    TestDefinition::new(
        ValidationErrorCategory::DataQuality,
        ValidationErrorSeverity::Notice,
        ValidationErrorType::Custom(tag),
        message,
    )
}

/// Reports every node it visits
struct VisitRule {
    meta: RuleMeta,
}

impl VisitRule {
    fn new(name: &'static str, tag: &'static str) -> Self {
        let meta = RuleMeta::new(name, "Reports each visited node.")
            .with_capability(Capability::Model)
            .with_test("default", notice(tag, "Visited \"{{model}}\"."));
        Self { meta }
    }
}

impl Rule for VisitRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let model = node.model().type_name().unwrap_or_default();
        Ok(vec![self.meta.create_error("default", None, node.path(), &[("model", model)])?])
    }
}

/// Fails on every Event node
struct FaultyRule {
    meta: RuleMeta,
}

impl FaultyRule {
    fn new() -> Self {
        let meta = RuleMeta::new("FaultyRule", "Cannot check events.")
            .with_capability(Capability::Model)
            .targeting_models(TargetModels::only(&["Event"]));
        Self { meta }
    }
}

impl Rule for FaultyRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        Err(RuleError::invalid_data(self.meta.name(), node.path(), "unexpected shape"))
    }
}

/// Panics on every node
struct PanickingRule {
    meta: RuleMeta,
}

impl PanickingRule {
    fn new() -> Self {
        let meta = RuleMeta::new("PanickingRule", "Cannot check anything.")
            .with_capability(Capability::Model);
        Self { meta }
    }
}

impl Rule for PanickingRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        panic!("cannot check {}", node.path());
    }
}

/// Reports the document once
struct DocumentRule {
    meta: RuleMeta,
}

impl DocumentRule {
    fn new() -> Self {
        let meta = RuleMeta::new("DocumentRule", "Reports the document.")
            .with_capability(Capability::Document)
            .with_test("default", notice("document_seen", "Seen {{keys}} keys."));
        Self { meta }
    }
}

impl Rule for DocumentRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_document(
        &self,
        document: &Map<String, Value>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let keys = document.len().to_string();
        Ok(vec![self.meta.create_error("default", None, "$", &[("keys", keys.as_str())])?])
    }
}

/// Reports Concept identifiers, under any spelling
struct ConceptIdRule {
    meta: RuleMeta,
}

impl ConceptIdRule {
    fn new() -> Self {
        let meta = RuleMeta::new("ConceptIdRule", "Reports concept identifiers.")
            .with_capability(Capability::Field)
            .targeting_fields(TargetFields::per_model(&[("Concept", &["id"])]))
            .with_test("default", notice("concept_id", "Identifier `{{field}}`."));
        Self { meta }
    }
}

impl Rule for ConceptIdRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        Ok(vec![self.meta.create_error(
            "default",
            node.get_value(field).cloned(),
            node.path_to(field),
            &[("field", field)],
        )?])
    }
}

fn run(rules: RuleSet, document: Value) -> Vec<ValidationError> {
    Validator::new(fixture_registry())
        .with_rules(rules)
        .validate(&document, &ValidationOptions::default())
}

fn nested_event() -> Value {
    json!({
        "@context": "https://openactive.io/",
        "type": "Event",
        "name": "Yoga",
        "location": {
            "type": "Place",
            "geo": {"type": "GeoCoordinates", "latitude": 51.5, "longitude": -0.1}
        },
        "activity": [
            {"type": "Concept", "@id": "https://openactive.io/activity-list#a", "prefLabel": "Yoga"},
            "not a node",
            {"type": "Concept", "id": "https://openactive.io/activity-list#b"}
        ]
    })
}

// =============================================================================
// Ordering Tests
// =============================================================================

/// Nodes are visited in pre-order; array elements by index.
#[test]
fn test_pre_order_traversal() {
    let errors = run(RuleSet::new().with(VisitRule::new("VisitRule", "visited")), nested_event());
    let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["$", "$.location", "$.location.geo", "$.activity[0]", "$.activity[2]"]
    );
    assert_eq!(errors[1].message, "Visited \"Place\".");
    assert_eq!(errors[2].message, "Visited \"GeoCoordinates\".");
}

/// Per node, rules report in registration order.
#[test]
fn test_registration_order_per_node() {
    let rules = RuleSet::new()
        .with(VisitRule::new("FirstRule", "first"))
        .with(VisitRule::new("SecondRule", "second"));
    let errors = run(rules, json!({"type": "Place", "geo": {"type": "GeoCoordinates"}}));
    assert_eq!(
        located(&errors),
        vec![
            ("$".to_string(), "first"),
            ("$".to_string(), "second"),
            ("$.geo".to_string(), "first"),
            ("$.geo".to_string(), "second"),
        ]
    );
    assert_eq!(errors[0].rule.as_deref(), Some("FirstRule"));
}

/// Document handlers run before any node, wherever they are registered.
#[test]
fn test_document_handlers_run_first() {
    let rules = RuleSet::new()
        .with(VisitRule::new("VisitRule", "visited"))
        .with(DocumentRule::new());
    let errors = run(rules, json!({"type": "Place", "name": "Hall"}));
    assert_eq!(
        located(&errors),
        vec![("$".to_string(), "document_seen"), ("$".to_string(), "visited")]
    );
    assert_eq!(errors[0].message, "Seen 2 keys.");
}

// =============================================================================
// Targeting Tests
// =============================================================================

/// Field targets match aliased spellings and only the targeted model.
#[test]
fn test_per_model_field_targets() {
    let errors = run(RuleSet::new().with(ConceptIdRule::new()), nested_event());
    assert_eq!(
        located(&errors),
        vec![
            ("$.activity[0][\"@id\"]".to_string(), "concept_id"),
            ("$.activity[2].id".to_string(), "concept_id"),
        ]
    );
    assert_eq!(errors[0].message, "Identifier `@id`.");
}

/// Model targets restrict the model handler.
#[test]
fn test_model_targets() {
    let errors = run(RuleSet::new().with(FaultyRule::new()), json!({"type": "Place"}));
    assert!(errors.is_empty());
}

// =============================================================================
// Fault Isolation Tests
// =============================================================================

/// A failing rule contributes nothing and the run continues.
#[test]
fn test_faulty_rule_is_isolated() {
    let rules = RuleSet::new()
        .with(FaultyRule::new())
        .with(VisitRule::new("VisitRule", "visited"));
    let errors = run(rules, nested_event());
    assert_eq!(errors.len(), 5);
    assert!(errors.iter().all(|e| e.rule.as_deref() == Some("VisitRule")));
}

/// A panicking rule is isolated the same way as one returning an error.
#[test]
fn test_panicking_rule_is_isolated() {
    let rules = RuleSet::new()
        .with(PanickingRule::new())
        .with(VisitRule::new("VisitRule", "visited"));
    let errors = run(rules, nested_event());
    assert_eq!(errors.len(), 5);
    assert!(errors.iter().all(|e| e.rule.as_deref() == Some("VisitRule")));
}

/// The fault is the same with or without the built-in rules around it.
#[test]
fn test_faulty_rule_among_defaults() {
    let document = common::conformant_event();
    let expected = Validator::new(fixture_registry())
        .validate(&document, &ValidationOptions::default());

    let mut rules = RuleSet::default_rules();
    rules.push(FaultyRule::new());
    let actual = run(rules, document);
    assert_eq!(actual, expected);
}

// =============================================================================
// Catalogue Tests
// =============================================================================

/// The built-in catalogue is registered in a fixed order.
#[test]
fn test_default_catalogue_order() {
    let names = RuleSet::default_rules().names();
    assert_eq!(names.len(), 20);
    assert_eq!(names[0], "ContextInRootNodeRule");
    assert_eq!(names[5], "FieldsNotInModelRule");
    assert_eq!(names[19], "ActivityInActivityListRule");
}
