//! # Validation Orchestrator
//!
//! Entry point of a validation run:
//! 1. reject non-object input
//! 2. recognise paginated feed envelopes
//! 3. bind the root model, run document rules, then walk the tree
//!
//! A run never fails. Engine errors become findings or log records.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::loader::{JsonLoader, NoRemoteLoader};
use crate::model::types::is_value_object;
use crate::model::ModelRegistry;
use crate::node::{path, resolve_model, resolve_root_model, ModelNode};
use crate::observability::{log_event_with_fields, Event};
use crate::options::ValidationOptions;
use crate::rules::{RuleContext, RuleSet};

/// Validates documents against the specifications of a registry
pub struct Validator {
    registry: Arc<ModelRegistry>,
    loader: Arc<dyn JsonLoader>,
    rules: RuleSet,
}

impl Validator {
    /// A validator with the built-in rules and no remote loading
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self {
            registry,
            loader: Arc::new(NoRemoteLoader),
            rules: RuleSet::default_rules(),
        }
    }

    pub fn with_loader(mut self, loader: impl JsonLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate one document
    ///
    /// Findings are ordered: document-level first, then per node in
    /// pre-order, per rule in registration order.
    pub fn validate(&self, document: &Value, options: &ValidationOptions) -> Vec<ValidationError> {
        log_event_with_fields(Event::ValidationBegin, &[("version", options.version.as_str())]);
        let errors = self.run(document, options);
        let count = errors.len().to_string();
        log_event_with_fields(Event::ValidationComplete, &[("findings", count.as_str())]);
        errors
    }

    fn run(&self, document: &Value, options: &ValidationOptions) -> Vec<ValidationError> {
        let root = match document {
            Value::Object(map) => map,
            Value::Array(_) => {
                log_event_with_fields(Event::InputRejected, &[("shape", "array")]);
                return vec![ValidationError::invalid_json(
                    ValidationErrorSeverity::Warning,
                    "Arrays are not supported. Please validate each item of the array separately.",
                )];
            }
            _ => {
                log_event_with_fields(Event::InputRejected, &[("shape", "scalar")]);
                return vec![ValidationError::invalid_json(
                    ValidationErrorSeverity::Failure,
                    "The document must be a JSON object.",
                )];
            }
        };

        if is_feed(root) {
            log_event_with_fields(Event::FeedDetected, &[]);
            return vec![ValidationError::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorType::FoundRpdeFeed,
                ValidationErrorSeverity::Notice,
                path::ROOT,
            )
            .with_message(
                "This looks like a paginated feed. Please validate the items of the feed individually.",
            )];
        }

        let specification = match self.registry.specification(&options.version) {
            Ok(specification) => specification,
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::SpecificationLoadFailed,
                    &[("version", options.version.as_str()), ("reason", reason.as_str())],
                );
                return vec![ValidationError::new(
                    ValidationErrorCategory::Internal,
                    ValidationErrorType::FileNotFound,
                    ValidationErrorSeverity::Failure,
                    path::ROOT,
                )
                .with_message(format!(
                    "The specification for version \"{}\" could not be loaded: {}",
                    options.version, reason
                ))];
            }
        };

        let root_model = resolve_root_model(root, options.type_hint.as_deref(), &specification);
        let ctx = RuleContext::new(
            &specification,
            options,
            self.loader.as_ref(),
            root,
            Arc::clone(&root_model),
        );
        let root_node = ModelNode::root(root, root_model, &specification, options);

        let mut errors = Vec::new();
        self.rules.dispatch_document(&ctx, &mut errors);
        self.visit(&root_node, &ctx, &mut errors);
        errors
    }

    /// Pre-order walk: the node's rules, then its object children in key order
    fn visit(&self, node: &ModelNode<'_>, ctx: &RuleContext<'_>, errors: &mut Vec<ValidationError>) {
        self.rules.dispatch_node(node, ctx, errors);

        for (key, value) in node.value() {
            if key == "@context" {
                continue;
            }
            match value {
                Value::Object(map) if !is_value_object(map) => {
                    self.visit_child(node, key, None, map, ctx, errors);
                }
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if let Value::Object(map) = item {
                            if !is_value_object(map) {
                                self.visit_child(node, key, Some(index), map, ctx, errors);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_child(
        &self,
        parent: &ModelNode<'_>,
        key: &str,
        index: Option<usize>,
        value: &Map<String, Value>,
        ctx: &RuleContext<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        let model = resolve_model(value, parent.field_for(key), ctx.specification());
        let child = ModelNode::child(parent, key, index, value, model);
        self.visit(&child, ctx, errors);
    }
}

/// A paginated feed envelope: `items` array plus `next`
fn is_feed(root: &Map<String, Value>) -> bool {
    root.get("items").is_some_and(Value::is_array) && root.contains_key("next")
}
