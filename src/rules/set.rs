//! Ordered rule registry and dispatch

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::context::RuleContext;
use super::errors::RuleResult;
use super::meta::RuleMeta;
use super::{core, data_quality, format, Capability, Rule};
use crate::errors::ValidationError;
use crate::node::{path, ModelNode};
use crate::observability::{log_event_with_fields, Event};

/// Rules in registration order
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalogue
    pub fn default_rules() -> Self {
        Self::new()
            .with(core::ContextInRootNodeRule::new())
            .with(core::ValidModelTypeRule::new())
            .with(core::RequiredFieldsRule::new())
            .with(core::RequiredOptionalFieldsRule::new())
            .with(core::RecommendedFieldsRule::new())
            .with(core::FieldsNotInModelRule::new())
            .with(core::NoPrefixOrNamespaceRule::new())
            .with(core::FieldsCorrectTypeRule::new())
            .with(core::NoEmptyValuesRule::new())
            .with(core::ValueInOptionsRule::new())
            .with(format::DateFormatRule::new())
            .with(format::DateTimeFormatRule::new())
            .with(format::TimeFormatRule::new())
            .with(format::DurationFormatRule::new())
            .with(data_quality::EndBeforeStartRule::new())
            .with(data_quality::DatesMustHaveDurationRule::new())
            .with(data_quality::NoZeroDurationRule::new())
            .with(data_quality::MaxLessThanMinRule::new())
            .with(data_quality::ConceptIdInSchemeRule::new())
            .with(data_quality::ActivityInActivityListRule::new())
    }

    /// Append a rule
    pub fn push(&mut self, rule: impl Rule + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a rule, builder style
    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.meta().name()).collect()
    }

    /// Run every document handler
    pub fn dispatch_document(&self, ctx: &RuleContext<'_>, out: &mut Vec<ValidationError>) {
        for rule in &self.rules {
            let meta = rule.meta();
            if meta.handles(Capability::Document) {
                collect(meta, path::ROOT, || rule.validate_document(ctx.document(), ctx), out);
            }
        }
    }

    /// Run every targeted model and field handler on one node
    pub fn dispatch_node(
        &self,
        node: &ModelNode<'_>,
        ctx: &RuleContext<'_>,
        out: &mut Vec<ValidationError>,
    ) {
        for rule in &self.rules {
            let meta = rule.meta();

            if meta.is_model_targeted(node.model()) {
                collect(meta, node.path(), || rule.validate_model(node, ctx), out);
            }

            if !meta.handles(Capability::Field) {
                continue;
            }
            for key in node.value().keys() {
                let canonical = if meta.target_fields().needs_canonical() {
                    node.canonical_field(key)
                } else {
                    None
                };
                if meta.is_field_targeted(node.model(), key, canonical.as_deref()) {
                    let path = node.path_to(key);
                    collect(meta, &path, || rule.validate_field(node, key, ctx), out);
                }
            }
        }
    }
}

/// Run one handler and append its findings, or log its fault and move on
///
/// A panicking handler is treated like one that returned `Err`.
fn collect(
    meta: &RuleMeta,
    path: &str,
    handler: impl FnOnce() -> RuleResult<Vec<ValidationError>>,
    out: &mut Vec<ValidationError>,
) {
    let result = match panic::catch_unwind(AssertUnwindSafe(handler)) {
        Ok(result) => result,
        Err(payload) => {
            let reason = format!("handler panicked: {}", panic_message(payload.as_ref()));
            log_event_with_fields(
                Event::RuleFault,
                &[("rule", meta.name()), ("path", path), ("reason", reason.as_str())],
            );
            return;
        }
    };
    match result {
        Ok(errors) => {
            out.extend(errors.into_iter().map(|mut error| {
                if error.rule.is_none() {
                    error.rule = Some(meta.name().to_string());
                }
                error
            }));
        }
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(
                Event::RuleFault,
                &[("rule", meta.name()), ("path", path), ("reason", reason.as_str())],
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string payload")
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
