//! Root `@context` presence and reference check

use serde_json::{Map, Value};

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::path;
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};
use crate::vocabulary::same_context_url;

const CONTEXT: &str = "@context";

/// Checks the root object declares a `@context` referencing the specification
pub struct ContextInRootNodeRule {
    meta: RuleMeta,
}

impl ContextInRootNodeRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "ContextInRootNodeRule",
            "Validates that the root object has a @context referencing the specification.",
        )
        .with_capability(Capability::Document)
        .with_test(
            "missing",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::MissingRequiredField,
                "The root object must have a `@context` property referencing `{{contextUrl}}`.",
            ),
        )
        .with_test(
            "noSpecContext",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::InvalidFormat,
                "The `@context` should include `{{contextUrl}}`.",
            ),
        )
        .with_test(
            "invalidEntry",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::InvalidType,
                "Entries of `@context` must be URLs or objects.",
            ),
        );
        Self { meta }
    }
}

impl Default for ContextInRootNodeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ContextInRootNodeRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_document(
        &self,
        document: &Map<String, Value>,
        ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        if !ctx.root_model().is_json_ld() {
            return Ok(Vec::new());
        }

        let context_url = ctx.metadata().context_url.as_str();
        let context_path = path::field_path(path::ROOT, CONTEXT);
        let values = [("contextUrl", context_url)];

        let Some(declared) = document.get(CONTEXT) else {
            return Ok(vec![self.meta.create_error("missing", None, context_path, &values)?]);
        };

        let entries: Vec<(Option<usize>, &Value)> = match declared {
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (Some(i), v)).collect(),
            other => vec![(None, other)],
        };

        let mut errors = Vec::new();
        let mut references_spec = false;
        for (index, entry) in entries {
            match entry {
                Value::String(url) => references_spec |= same_context_url(url, context_url),
                Value::Object(_) => {}
                _ => {
                    let entry_path = match index {
                        Some(i) => path::index_path(path::ROOT, CONTEXT, i),
                        None => context_path.clone(),
                    };
                    errors.push(self.meta.create_error(
                        "invalidEntry",
                        Some(entry.clone()),
                        entry_path,
                        &values,
                    )?);
                }
            }
        }

        if !references_spec {
            errors.push(self.meta.create_error(
                "noSpecContext",
                Some(declared.clone()),
                context_path,
                &values,
            )?);
        }
        Ok(errors)
    }
}
