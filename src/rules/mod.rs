//! Rule contract and dispatch
//!
//! A rule declares its capabilities and targets up front; the dispatcher
//! decides which handlers run from those declarations alone.
//!
//! Per visited node, in registration order, each rule runs:
//! 1. its model handler, when it has the Model capability and targets the
//!    node's model
//! 2. its field handler for every targeted key, in document order
//!
//! Document handlers run once per run, before the tree.

pub mod core;
pub mod data_quality;
pub mod format;

mod context;
mod errors;
mod meta;
mod set;

#[cfg(test)]
pub(crate) mod testing;

use serde_json::{Map, Value};

use crate::errors::ValidationError;
use crate::model::Model;
use crate::node::ModelNode;

pub use context::RuleContext;
pub use errors::{RuleError, RuleResult};
pub use meta::{render_template, RuleMeta, TestDefinition};
pub use set::RuleSet;

/// Handler kinds a rule can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Runs once per targeted node
    Model,
    /// Runs once per targeted key of a node
    Field,
    /// Runs once per document, before the tree
    Document,
}

/// Models a rule's model handler applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetModels {
    All,
    Only(Vec<String>),
}

impl TargetModels {
    pub fn only(names: &[&str]) -> Self {
        TargetModels::Only(names.iter().map(|name| name.to_string()).collect())
    }

    pub fn matches(&self, model: &Model) -> bool {
        match self {
            TargetModels::All => true,
            TargetModels::Only(names) => model
                .type_name()
                .is_some_and(|type_name| names.iter().any(|name| name == type_name)),
        }
    }
}

/// Fields of one model a rule's field handler applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    All,
    Only(Vec<String>),
}

/// Fields a rule's field handler applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFields {
    None,
    All,
    /// Ordered per-model selections
    PerModel(Vec<(String, FieldSelection)>),
}

impl TargetFields {
    /// Per-model selection of listed fields
    pub fn per_model(entries: &[(&str, &[&str])]) -> Self {
        TargetFields::PerModel(
            entries
                .iter()
                .map(|(model, fields)| {
                    let selection = if fields.contains(&"*") {
                        FieldSelection::All
                    } else {
                        FieldSelection::Only(fields.iter().map(|f| f.to_string()).collect())
                    };
                    (model.to_string(), selection)
                })
                .collect(),
        )
    }

    /// Whether `key` (or the canonical field it spells) is targeted on `model`
    pub fn matches(&self, model: &Model, key: &str, canonical: Option<&str>) -> bool {
        match self {
            TargetFields::None => false,
            TargetFields::All => true,
            TargetFields::PerModel(entries) => {
                let Some(type_name) = model.type_name() else {
                    return false;
                };
                entries
                    .iter()
                    .filter(|(name, _)| name == type_name)
                    .any(|(_, selection)| match selection {
                        FieldSelection::All => true,
                        FieldSelection::Only(fields) => fields
                            .iter()
                            .any(|field| field == key || Some(field.as_str()) == canonical),
                    })
            }
        }
    }

    /// Whether matching needs the canonical field of a key
    pub fn needs_canonical(&self) -> bool {
        matches!(self, TargetFields::PerModel(_))
    }
}

/// A validation rule
///
/// Handlers default to reporting nothing; a rule overrides the ones matching
/// the capabilities it declares in its `RuleMeta`.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn validate_model(
        &self,
        _node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        Ok(Vec::new())
    }

    fn validate_field(
        &self,
        _node: &ModelNode<'_>,
        _field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        Ok(Vec::new())
    }

    fn validate_document(
        &self,
        _document: &Map<String, Value>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelDefinition;
    use serde_json::json;

    fn model(name: &str) -> Model {
        let def: ModelDefinition = serde_json::from_value(json!({"type": name})).unwrap();
        Model::from_definition(def, "latest").unwrap()
    }

    #[test]
    fn test_target_models() {
        let targets = TargetModels::only(&["QuantitativeValue"]);
        assert!(targets.matches(&model("QuantitativeValue")));
        assert!(!targets.matches(&model("Event")));
        assert!(!targets.matches(&Model::unknown(None, "latest")));
        assert!(TargetModels::All.matches(&Model::unknown(None, "latest")));
    }

    #[test]
    fn test_target_fields() {
        let targets = TargetFields::per_model(&[("Concept", &["id", "inScheme"]), ("Event", &["*"])]);
        let concept = model("Concept");
        assert!(targets.matches(&concept, "id", Some("id")));
        assert!(targets.matches(&concept, "@id", Some("id")));
        assert!(!targets.matches(&concept, "prefLabel", Some("prefLabel")));
        assert!(targets.matches(&model("Event"), "anything", None));
        assert!(!targets.matches(&model("Place"), "id", Some("id")));
        assert!(!TargetFields::None.matches(&concept, "id", Some("id")));
        assert!(TargetFields::All.matches(&concept, "id", None));
    }
}
