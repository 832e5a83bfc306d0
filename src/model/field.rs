//! Field definitions
//!
//! A field owns its permitted semantic types. Detection of a raw value's type
//! is structural and does not look at the declared types.

use serde_json::Value;

use super::definition::FieldDefinition;
use super::errors::{SpecError, SpecResult};
use super::types::{detect_type, DetectedType, SemanticType};

/// A field of a model
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    types: Vec<SemanticType>,
    options: Option<Vec<Value>>,
    same_as: Option<String>,
}

impl Field {
    /// Create a field accepting the given types
    pub fn new(name: impl Into<String>, types: Vec<SemanticType>) -> Self {
        Self {
            name: name.into(),
            types,
            options: None,
            same_as: None,
        }
    }

    /// Build from a raw definition
    pub fn from_definition(name: &str, definition: &FieldDefinition) -> SpecResult<Self> {
        if let Some(declared) = &definition.field_name {
            if declared != name {
                return Err(SpecError::malformed(
                    name,
                    format!("fieldName '{}' does not match its key", declared),
                ));
            }
        }
        Ok(Self {
            name: name.to_string(),
            types: definition.declared_types(),
            options: definition.options.clone(),
            same_as: definition.same_as.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared types, in definition order
    pub fn types(&self) -> &[SemanticType] {
        &self.types
    }

    /// Allowed values, if the field is restricted
    pub fn options(&self) -> Option<&[Value]> {
        self.options.as_deref()
    }

    pub fn same_as(&self) -> Option<&str> {
        self.same_as.as_deref()
    }

    /// Declared types with array wrappers stripped, deduplicated, in order
    pub fn all_possible_types(&self) -> Vec<SemanticType> {
        let mut flattened: Vec<SemanticType> = Vec::with_capacity(self.types.len());
        for ty in &self.types {
            let element = ty.element();
            if !flattened.contains(element) {
                flattened.push(element.clone());
            }
        }
        flattened
    }

    /// Whether the flattened type set is exactly `{candidate}`
    pub fn is_only_type(&self, candidate: &SemanticType) -> bool {
        let flattened = self.all_possible_types();
        flattened.len() == 1 && &flattened[0] == candidate
    }

    /// The model name when the flattened type set is exactly one model
    pub fn single_model(&self) -> Option<&str> {
        let mut models = self.types.iter().filter_map(SemanticType::model_name);
        let first = models.next()?;
        let all_same = models.all(|name| name == first);
        let only_models = self.types.iter().all(|ty| ty.model_name().is_some());
        (all_same && only_models).then_some(first)
    }

    /// Structural classification of a value
    pub fn detect_type(&self, value: &Value) -> DetectedType {
        detect_type(value)
    }

    /// Whether any declared type accepts `value`
    ///
    /// A field without declared types accepts anything.
    pub fn accepts(&self, value: &Value) -> bool {
        self.types.is_empty() || self.types.iter().any(|ty| ty.accepts(value))
    }

    /// Declared types rendered for messages
    pub fn describe_types(&self) -> String {
        self.types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
