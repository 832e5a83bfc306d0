//! On-disk specification format
//!
//! One `meta.json` per version plus one JSON document per model. These are
//! raw serde shapes; `Model::from_definition` checks and converts them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::SemanticType;

fn default_true() -> bool {
    true
}

/// Version-wide metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    /// Context URL documents of this version should reference
    pub context_url: String,
    /// Registry namespaces: prefix → namespace IRI
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
    /// Prefix of the vocabulary bare keys belong to
    pub vocabulary_prefix: String,
}

impl MetaData {
    /// Namespace IRI of the vocabulary bare keys belong to
    pub fn vocabulary_namespace(&self) -> Option<&str> {
        self.namespace(&self.vocabulary_prefix)
    }

    /// Namespace IRI registered for `prefix`
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    /// Whether `prefix` is a registry namespace
    pub fn is_registry_prefix(&self, prefix: &str) -> bool {
        self.namespaces.contains_key(prefix)
    }
}

/// A group of alternative fields, at least one of which must be present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredOptionDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<String>,
}

/// One field of a model definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_type: Option<SemanticType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<SemanticType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_types: Vec<SemanticType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_models: Vec<SemanticType>,
    /// Allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_as: Option<String>,
}

impl FieldDefinition {
    /// Declared types in definition order
    pub fn declared_types(&self) -> Vec<SemanticType> {
        self.required_type
            .iter()
            .chain(self.model.iter())
            .chain(self.alternative_types.iter())
            .chain(self.alternative_models.iter())
            .cloned()
            .collect()
    }
}

/// One model of a specification version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    #[serde(rename = "type")]
    pub type_name: String,
    /// Superclass IRI in the parent vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(default = "default_true")]
    pub is_json_ld: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub recommended_fields: Vec<String>,
    #[serde(default)]
    pub required_options: Vec<RequiredOptionDefinition>,
    /// Fields explicitly disallowed on this model
    #[serde(default)]
    pub not_in_spec: Vec<String>,
    /// Alias → canonical field
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Typo → intended field
    #[serde(default)]
    pub common_typos: BTreeMap<String, String>,
}
