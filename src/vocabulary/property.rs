//! Property resolution
//!
//! Resolution order for a key:
//! 1. `@keyword` resolves like the bare field it aliases
//! 2. `prefix:local` resolves against the known-namespace table
//! 3. absolute IRI matches the longest known namespace
//! 4. bare key belongs to the vocabulary of the specification
//!
//! An unresolved key has neither prefix nor namespace.

use serde_json::Value;

use super::context::context_namespaces;
use super::{iri_key, is_absolute_iri};
use crate::model::{MetaData, Model};

/// Spelling of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyForm {
    /// `@type`
    Keyword,
    /// `schema:name`
    Compact,
    /// `https://schema.org/name`
    Absolute,
    /// `name`
    Bare,
}

/// A resolved property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub form: PropertyForm,
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    /// Local name within the namespace
    pub name: String,
}

impl Property {
    /// Whether a namespace was found for the key
    pub fn is_resolved(&self) -> bool {
        self.namespace.is_some()
    }

    /// Whether the namespace is one of the registry's own
    pub fn is_registry(&self, metadata: &MetaData) -> bool {
        self.prefix
            .as_deref()
            .is_some_and(|prefix| metadata.is_registry_prefix(prefix))
    }

    /// Full IRI of the property
    pub fn iri(&self) -> Option<String> {
        self.namespace
            .as_ref()
            .map(|namespace| format!("{}{}", namespace, self.name))
    }
}

/// Known namespaces: registry prefixes first, then context-declared ones
#[derive(Debug, Clone, Default)]
pub struct Namespaces {
    entries: Vec<(String, String)>,
}

impl Namespaces {
    pub fn new(metadata: &MetaData) -> Self {
        Self {
            entries: metadata
                .namespaces
                .iter()
                .map(|(prefix, iri)| (prefix.clone(), iri.clone()))
                .collect(),
        }
    }

    /// Add the prefixes declared by context documents
    ///
    /// A context cannot redefine a registry prefix.
    pub fn with_contexts(mut self, contexts: &[Value]) -> Self {
        for document in contexts {
            for (prefix, iri) in context_namespaces(document) {
                if self.namespace(&prefix).is_none() {
                    self.entries.push((prefix, iri));
                }
            }
        }
        self
    }

    /// Namespace IRI for a prefix
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, iri)| iri.as_str())
    }

    /// Longest namespace the IRI starts with, as `(prefix, namespace)`
    pub fn match_iri(&self, iri: &str) -> Option<(&str, &str)> {
        let key = iri_key(iri);
        self.entries
            .iter()
            .filter(|(_, namespace)| {
                let ns = iri_key(namespace);
                key.len() > ns.len() && key.starts_with(ns)
            })
            .max_by_key(|(_, namespace)| iri_key(namespace).len())
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }
}

/// Resolve a document key to a property
pub fn resolve_property(key: &str, metadata: &MetaData, contexts: &[Value]) -> Property {
    let namespaces = Namespaces::new(metadata).with_contexts(contexts);

    let vocabulary = |form: PropertyForm, name: &str| Property {
        form,
        prefix: Some(metadata.vocabulary_prefix.clone()),
        namespace: metadata.vocabulary_namespace().map(str::to_string),
        name: name.to_string(),
    };

    if let Some(keyword) = key.strip_prefix('@') {
        return vocabulary(PropertyForm::Keyword, keyword);
    }

    if is_absolute_iri(key) {
        return match namespaces.match_iri(key) {
            Some((prefix, namespace)) => Property {
                form: PropertyForm::Absolute,
                prefix: Some(prefix.to_string()),
                namespace: Some(namespace.to_string()),
                name: iri_key(key)[iri_key(namespace).len()..].to_string(),
            },
            None => Property {
                form: PropertyForm::Absolute,
                prefix: None,
                namespace: None,
                name: key
                    .rsplit(['/', '#'])
                    .next()
                    .unwrap_or(key)
                    .to_string(),
            },
        };
    }

    if let Some((prefix, local)) = key.split_once(':') {
        if !prefix.is_empty() && !local.is_empty() {
            let namespace = namespaces.namespace(prefix).map(str::to_string);
            return Property {
                form: PropertyForm::Compact,
                prefix: namespace.as_ref().map(|_| prefix.to_string()),
                namespace,
                name: local.to_string(),
            };
        }
    }

    vocabulary(PropertyForm::Bare, key)
}

/// Canonical field of `model` that `key` spells, if any
///
/// Checked in order: the key itself, the model's alias table, then a
/// registry-namespace spelling whose local name is a declared field.
/// On a specified model an alias counts only when its target is declared.
pub fn canonical_field(model: &Model, key: &str, metadata: &MetaData) -> Option<String> {
    if model.has_field_in_spec(key) {
        return Some(key.to_string());
    }
    if !model.has_specification() {
        return model.alias_target(key).map(str::to_string);
    }
    if let Some(target) = model.alias_target(key) {
        return model.has_field_in_spec(target).then(|| target.to_string());
    }

    let property = resolve_property(key, metadata, &[]);
    let aliasable = match property.form {
        PropertyForm::Keyword => true,
        PropertyForm::Compact | PropertyForm::Absolute => property.is_registry(metadata),
        PropertyForm::Bare => false,
    };
    (aliasable && model.has_field_in_spec(&property.name)).then_some(property.name)
}
