//! Document tree binder
//!
//! A `ModelNode` wraps one object of the document together with its bound
//! model and its path. Nodes are created fresh per run on the traversal's
//! stack; a child borrows its parent for upward lookups only.

pub mod path;
mod resolve;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::model::{Field, Model, Specification};
use crate::options::ValidationOptions;
use crate::vocabulary::canonical_field;

pub use resolve::{canonical_type_name, resolve_model, resolve_root_model};

/// One object of the document bound to its model
pub struct ModelNode<'a> {
    name: Option<&'a str>,
    index: Option<usize>,
    value: &'a Map<String, Value>,
    parent: Option<&'a ModelNode<'a>>,
    model: Arc<Model>,
    specification: &'a Specification,
    options: &'a ValidationOptions,
    path: String,
}

impl<'a> ModelNode<'a> {
    /// The document root
    pub fn root(
        value: &'a Map<String, Value>,
        model: Arc<Model>,
        specification: &'a Specification,
        options: &'a ValidationOptions,
    ) -> Self {
        Self {
            name: None,
            index: None,
            value,
            parent: None,
            model,
            specification,
            options,
            path: path::ROOT.to_string(),
        }
    }

    /// A node found under `parent.name`, or `parent.name[index]`
    pub fn child(
        parent: &'a ModelNode<'a>,
        name: &'a str,
        index: Option<usize>,
        value: &'a Map<String, Value>,
        model: Arc<Model>,
    ) -> Self {
        let mut node_path = parent.path.clone();
        path::push_field(&mut node_path, name);
        if let Some(index) = index {
            path::push_index(&mut node_path, index);
        }
        Self {
            name: Some(name),
            index,
            value,
            parent: Some(parent),
            model,
            specification: parent.specification,
            options: parent.options,
            path: node_path,
        }
    }

    /// Field name under the parent; `None` at the root
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    /// Array index when the node is an array element
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn value(&self) -> &'a Map<String, Value> {
        self.value
    }

    pub fn parent(&self) -> Option<&'a ModelNode<'a>> {
        self.parent
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn specification(&self) -> &'a Specification {
        self.specification
    }

    pub fn options(&self) -> &'a ValidationOptions {
        self.options
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Path of one of this node's fields
    pub fn path_to(&self, field: &str) -> String {
        path::field_path(&self.path, field)
    }

    /// Path of an element of one of this node's array fields
    pub fn path_to_index(&self, field: &str, index: usize) -> String {
        path::index_path(&self.path, field, index)
    }

    /// Direct value of a key
    pub fn get_value(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key)
    }

    /// Canonical field of the bound model a key spells
    pub fn canonical_field(&self, key: &str) -> Option<String> {
        canonical_field(&self.model, key, self.specification.metadata())
    }

    /// Field definition a key spells
    pub fn field_for(&self, key: &str) -> Option<&Field> {
        let canonical = self.canonical_field(key)?;
        self.model.field(&canonical)
    }

    /// Value of `field` under any of its spellings
    ///
    /// The direct key wins; otherwise the first key in document order that
    /// canonicalizes to `field`.
    pub fn get_value_with_inheritance(&self, field: &str) -> Option<&'a Value> {
        if let Some(value) = self.value.get(field) {
            return Some(value);
        }
        self.value
            .iter()
            .find(|(key, _)| self.canonical_field(key).as_deref() == Some(field))
            .map(|(_, value)| value)
    }

    /// Key under which `field` is present, under any spelling
    pub fn key_for(&self, field: &str) -> Option<&'a str> {
        if self.value.contains_key(field) {
            return self.value.get_key_value(field).map(|(key, _)| key.as_str());
        }
        self.value
            .keys()
            .find(|key| self.canonical_field(key).as_deref() == Some(field))
            .map(String::as_str)
    }

    /// Field definition this node sits under in its parent
    pub fn parent_field(&self) -> Option<&'a Field> {
        let parent = self.parent?;
        parent.field_for(self.name?)
    }
}

impl fmt::Debug for ModelNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelNode")
            .field("path", &self.path)
            .field("model", &self.model.type_name())
            .finish_non_exhaustive()
    }
}
