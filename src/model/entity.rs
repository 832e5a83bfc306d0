//! Models of a specification version
//!
//! A model is immutable once built. Unknown types get a synthesized model
//! without a specification: structural checks still run against it, schema
//! checks do not.

use std::collections::{BTreeMap, BTreeSet};

use super::definition::ModelDefinition;
use super::errors::{SpecError, SpecResult};
use super::field::Field;

/// Keyword aliases every model carries
const DEFAULT_ALIASES: [(&str, &str); 2] = [("@type", "type"), ("@id", "id")];

/// A group of alternative fields, at least one of which must be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredOption {
    pub description: Option<String>,
    pub options: Vec<String>,
}

/// A model of a specification version
#[derive(Debug, Clone)]
pub struct Model {
    type_name: Option<String>,
    version: String,
    fields: BTreeMap<String, Field>,
    required_fields: Vec<String>,
    recommended_fields: Vec<String>,
    required_options: Vec<RequiredOption>,
    not_in_spec: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
    common_typos: BTreeMap<String, String>,
    derived_from: Option<String>,
    is_json_ld: bool,
    has_specification: bool,
}

fn default_aliases() -> BTreeMap<String, String> {
    DEFAULT_ALIASES
        .iter()
        .map(|(alias, field)| (alias.to_string(), field.to_string()))
        .collect()
}

impl Model {
    /// Build a model from its raw definition
    ///
    /// Every field named by the required, recommended, option and typo lists
    /// must be declared; a field may not be both declared and disallowed.
    pub fn from_definition(definition: ModelDefinition, version: &str) -> SpecResult<Self> {
        let location = format!("{}/{}", version, definition.type_name);
        if definition.type_name.trim().is_empty() {
            return Err(SpecError::malformed(location, "model type must not be empty"));
        }

        let mut fields = BTreeMap::new();
        for (name, field_definition) in &definition.fields {
            let field = Field::from_definition(name, field_definition)
                .map_err(|e| SpecError::malformed(&location, e.to_string()))?;
            fields.insert(name.clone(), field);
        }

        let undeclared = definition
            .required_fields
            .iter()
            .chain(definition.recommended_fields.iter())
            .chain(definition.required_options.iter().flat_map(|group| group.options.iter()))
            .chain(definition.common_typos.values())
            .chain(definition.aliases.values())
            .find(|name| !fields.contains_key(*name));
        if let Some(name) = undeclared {
            return Err(SpecError::malformed(
                location,
                format!("'{}' is referenced but not declared", name),
            ));
        }

        if let Some(name) = definition.not_in_spec.iter().find(|name| fields.contains_key(*name)) {
            return Err(SpecError::malformed(
                location,
                format!("'{}' is both declared and disallowed", name),
            ));
        }

        if definition.required_options.iter().any(|group| group.options.is_empty()) {
            return Err(SpecError::malformed(location, "required option group is empty"));
        }

        let mut aliases = default_aliases();
        aliases.extend(definition.aliases);

        Ok(Self {
            type_name: Some(definition.type_name),
            version: version.to_string(),
            fields,
            required_fields: definition.required_fields,
            recommended_fields: definition.recommended_fields,
            required_options: definition
                .required_options
                .into_iter()
                .map(|group| RequiredOption {
                    description: group.description,
                    options: group.options,
                })
                .collect(),
            not_in_spec: definition.not_in_spec.into_iter().collect(),
            aliases,
            common_typos: definition.common_typos,
            derived_from: definition.derived_from,
            is_json_ld: definition.is_json_ld,
            has_specification: true,
        })
    }

    /// Synthesize a model for a type without a specification
    pub fn unknown(type_name: Option<String>, version: &str) -> Self {
        Self {
            type_name,
            version: version.to_string(),
            fields: BTreeMap::new(),
            required_fields: Vec::new(),
            recommended_fields: Vec::new(),
            required_options: Vec::new(),
            not_in_spec: BTreeSet::new(),
            aliases: default_aliases(),
            common_typos: BTreeMap::new(),
            derived_from: None,
            is_json_ld: true,
            has_specification: false,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether a specification backs this model
    pub fn has_specification(&self) -> bool {
        self.has_specification
    }

    pub fn is_json_ld(&self) -> bool {
        self.is_json_ld
    }

    /// Superclass IRI in the parent vocabulary
    pub fn derived_from(&self) -> Option<&str> {
        self.derived_from.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn has_field_in_spec(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether the field is explicitly disallowed
    pub fn has_field_not_in_spec(&self, name: &str) -> bool {
        self.not_in_spec.contains(name)
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn recommended_fields(&self) -> &[String] {
        &self.recommended_fields
    }

    pub fn required_options(&self) -> &[RequiredOption] {
        &self.required_options
    }

    /// Canonical field an alias stands for
    pub fn alias_target(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }

    /// Field a known misspelling was meant to be
    pub fn common_typo(&self, key: &str) -> Option<&str> {
        self.common_typos.get(key).map(String::as_str)
    }
}
