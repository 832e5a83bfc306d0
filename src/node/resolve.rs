//! Model binding for document nodes

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::model::types::{detect_type, type_indicator};
use crate::model::{DetectedType, Field, MetaData, Model, Specification};
use crate::vocabulary::{resolve_property, PropertyForm};

/// Type name with a registry namespace stripped
///
/// `schema:Event` and `https://openactive.io/Event` become `Event`; names
/// in other namespaces are returned unchanged.
pub fn canonical_type_name(raw: &str, metadata: &MetaData) -> String {
    let property = resolve_property(raw, metadata, &[]);
    match property.form {
        PropertyForm::Compact | PropertyForm::Absolute if property.is_registry(metadata) => {
            property.name
        }
        _ => raw.to_string(),
    }
}

/// Model of an object found under `enclosing`
///
/// The object's own type indicator wins. Without one, a field whose only
/// type is a single model supplies it. Otherwise the model is unknown.
pub fn resolve_model(
    value: &Map<String, Value>,
    enclosing: Option<&Field>,
    specification: &Specification,
) -> Arc<Model> {
    if let Some(raw) = type_indicator(value) {
        let name = canonical_type_name(raw, specification.metadata());
        return specification.model_or_unknown(Some(&name));
    }
    if let Some(hinted) = enclosing.and_then(Field::single_model) {
        if let Some(model) = specification.model(hinted) {
            return model;
        }
    }
    specification.model_or_unknown(None)
}

/// Model of the document root
///
/// Tried in order: the expected type from the options, the document's type
/// indicator, structural detection.
pub fn resolve_root_model(
    document: &Map<String, Value>,
    type_hint: Option<&str>,
    specification: &Specification,
) -> Arc<Model> {
    if let Some(hint) = type_hint {
        let name = canonical_type_name(hint, specification.metadata());
        return specification.model_or_unknown(Some(&name));
    }
    if type_indicator(document).is_some() {
        return resolve_model(document, None, specification);
    }
    match detect_type(&Value::Object(document.clone())) {
        DetectedType::Model(name) => specification
            .model(&name)
            .unwrap_or_else(|| specification.model_or_unknown(None)),
        _ => specification.model_or_unknown(None),
    }
}
