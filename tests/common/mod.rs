//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use ldcheck::{
    DirectorySpecificationStore, ModelRegistry, StaticLoader, ValidationError, ValidationOptions,
    Validator,
};
use serde_json::{json, Value};

pub const ACTIVITY_LIST: &str = "https://openactive.io/activity-list";

pub fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/spec")
}

pub fn fixture_registry() -> Arc<ModelRegistry> {
    Arc::new(ModelRegistry::new(DirectorySpecificationStore::new(fixture_root())))
}

pub fn activity_list() -> Value {
    json!({
        "@context": "https://openactive.io/",
        "id": ACTIVITY_LIST,
        "type": "ConceptScheme",
        "concept": [
            {
                "id": "https://openactive.io/activity-list#c16df6ed-a4a0-4275-a8c3-1c8cff56856f",
                "type": "Concept",
                "prefLabel": "Tai Chi"
            },
            {
                "id": "https://openactive.io/activity-list#bf1a5e00-cdcf-465d-8c5a-6f57040b7f7e",
                "type": "Concept",
                "prefLabel": "Yoga"
            }
        ]
    })
}

/// Validator with the built-in rules and the activity list available
pub fn validator() -> Validator {
    Validator::new(fixture_registry())
        .with_loader(StaticLoader::new().with_document(ACTIVITY_LIST, activity_list()))
}

pub fn online() -> ValidationOptions {
    ValidationOptions::default().with_remote_json(true)
}

/// An Event that passes every built-in rule
pub fn conformant_event() -> Value {
    json!({
        "@context": "https://openactive.io/",
        "type": "Event",
        "id": "https://example.org/events/1",
        "name": "Tai chi Class",
        "description": "A Tai chi class",
        "url": "https://example.org/events/1",
        "startDate": "2018-03-22T20:00:00Z",
        "endDate": "2018-03-22T21:00:00Z",
        "duration": "PT1H",
        "location": {
            "type": "Place",
            "name": "Village Hall",
            "geo": {
                "type": "GeoCoordinates",
                "latitude": 51.5072,
                "longitude": -0.1276
            }
        },
        "ageRange": {
            "type": "QuantitativeValue",
            "minValue": 18,
            "maxValue": 60
        },
        "activity": [
            {
                "type": "Concept",
                "id": "https://openactive.io/activity-list#c16df6ed-a4a0-4275-a8c3-1c8cff56856f",
                "prefLabel": "Tai Chi",
                "inScheme": ACTIVITY_LIST
            }
        ],
        "organizer": {
            "type": "Organization",
            "name": "Example Leisure",
            "url": "https://example.org"
        },
        "eventStatus": "https://schema.org/EventScheduled"
    })
}

/// Replace or remove top-level keys of an object
pub fn with_changes(mut document: Value, set: &[(&str, Value)], remove: &[&str]) -> Value {
    if let Some(map) = document.as_object_mut() {
        for key in remove {
            map.shift_remove(*key);
        }
        for (key, value) in set {
            map.insert(key.to_string(), value.clone());
        }
    }
    document
}

/// `(path, type)` of every finding, in order
pub fn located(errors: &[ValidationError]) -> Vec<(String, &'static str)> {
    errors
        .iter()
        .map(|error| (error.path.clone(), error.error_type.as_str()))
        .collect()
}
