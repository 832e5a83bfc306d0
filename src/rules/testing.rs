//! Shared fixtures for rule unit tests

use std::sync::Arc;

use serde_json::{json, Value};

use super::{Rule, RuleSet};
use crate::errors::ValidationError;
use crate::loader::JsonLoader;
use crate::model::{InMemorySpecificationStore, MetaData, ModelDefinition, ModelRegistry};
use crate::options::ValidationOptions;
use crate::validator::Validator;

const TEXT: &str = "https://schema.org/Text";
const URL: &str = "https://schema.org/URL";

pub fn metadata() -> MetaData {
    serde_json::from_value(json!({
        "contextUrl": "https://openactive.io/",
        "namespaces": {
            "oa": "https://openactive.io/",
            "schema": "https://schema.org/",
            "beta": "https://openactive.io/ns-beta#"
        },
        "vocabularyPrefix": "oa"
    }))
    .unwrap()
}

fn definitions() -> Vec<Value> {
    vec![
        json!({
            "type": "Event",
            "derivedFrom": "https://schema.org/Event",
            "fields": {
                "type": {"requiredType": TEXT},
                "id": {"requiredType": URL},
                "name": {"requiredType": TEXT},
                "description": {"requiredType": TEXT},
                "url": {"requiredType": URL},
                "startDate": {"requiredType": "https://schema.org/DateTime"},
                "endDate": {"requiredType": "https://schema.org/DateTime"},
                "duration": {"requiredType": "https://schema.org/Duration"},
                "maximumAttendeeCapacity": {"requiredType": "https://schema.org/Integer"},
                "eventStatus": {
                    "requiredType": URL,
                    "options": [
                        "https://schema.org/EventScheduled",
                        "https://schema.org/EventCancelled"
                    ]
                },
                "location": {"model": "#Place"},
                "ageRange": {"model": "#QuantitativeValue"},
                "activity": {"model": "ArrayOf#Concept"},
                "eventSchedule": {"model": "ArrayOf#Schedule"},
                "offers": {"model": "ArrayOf#Offer"},
                "subEvent": {"model": "ArrayOf#Event"}
            },
            "requiredFields": ["type", "name"],
            "recommendedFields": ["description"],
            "requiredOptions": [
                {"description": "An Event must have a startDate or an eventSchedule.", "options": ["startDate", "eventSchedule"]}
            ],
            "notInSpec": ["attendeeInstructions"],
            "commonTypos": {"offer": "offers"}
        }),
        json!({
            "type": "Place",
            "fields": {
                "type": {"requiredType": TEXT},
                "name": {"requiredType": TEXT},
                "geo": {"model": "#GeoCoordinates"}
            },
            "requiredFields": ["type"]
        }),
        json!({
            "type": "GeoCoordinates",
            "fields": {
                "type": {"requiredType": TEXT},
                "latitude": {"requiredType": "https://schema.org/Number"},
                "longitude": {"requiredType": "https://schema.org/Number"}
            },
            "requiredFields": ["latitude", "longitude"]
        }),
        json!({
            "type": "QuantitativeValue",
            "fields": {
                "type": {"requiredType": TEXT},
                "minValue": {"requiredType": "https://schema.org/Integer"},
                "maxValue": {"requiredType": "https://schema.org/Integer"}
            }
        }),
        json!({
            "type": "Concept",
            "fields": {
                "type": {"requiredType": TEXT},
                "id": {"requiredType": URL},
                "inScheme": {"requiredType": URL},
                "prefLabel": {"requiredType": TEXT}
            }
        }),
        json!({
            "type": "Schedule",
            "fields": {
                "type": {"requiredType": TEXT},
                "startDate": {"requiredType": "https://schema.org/Date"},
                "startTime": {"requiredType": "https://schema.org/Time"},
                "repeatFrequency": {"requiredType": "https://schema.org/Duration"}
            }
        }),
        json!({
            "type": "Offer",
            "isJsonLd": true,
            "fields": {
                "type": {"requiredType": TEXT},
                "price": {"requiredType": "https://schema.org/Number"}
            }
        }),
    ]
}

pub fn registry() -> Arc<ModelRegistry> {
    let mut store = InMemorySpecificationStore::new().with_version("latest", metadata());
    for definition in definitions() {
        let definition: ModelDefinition = serde_json::from_value(definition).unwrap();
        store = store.with_model("latest", definition).unwrap();
    }
    Arc::new(ModelRegistry::new(store))
}

/// Validate `document` with `rule` alone
pub fn run(rule: impl Rule + 'static, document: Value) -> Vec<ValidationError> {
    run_with(rule, document, &ValidationOptions::default())
}

pub fn run_with(
    rule: impl Rule + 'static,
    document: Value,
    options: &ValidationOptions,
) -> Vec<ValidationError> {
    Validator::new(registry())
        .with_rules(RuleSet::new().with(rule))
        .validate(&document, options)
}

pub fn run_with_loader(
    rule: impl Rule + 'static,
    document: Value,
    options: &ValidationOptions,
    loader: impl JsonLoader + 'static,
) -> Vec<ValidationError> {
    Validator::new(registry())
        .with_loader(loader)
        .with_rules(RuleSet::new().with(rule))
        .validate(&document, options)
}

/// `(path, type)` of every finding, in order
pub fn located(errors: &[ValidationError]) -> Vec<(String, &'static str)> {
    errors
        .iter()
        .map(|error| (error.path.clone(), error.error_type.as_str()))
        .collect()
}
