//! Activity lookup against the activity list

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::loader::JsonResponse;
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};
use crate::vocabulary::same_iri;

/// Activity list used when an activity names no scheme
pub const DEFAULT_ACTIVITY_LIST: &str = "https://openactive.io/activity-list";

/// Keys under which an activity list carries its concepts
static CONCEPT_KEYS: [&str; 3] = ["concept", "concepts", "@graph"];

/// Checks activities are concepts of their activity list
pub struct ActivityInActivityListRule {
    meta: RuleMeta,
}

impl ActivityInActivityListRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "ActivityInActivityListRule",
            "Validates that an activity is in the activity list.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::per_model(&[
            ("Event", &["activity"]),
            ("SessionSeries", &["activity"]),
            ("ScheduledSession", &["activity"]),
            ("CourseInstance", &["activity"]),
        ]))
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::ActivityNotInActivityList,
                "Activity \"{{activity}}\" could not be found in the activity list \"{{list}}\".",
            ),
        )
        .with_test(
            "listUnavailable",
            TestDefinition::new(
                ValidationErrorCategory::Internal,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::FileNotFound,
                "Activity list \"{{list}}\" could not be loaded ({{code}}).",
            ),
        )
        .with_test(
            "notChecked",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Notice,
                ValidationErrorType::ActivityListNotChecked,
                "Remote loading is disabled, so activities were not checked against the activity list.",
            ),
        );
        Self { meta }
    }
}

impl Default for ActivityInActivityListRule {
    fn default() -> Self {
        Self::new()
    }
}

fn string_field<'v>(map: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v str> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_str))
}

/// Concepts listed by an activity list document
fn concepts(list: &Map<String, Value>) -> impl Iterator<Item = &Map<String, Value>> {
    CONCEPT_KEYS
        .iter()
        .filter_map(|key| list.get(*key).and_then(Value::as_array))
        .flatten()
        .filter_map(Value::as_object)
}

/// Whether `activity` names a concept of `list`, by id or by label
fn is_listed(activity: &Map<String, Value>, list: &Map<String, Value>) -> bool {
    let id = string_field(activity, &["id", "@id"]);
    let label = string_field(activity, &["prefLabel"]);

    concepts(list).any(|concept| {
        let id_match = id
            .zip(string_field(concept, &["id", "@id"]))
            .is_some_and(|(a, b)| same_iri(a, b));
        let label_match = label
            .zip(string_field(concept, &["prefLabel"]))
            .is_some_and(|(a, b)| a.to_lowercase() == b.to_lowercase());
        id_match || label_match
    })
}

impl Rule for ActivityInActivityListRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let activities: Vec<(String, &Map<String, Value>)> = match node.get_value(field) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| item.as_object().map(|a| (node.path_to_index(field, i), a)))
                .collect(),
            Some(Value::Object(activity)) => vec![(node.path_to(field), activity)],
            _ => Vec::new(),
        };
        if activities.is_empty() {
            return Ok(Vec::new());
        }

        if !ctx.options().load_remote_json {
            return Ok(vec![self.meta.create_error(
                "notChecked",
                None,
                node.path_to(field),
                &[],
            )?]);
        }

        let mut lists: HashMap<&str, JsonResponse> = HashMap::new();
        let mut errors = Vec::new();
        for (path, activity) in activities {
            let list_url = string_field(activity, &["inScheme"]).unwrap_or(DEFAULT_ACTIVITY_LIST);
            let response = lists
                .entry(list_url)
                .or_insert_with(|| ctx.fetch(list_url));
            let value = Some(Value::Object(activity.clone()));

            let Some(list) = response.object() else {
                let code = response
                    .status_code
                    .map(|status| status.to_string())
                    .unwrap_or_else(|| response.error_code.as_str().to_string());
                errors.push(self.meta.create_error(
                    "listUnavailable",
                    value,
                    path,
                    &[("list", list_url), ("code", code.as_str())],
                )?);
                continue;
            };

            if !is_listed(activity, list) {
                let identifier = string_field(activity, &["prefLabel", "id", "@id"]).unwrap_or_default();
                errors.push(self.meta.create_error(
                    "default",
                    value,
                    path,
                    &[("activity", identifier), ("list", list_url)],
                )?);
            }
        }
        Ok(errors)
    }
}
