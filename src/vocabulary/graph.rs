//! Vocabulary graph walk
//!
//! A vocabulary graph is a JSON-LD document whose `@graph` (or the document
//! itself, when it is an array) lists class and property nodes. A property is
//! usable on a class when one of its domains is the class or any of the
//! class's transitive superclasses.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde_json::{Map, Value};

use super::iri_key;

const SUBCLASS_PREDICATES: [&str; 1] = ["subClassOf"];
const DOMAIN_PREDICATES: [&str; 2] = ["domain", "domainIncludes"];

/// Prefixes declared in the graph's own `@context`
pub fn graph_prefixes(graph: &Value) -> BTreeMap<String, String> {
    let mut prefixes = BTreeMap::new();
    let context = graph.get("@context");
    let objects: Vec<&Map<String, Value>> = match context {
        Some(Value::Object(map)) => vec![map],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    };
    for map in objects {
        for (prefix, iri) in map {
            if prefix.starts_with('@') {
                continue;
            }
            let iri = match iri {
                Value::String(iri) => iri.as_str(),
                Value::Object(definition) => match definition.get("@id").and_then(Value::as_str) {
                    Some(iri) => iri,
                    None => continue,
                },
                _ => continue,
            };
            prefixes.insert(prefix.clone(), iri.to_string());
        }
    }
    prefixes
}

/// Expand a compact IRI using `prefixes`; anything else is returned as is
pub fn expand_iri(iri: &str, prefixes: &BTreeMap<String, String>) -> String {
    if !iri.contains("://") {
        if let Some((prefix, local)) = iri.split_once(':') {
            if let Some(namespace) = prefixes.get(prefix) {
                return format!("{}{}", namespace, local);
            }
        }
    }
    iri.to_string()
}

fn graph_nodes(graph: &Value) -> Vec<&Map<String, Value>> {
    let nodes = match graph {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("@graph") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    nodes.iter().filter_map(Value::as_object).collect()
}

fn node_id(node: &Map<String, Value>) -> Option<&str> {
    node.get("@id")
        .or_else(|| node.get("id"))
        .and_then(Value::as_str)
}

/// Local name of a predicate key: the part after the last `#`, `/` or `:`
fn predicate_name(key: &str) -> &str {
    key.rsplit(['#', '/', ':']).next().unwrap_or(key)
}

/// IRIs referenced by the node under any of the named predicates
fn edge_targets<'a>(node: &'a Map<String, Value>, predicates: &[&str]) -> Vec<&'a str> {
    let mut targets = Vec::new();
    for (key, value) in node {
        if !predicates.contains(&predicate_name(key)) {
            continue;
        }
        let items: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        for item in items {
            let target = match item {
                Value::String(iri) => Some(iri.as_str()),
                Value::Object(reference) => node_id(reference),
                _ => None,
            };
            targets.extend(target);
        }
    }
    targets
}

/// Whether the graph documents `property` as usable on `class`
///
/// Both arguments may be compact (expanded with the graph's prefixes) or
/// full IRIs. Cycles in the subclass chain are tolerated.
pub fn is_property_in_class(graph: &Value, property: &str, class: &str) -> bool {
    let prefixes = graph_prefixes(graph);
    let key = |iri: &str| iri_key(&expand_iri(iri, &prefixes)).to_string();

    let nodes = graph_nodes(graph);
    let mut by_id: HashMap<String, &Map<String, Value>> = HashMap::new();
    for node in nodes.iter().copied() {
        if let Some(id) = node_id(node) {
            by_id.entry(key(id)).or_insert(node);
        }
    }

    let Some(property_node) = by_id.get(&key(property)) else {
        return false;
    };
    let domains: HashSet<String> = edge_targets(property_node, &DOMAIN_PREDICATES)
        .into_iter()
        .map(&key)
        .collect();
    if domains.is_empty() {
        return false;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([key(class)]);
    while let Some(current) = queue.pop_front() {
        if domains.contains(&current) {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(node) = by_id.get(&current) {
            for parent in edge_targets(node, &SUBCLASS_PREDICATES) {
                let parent = key(parent);
                if !visited.contains(&parent) {
                    queue.push_back(parent);
                }
            }
        }
    }
    false
}
