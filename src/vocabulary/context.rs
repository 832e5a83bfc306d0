//! JSON-LD context documents referenced from a document root

use serde_json::{json, Value};

use super::same_iri;
use crate::model::MetaData;

/// Prefix → namespace pairs declared by a context document
///
/// Reads the document's `@context` (an object or an array of objects) and
/// keeps every non-keyword term mapped to an IRI.
pub fn context_namespaces(document: &Value) -> Vec<(String, String)> {
    let mut namespaces = Vec::new();
    collect_terms(document.get("@context"), &mut namespaces);
    namespaces
}

fn collect_terms(context: Option<&Value>, namespaces: &mut Vec<(String, String)>) {
    match context {
        Some(Value::Object(map)) => {
            for (term, definition) in map {
                if term.starts_with('@') {
                    continue;
                }
                let iri = match definition {
                    Value::String(iri) => Some(iri.as_str()),
                    Value::Object(expanded) => expanded.get("@id").and_then(Value::as_str),
                    _ => None,
                };
                if let Some(iri) = iri.filter(|iri| iri.contains("://")) {
                    namespaces.push((term.clone(), iri.to_string()));
                }
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                collect_terms(Some(item), namespaces);
            }
        }
        _ => {}
    }
}

/// Context documents the root `@context` refers to
///
/// The registry's own context URL is skipped. Inline context objects are
/// wrapped as `{"@context": ...}` documents. Other URLs go through `fetch`;
/// a URL it cannot supply is omitted.
pub fn collect_contexts<F>(declared: Option<&Value>, metadata: &MetaData, mut fetch: F) -> Vec<Value>
where
    F: FnMut(&str) -> Option<Value>,
{
    let entries: Vec<&Value> = match declared {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
        None => return Vec::new(),
    };

    let mut contexts = Vec::new();
    for entry in entries {
        match entry {
            Value::String(url) if same_context_url(url, &metadata.context_url) => {}
            Value::String(url) => contexts.extend(fetch(url)),
            Value::Object(_) => contexts.push(json!({ "@context": entry })),
            _ => {}
        }
    }
    contexts
}

/// Context URLs compare scheme-insensitively and ignoring a trailing slash
pub(crate) fn same_context_url(a: &str, b: &str) -> bool {
    same_iri(a.trim_end_matches('/'), b.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> MetaData {
        serde_json::from_value(json!({
            "contextUrl": "https://openactive.io/",
            "vocabularyPrefix": "oa"
        }))
        .unwrap()
    }

    #[test]
    fn test_context_namespaces() {
        let document = json!({
            "@context": [
                {"ext": "https://example.org/ext#", "@vocab": "https://example.org/"},
                {"other": {"@id": "https://example.org/other/"}, "label": "not an iri"}
            ]
        });
        assert_eq!(
            context_namespaces(&document),
            vec![
                ("ext".to_string(), "https://example.org/ext#".to_string()),
                ("other".to_string(), "https://example.org/other/".to_string())
            ]
        );
    }

    #[test]
    fn test_registry_context_is_skipped() {
        let declared = json!("https://openactive.io/");
        let contexts = collect_contexts(Some(&declared), &metadata(), |_| {
            panic!("registry context must not be fetched")
        });
        assert!(contexts.is_empty());
    }

    #[test]
    fn test_inline_and_fetched_contexts() {
        let declared = json!([
            "http://openactive.io",
            {"ext": "https://example.org/ext#"},
            "https://example.org/beta.jsonld",
            "https://example.org/missing.jsonld"
        ]);
        let mut requested = Vec::new();
        let contexts = collect_contexts(Some(&declared), &metadata(), |url| {
            requested.push(url.to_string());
            (url == "https://example.org/beta.jsonld")
                .then(|| json!({"@context": {"beta": "https://example.org/beta#"}}))
        });

        assert_eq!(
            requested,
            vec!["https://example.org/beta.jsonld", "https://example.org/missing.jsonld"]
        );
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0], json!({"@context": {"ext": "https://example.org/ext#"}}));
    }

    #[test]
    fn test_no_context() {
        assert!(collect_contexts(None, &metadata(), |_| None).is_empty());
    }
}
