//! Vocabulary and namespace resolution
//!
//! Maps the many spellings of one property (`name`, `schema:name`,
//! `https://schema.org/name`, `@type`) onto a `Property`, and answers
//! whether a vocabulary graph documents a property for a class.

mod context;
mod graph;
mod property;

pub use context::{collect_contexts, context_namespaces};
pub(crate) use context::same_context_url;
pub use graph::{expand_iri, graph_prefixes, is_property_in_class};
pub use property::{canonical_field, resolve_property, Namespaces, Property, PropertyForm};

/// Comparison key of an IRI; `http` and `https` spellings compare equal
pub(crate) fn iri_key(iri: &str) -> &str {
    iri.strip_prefix("https://")
        .or_else(|| iri.strip_prefix("http://"))
        .unwrap_or(iri)
}

/// Whether two IRIs name the same resource
pub fn same_iri(a: &str, b: &str) -> bool {
    iri_key(a) == iri_key(b)
}

/// Whether a key is an absolute IRI rather than a compact one
pub fn is_absolute_iri(key: &str) -> bool {
    key.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_iri_ignores_scheme() {
        assert!(same_iri("http://schema.org/name", "https://schema.org/name"));
        assert!(!same_iri("https://schema.org/name", "https://schema.org/names"));
    }

    #[test]
    fn test_is_absolute_iri() {
        assert!(is_absolute_iri("https://openactive.io/ageRange"));
        assert!(!is_absolute_iri("oa:ageRange"));
    }
}
