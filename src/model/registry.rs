//! Versioned model registry
//!
//! Each specification version is built once, on first use, from the store and
//! then shared read-only as an `Arc<Specification>`. Concurrent first uses of
//! the same version may both build it; the first insert wins and every caller
//! ends up holding the same instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::definition::MetaData;
use super::entity::Model;
use super::errors::{SpecError, SpecResult};
use super::store::SpecificationStore;
use crate::observability::{log_event_with_fields, Event};

/// All models of one version, immutable after construction
#[derive(Debug)]
pub struct Specification {
    version: String,
    metadata: MetaData,
    models: HashMap<String, Arc<Model>>,
}

impl Specification {
    /// Build from already-constructed models
    pub fn new(version: impl Into<String>, metadata: MetaData, models: Vec<Model>) -> Self {
        let models = models
            .into_iter()
            .filter_map(|model| {
                let name = model.type_name()?.to_string();
                Some((name, Arc::new(model)))
            })
            .collect();
        Self {
            version: version.into(),
            metadata,
            models,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn metadata(&self) -> &MetaData {
        &self.metadata
    }

    /// Registered model by exact type name
    pub fn model(&self, type_name: &str) -> Option<Arc<Model>> {
        self.models.get(type_name).cloned()
    }

    /// Registered model, or an unknown model carrying the name
    pub fn model_or_unknown(&self, type_name: Option<&str>) -> Arc<Model> {
        type_name
            .and_then(|name| self.model(name))
            .unwrap_or_else(|| {
                Arc::new(Model::unknown(type_name.map(str::to_string), &self.version))
            })
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Registered type names, sorted
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Memoizing registry over a specification store
pub struct ModelRegistry {
    store: Arc<dyn SpecificationStore>,
    loaded: RwLock<HashMap<String, Arc<Specification>>>,
}

impl ModelRegistry {
    pub fn new(store: impl SpecificationStore + 'static) -> Self {
        Self::from_store(Arc::new(store))
    }

    pub fn from_store(store: Arc<dyn SpecificationStore>) -> Self {
        Self {
            store,
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// The specification for `version`, built on first use
    pub fn specification(&self, version: &str) -> SpecResult<Arc<Specification>> {
        let resolved = self.store.resolve_version(version)?;

        {
            let loaded = self.loaded.read().map_err(|_| SpecError::LockPoisoned)?;
            if let Some(spec) = loaded.get(&resolved) {
                return Ok(Arc::clone(spec));
            }
        }

        let spec = Arc::new(self.build(&resolved)?);

        let mut loaded = self.loaded.write().map_err(|_| SpecError::LockPoisoned)?;
        let entry = loaded.entry(resolved.clone()).or_insert_with(|| {
            let count = spec.model_count().to_string();
            log_event_with_fields(
                Event::SpecificationLoaded,
                &[("version", resolved.as_str()), ("models", count.as_str())],
            );
            spec
        });
        Ok(Arc::clone(entry))
    }

    /// Versions built so far, sorted
    pub fn loaded_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = match self.loaded.read() {
            Ok(loaded) => loaded.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        versions.sort();
        versions
    }

    fn build(&self, version: &str) -> SpecResult<Specification> {
        let metadata = self.store.metadata(version)?;
        let mut models = Vec::new();
        for name in self.store.model_names(version)? {
            let definition = self.store.model_definition(version, &name)?;
            models.push(Model::from_definition(definition, version)?);
        }
        Ok(Specification::new(version, metadata, models))
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("loaded_versions", &self.loaded_versions())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::definition::ModelDefinition;
    use crate::model::store::InMemorySpecificationStore;
    use serde_json::json;
    use std::thread;

    fn store() -> InMemorySpecificationStore {
        let metadata: MetaData = serde_json::from_value(json!({
            "contextUrl": "https://example.org/ns/",
            "namespaces": {"ex": "https://example.org/ns/"},
            "vocabularyPrefix": "ex"
        }))
        .unwrap();
        let thing: ModelDefinition = serde_json::from_value(json!({
            "type": "Thing",
            "fields": {"name": {"requiredType": "https://schema.org/Text"}}
        }))
        .unwrap();
        InMemorySpecificationStore::new()
            .with_version("1.0", metadata)
            .with_model("1.0", thing)
            .unwrap()
    }

    #[test]
    fn test_specification_is_memoized() {
        let registry = ModelRegistry::new(store());
        let first = registry.specification("latest").unwrap();
        let second = registry.specification("1.0").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.loaded_versions(), vec!["1.0"]);
    }

    #[test]
    fn test_model_lookup() {
        let registry = ModelRegistry::new(store());
        let spec = registry.specification("1.0").unwrap();
        assert!(spec.model("Thing").unwrap().has_specification());
        assert!(spec.model("Other").is_none());

        let unknown = spec.model_or_unknown(Some("Other"));
        assert!(!unknown.has_specification());
        assert_eq!(unknown.type_name(), Some("Other"));
        assert_eq!(spec.model_names(), vec!["Thing"]);
    }

    #[test]
    fn test_unknown_version() {
        let registry = ModelRegistry::new(store());
        assert!(registry.specification("9.9").unwrap_err().is_unknown_version());
        assert!(registry.loaded_versions().is_empty());
    }

    #[test]
    fn test_concurrent_first_use_shares_one_instance() {
        let registry = Arc::new(ModelRegistry::new(store()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.specification("1.0").unwrap())
            })
            .collect();
        let specs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = registry.specification("1.0").unwrap();
        assert!(specs.iter().all(|spec| Arc::ptr_eq(spec, &stored)));
    }
}
