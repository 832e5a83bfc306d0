//! Specification stores
//!
//! A store hands out raw metadata and model definitions per version. The
//! registry turns them into immutable `Specification`s.
//!
//! On-disk layout of `DirectorySpecificationStore`:
//!
//! ```text
//! <root>/<version>/meta.json
//! <root>/<version>/models/<Type>.json
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::definition::{MetaData, ModelDefinition};
use super::errors::{SpecError, SpecResult};

/// Version name that resolves to the newest available version
pub const LATEST: &str = "latest";

/// Source of specification data
pub trait SpecificationStore: Send + Sync {
    /// Map a requested version (possibly "latest") to a concrete one
    fn resolve_version(&self, requested: &str) -> SpecResult<String>;

    /// Version-wide metadata
    fn metadata(&self, version: &str) -> SpecResult<MetaData>;

    /// Names of every model in the version, sorted
    fn model_names(&self, version: &str) -> SpecResult<Vec<String>>;

    /// Raw definition of one model
    fn model_definition(&self, version: &str, type_name: &str) -> SpecResult<ModelDefinition>;
}

// ==================
// In-memory store
// ==================

#[derive(Debug, Clone)]
struct StoredVersion {
    metadata: MetaData,
    models: BTreeMap<String, ModelDefinition>,
}

/// Store built programmatically
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecificationStore {
    versions: BTreeMap<String, StoredVersion>,
}

impl InMemorySpecificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version with its metadata
    pub fn with_version(mut self, version: impl Into<String>, metadata: MetaData) -> Self {
        self.versions.insert(
            version.into(),
            StoredVersion {
                metadata,
                models: BTreeMap::new(),
            },
        );
        self
    }

    /// Add a model definition to an existing version
    pub fn with_model(mut self, version: &str, definition: ModelDefinition) -> SpecResult<Self> {
        let stored = self
            .versions
            .get_mut(version)
            .ok_or_else(|| SpecError::UnknownVersion(version.to_string()))?;
        stored
            .models
            .insert(definition.type_name.clone(), definition);
        Ok(self)
    }

    fn stored(&self, version: &str) -> SpecResult<&StoredVersion> {
        self.versions
            .get(version)
            .ok_or_else(|| SpecError::UnknownVersion(version.to_string()))
    }
}

impl SpecificationStore for InMemorySpecificationStore {
    fn resolve_version(&self, requested: &str) -> SpecResult<String> {
        if self.versions.contains_key(requested) {
            return Ok(requested.to_string());
        }
        if requested == LATEST {
            return self
                .versions
                .keys()
                .next_back()
                .cloned()
                .ok_or_else(|| SpecError::NoVersions("<in-memory>".to_string()));
        }
        Err(SpecError::UnknownVersion(requested.to_string()))
    }

    fn metadata(&self, version: &str) -> SpecResult<MetaData> {
        Ok(self.stored(version)?.metadata.clone())
    }

    fn model_names(&self, version: &str) -> SpecResult<Vec<String>> {
        Ok(self.stored(version)?.models.keys().cloned().collect())
    }

    fn model_definition(&self, version: &str, type_name: &str) -> SpecResult<ModelDefinition> {
        self.stored(version)?
            .models
            .get(type_name)
            .cloned()
            .ok_or_else(|| SpecError::ModelNotFound {
                version: version.to_string(),
                type_name: type_name.to_string(),
            })
    }
}

// ==================
// Directory store
// ==================

/// Store reading JSON definitions from a directory tree
#[derive(Debug, Clone)]
pub struct DirectorySpecificationStore {
    root: PathBuf,
}

impl DirectorySpecificationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn version_dir(&self, version: &str) -> PathBuf {
        self.root.join(version)
    }

    fn models_dir(&self, version: &str) -> PathBuf {
        self.version_dir(version).join("models")
    }

    fn version_names(&self) -> SpecResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|source| SpecError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SpecError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                versions.push(name.to_string());
            }
        }
        versions.sort();
        Ok(versions)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> SpecResult<T> {
        let content = fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SpecError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })
    }
}

impl SpecificationStore for DirectorySpecificationStore {
    fn resolve_version(&self, requested: &str) -> SpecResult<String> {
        if self.version_dir(requested).is_dir() {
            return Ok(requested.to_string());
        }
        if requested == LATEST {
            return self
                .version_names()?
                .pop()
                .ok_or_else(|| SpecError::NoVersions(self.root.display().to_string()));
        }
        Err(SpecError::UnknownVersion(requested.to_string()))
    }

    fn metadata(&self, version: &str) -> SpecResult<MetaData> {
        Self::read_json(&self.version_dir(version).join("meta.json"))
    }

    fn model_names(&self, version: &str) -> SpecResult<Vec<String>> {
        let dir = self.models_dir(version);
        let entries = fs::read_dir(&dir).map_err(|source| SpecError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SpecError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn model_definition(&self, version: &str, type_name: &str) -> SpecResult<ModelDefinition> {
        let path = self.models_dir(version).join(format!("{}.json", type_name));
        if !path.is_file() {
            return Err(SpecError::ModelNotFound {
                version: version.to_string(),
                type_name: type_name.to_string(),
            });
        }
        let definition: ModelDefinition = Self::read_json(&path)?;
        if definition.type_name != type_name {
            return Err(SpecError::malformed(
                path.display().to_string(),
                format!("declares type '{}'", definition.type_name),
            ));
        }
        Ok(definition)
    }
}
