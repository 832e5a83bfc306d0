//! Validation options
//!
//! Options are plain serde data so hosts can keep them in a JSON file next to
//! their other configuration. Keys are camelCase.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type for options operations
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors raised while loading options
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Options file could not be read
    #[error("Failed to read options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options file is not valid JSON for `ValidationOptions`
    #[error("Invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-run validation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Specification version to validate against (default: "latest")
    #[serde(default = "default_version")]
    pub version: String,

    /// Expected model of the root node
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    /// Whether rules may fetch remote documents through the loader (default: false)
    #[serde(default)]
    pub load_remote_json: bool,

    /// Pre-loaded superclass vocabulary graphs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_org_specifications: Vec<Value>,
}

fn default_version() -> String {
    "latest".to_string()
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            version: default_version(),
            type_hint: None,
            load_remote_json: false,
            schema_org_specifications: Vec::new(),
        }
    }
}

impl ValidationOptions {
    /// Load options from a JSON file
    pub fn load(path: &Path) -> OptionsResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse options from a JSON string
    pub fn from_json_str(contents: &str) -> OptionsResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Validate against a specific specification version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Expect the root node to be the given model
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_hint = Some(type_name.into());
        self
    }

    /// Allow or forbid remote fetches
    pub fn with_remote_json(mut self, enabled: bool) -> Self {
        self.load_remote_json = enabled;
        self
    }

    /// Add a pre-loaded superclass vocabulary graph
    pub fn with_schema_org_specification(mut self, graph: Value) -> Self {
        self.schema_org_specifications.push(graph);
        self
    }
}
