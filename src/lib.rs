//! ldcheck - Schema-aware validation of JSON-LD documents
//!
//! Documents are checked against a versioned, declarative specification and
//! produce an ordered list of typed, path-located findings.
//!
//! ```ignore
//! use std::sync::Arc;
//! use ldcheck::{DirectorySpecificationStore, ModelRegistry, ValidationOptions, Validator};
//!
//! let registry = Arc::new(ModelRegistry::new(DirectorySpecificationStore::new("spec")));
//! let errors = Validator::new(registry).validate(&document, &ValidationOptions::default());
//! ```

pub mod errors;
pub mod loader;
pub mod model;
pub mod node;
pub mod observability;
pub mod options;
pub mod rules;
pub mod validator;
pub mod vocabulary;

pub use errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
pub use loader::{JsonLoader, JsonResponse, LoaderErrorCode, NoRemoteLoader, StaticLoader};
pub use model::{
    DirectorySpecificationStore, InMemorySpecificationStore, Model, ModelRegistry, SpecError,
    SpecResult, Specification, SpecificationStore,
};
pub use node::ModelNode;
pub use options::{OptionsError, OptionsResult, ValidationOptions};
pub use rules::{Rule, RuleSet};
pub use validator::Validator;
