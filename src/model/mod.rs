//! Model/Field registry
//!
//! Specification data is loaded, never computed: a `SpecificationStore`
//! supplies metadata and raw model definitions, and the `ModelRegistry`
//! builds one immutable `Specification` per version on first use.
//!
//! # Principles
//!
//! - Tables are read-only once built and shared across validations
//! - Unknown types get a synthesized model instead of an error
//! - Malformed definitions are `SpecError`s, never panics

mod definition;
mod entity;
mod errors;
mod field;
mod registry;
mod store;
pub mod types;

pub use definition::{FieldDefinition, MetaData, ModelDefinition, RequiredOptionDefinition};
pub use entity::{Model, RequiredOption};
pub use errors::{SpecError, SpecResult};
pub use field::Field;
pub use registry::{ModelRegistry, Specification};
pub use store::{DirectorySpecificationStore, InMemorySpecificationStore, SpecificationStore, LATEST};
pub use types::{detect_type, DataType, DetectedType, SemanticType};
