//! Remote document loader contract
//!
//! The engine never performs network I/O itself. Rules that need a remote
//! document (context documents, activity lists) ask a `JsonLoader`, which the
//! host injects. Loaders are called synchronously.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::options::ValidationOptions;

/// Outcome code of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderErrorCode {
    /// Data is usable
    None,
    /// Remote loading is disabled
    NoRemote,
    /// The resource does not exist or returned a non-success status
    NotFound,
    /// The resource was fetched but is not JSON
    InvalidJson,
    /// Any other transport failure
    Failed,
}

impl LoaderErrorCode {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderErrorCode::None => "no_error",
            LoaderErrorCode::NoRemote => "no_remote",
            LoaderErrorCode::NotFound => "not_found",
            LoaderErrorCode::InvalidJson => "invalid_json",
            LoaderErrorCode::Failed => "failed",
        }
    }
}

impl fmt::Display for LoaderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a fetch
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    /// Requested URL
    pub url: String,
    /// Outcome code; `None` means `data` is usable
    pub error_code: LoaderErrorCode,
    /// Transport status code, when one was received
    pub status_code: Option<u16>,
    /// Parsed body
    pub data: Option<Value>,
    /// Content type reported by the transport
    pub content_type: Option<String>,
}

impl JsonResponse {
    /// Successful response
    pub fn ok(url: impl Into<String>, data: Value) -> Self {
        Self {
            url: url.into(),
            error_code: LoaderErrorCode::None,
            status_code: Some(200),
            data: Some(data),
            content_type: Some("application/json".to_string()),
        }
    }

    /// Failed response
    pub fn error(url: impl Into<String>, error_code: LoaderErrorCode, status_code: Option<u16>) -> Self {
        Self {
            url: url.into(),
            error_code,
            status_code,
            data: None,
            content_type: None,
        }
    }

    /// Whether `data` is usable
    pub fn is_ok(&self) -> bool {
        self.error_code == LoaderErrorCode::None && self.data.is_some()
    }

    /// The body as a JSON object, if it is one
    pub fn object(&self) -> Option<&Map<String, Value>> {
        if self.error_code != LoaderErrorCode::None {
            return None;
        }
        self.data.as_ref().and_then(Value::as_object)
    }
}

/// Fetches JSON documents on behalf of rules
pub trait JsonLoader: Send + Sync {
    /// Fetch the document at `url`
    fn get_file(&self, url: &str, options: &ValidationOptions) -> JsonResponse;
}

/// Loader that refuses every request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteLoader;

impl JsonLoader for NoRemoteLoader {
    fn get_file(&self, url: &str, _options: &ValidationOptions) -> JsonResponse {
        JsonResponse::error(url, LoaderErrorCode::NoRemote, None)
    }
}

/// Loader that serves a fixed set of pre-fetched documents
///
/// Unknown URLs answer `NotFound` with status 404.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    documents: HashMap<String, Value>,
}

impl StaticLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `url`
    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.documents.insert(url.into(), document);
        self
    }

    /// Number of documents served
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are served
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl JsonLoader for StaticLoader {
    fn get_file(&self, url: &str, _options: &ValidationOptions) -> JsonResponse {
        match self.documents.get(url) {
            Some(document) => JsonResponse::ok(url, document.clone()),
            None => JsonResponse::error(url, LoaderErrorCode::NotFound, Some(404)),
        }
    }
}
