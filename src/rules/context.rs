//! Per-run state shared by every rule

use std::cell::OnceCell;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::loader::{JsonLoader, JsonResponse, LoaderErrorCode};
use crate::model::{MetaData, Model, Specification};
use crate::observability::{log_event_with_fields, Event};
use crate::options::ValidationOptions;
use crate::vocabulary::collect_contexts;

/// Read-only view of the run a rule executes in
pub struct RuleContext<'a> {
    specification: &'a Specification,
    options: &'a ValidationOptions,
    loader: &'a dyn JsonLoader,
    document: &'a Map<String, Value>,
    root_model: Arc<Model>,
    contexts: OnceCell<Vec<Value>>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        specification: &'a Specification,
        options: &'a ValidationOptions,
        loader: &'a dyn JsonLoader,
        document: &'a Map<String, Value>,
        root_model: Arc<Model>,
    ) -> Self {
        Self {
            specification,
            options,
            loader,
            document,
            root_model,
            contexts: OnceCell::new(),
        }
    }

    pub fn specification(&self) -> &'a Specification {
        self.specification
    }

    pub fn metadata(&self) -> &'a MetaData {
        self.specification.metadata()
    }

    pub fn options(&self) -> &'a ValidationOptions {
        self.options
    }

    /// The document root
    pub fn document(&self) -> &'a Map<String, Value> {
        self.document
    }

    pub fn root_model(&self) -> &Model {
        &self.root_model
    }

    /// Fetch a remote document, unless remote loading is disabled
    pub fn fetch(&self, url: &str) -> JsonResponse {
        if !self.options.load_remote_json {
            log_event_with_fields(Event::RemoteLoadSkipped, &[("url", url)]);
            return JsonResponse::error(url, LoaderErrorCode::NoRemote, None);
        }
        self.loader.get_file(url, self.options)
    }

    /// Context documents referenced by the root `@context`, collected once
    pub fn contexts(&self) -> &[Value] {
        self.contexts.get_or_init(|| {
            collect_contexts(self.document.get("@context"), self.metadata(), |url| {
                let response = self.fetch(url);
                if response.object().is_some() {
                    return response.data;
                }
                if response.error_code != LoaderErrorCode::NoRemote {
                    let status = response
                        .status_code
                        .map(|code| code.to_string())
                        .unwrap_or_default();
                    log_event_with_fields(
                        Event::ContextFetchFailed,
                        &[
                            ("url", url),
                            ("code", response.error_code.as_str()),
                            ("status", status.as_str()),
                        ],
                    );
                }
                None
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticLoader;
    use serde_json::json;

    fn specification() -> Specification {
        let metadata: MetaData = serde_json::from_value(json!({
            "contextUrl": "https://openactive.io/",
            "vocabularyPrefix": "oa"
        }))
        .unwrap();
        Specification::new("latest", metadata, Vec::new())
    }

    #[test]
    fn test_fetch_respects_remote_flag() {
        let spec = specification();
        let loader = StaticLoader::new().with_document("https://example.org/a", json!({}));
        let document = Map::new();
        let model = Arc::new(Model::unknown(None, "latest"));

        let offline = ValidationOptions::default();
        let ctx = RuleContext::new(&spec, &offline, &loader, &document, Arc::clone(&model));
        assert_eq!(ctx.fetch("https://example.org/a").error_code, LoaderErrorCode::NoRemote);

        let online = ValidationOptions::default().with_remote_json(true);
        let ctx = RuleContext::new(&spec, &online, &loader, &document, model);
        assert!(ctx.fetch("https://example.org/a").is_ok());
    }

    #[test]
    fn test_contexts_are_fetched_once_and_filtered() {
        let spec = specification();
        let loader = StaticLoader::new().with_document(
            "https://example.org/ext.jsonld",
            json!({"@context": {"ext": "https://example.org/ext#"}}),
        );
        let document = json!({
            "@context": ["https://openactive.io/", "https://example.org/ext.jsonld", "https://example.org/gone"]
        });
        let map = document.as_object().unwrap();
        let options = ValidationOptions::default().with_remote_json(true);
        let ctx = RuleContext::new(&spec, &options, &loader, map, Arc::new(Model::unknown(None, "latest")));

        let contexts = ctx.contexts();
        assert_eq!(contexts.len(), 1);
        assert!(std::ptr::eq(contexts, ctx.contexts()));
    }
}
