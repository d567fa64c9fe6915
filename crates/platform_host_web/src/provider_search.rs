//! HTTP provider-search adapter.

use platform_host::{ProviderSearchFuture, ProviderSearchRequest, ProviderSearchService};
use serde_json::Value;

use crate::bridge;

#[derive(Debug, Clone)]
/// Provider-search adapter posting the request as JSON to a search function endpoint.
pub struct WebProviderSearchService {
    endpoint: String,
    api_key: Option<String>,
}

impl WebProviderSearchService {
    /// Creates an adapter for `endpoint`, optionally authenticated with a bearer `api_key`.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

impl ProviderSearchService for WebProviderSearchService {
    fn search<'a>(
        &'a self,
        request: &'a ProviderSearchRequest,
    ) -> ProviderSearchFuture<'a, Result<Value, String>> {
        Box::pin(async move {
            let payload: Value =
                bridge::http_post_json(&self.endpoint, request, self.api_key.as_deref()).await?;
            if let Some(message) = payload.get("error").and_then(Value::as_str) {
                return Err(message.to_string());
            }
            Ok(payload)
        })
    }
}
