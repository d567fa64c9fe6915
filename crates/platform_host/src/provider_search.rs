//! Provider-search host contracts.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geocoding::GeoCoordinate;

/// Object-safe boxed future used by [`ProviderSearchService`].
pub type ProviderSearchFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Query sent to the provider-search capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSearchRequest {
    /// Country display name.
    pub country: String,
    /// City display name; may be empty for country-wide searches.
    pub city: String,
    /// Raw coordinate. Callers send `None`; coordinate searches are rewritten to country/city
    /// before reaching the provider.
    pub coordinate: Option<GeoCoordinate>,
    /// Language tag for the result payload (for example `fr`).
    pub language: String,
}

/// Host service querying the external provider directory.
pub trait ProviderSearchService {
    /// Runs a search and returns the provider's free-form payload.
    fn search<'a>(
        &'a self,
        request: &'a ProviderSearchRequest,
    ) -> ProviderSearchFuture<'a, Result<Value, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider-search service for targets without network access.
pub struct NoopProviderSearchService;

impl ProviderSearchService for NoopProviderSearchService {
    fn search<'a>(
        &'a self,
        _request: &'a ProviderSearchRequest,
    ) -> ProviderSearchFuture<'a, Result<Value, String>> {
        Box::pin(async { Err("provider search unavailable".to_string()) })
    }
}
