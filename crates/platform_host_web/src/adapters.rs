use std::rc::Rc;

use platform_host::{
    AdminCredentialService, DenyAllAdminCredentials, HostCapabilities, HostServices,
    HostStrategy, IdentityProvider, NoopProviderSearchService, ProviderSearchService,
};

use crate::{
    WebAdminCredentialService, WebClientStorage, WebGeocodingService, WebGeolocationService,
    WebProviderSearchService, WebViewportService,
};

/// Network endpoints used by the browser adapters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebEndpoints {
    /// Reverse-geocoding endpoint.
    pub geocoding_endpoint: String,
    /// Reverse-geocoding API key.
    pub geocoding_api_key: String,
    /// Provider-search endpoint; empty disables provider search.
    pub provider_search_endpoint: String,
    /// Optional bearer token for provider search.
    pub provider_search_api_key: Option<String>,
    /// Admin verification endpoint; `None` rejects every admin passphrase.
    pub admin_verify_endpoint: Option<String>,
}

/// Returns the browser `localStorage` adapter.
pub fn durable_storage() -> WebClientStorage {
    WebClientStorage::durable()
}

/// Returns the browser `sessionStorage` adapter.
pub fn session_storage() -> WebClientStorage {
    WebClientStorage::session()
}

/// Returns the provider-search adapter for `endpoints`.
pub fn provider_search_service(endpoints: &WebEndpoints) -> Rc<dyn ProviderSearchService> {
    if endpoints.provider_search_endpoint.is_empty() {
        return Rc::new(NoopProviderSearchService);
    }
    Rc::new(WebProviderSearchService::new(
        endpoints.provider_search_endpoint.clone(),
        endpoints.provider_search_api_key.clone(),
    ))
}

/// Returns the admin credential adapter for `endpoints`.
pub fn admin_credential_service(endpoints: &WebEndpoints) -> Rc<dyn AdminCredentialService> {
    match endpoints.admin_verify_endpoint.as_deref() {
        Some(endpoint) if !endpoint.is_empty() => {
            Rc::new(WebAdminCredentialService::new(endpoint))
        }
        _ => Rc::new(DenyAllAdminCredentials),
    }
}

/// Builds the browser host bundle. The identity provider is supplied by the entry layer.
pub fn build_host_services(
    endpoints: &WebEndpoints,
    identity: Rc<dyn IdentityProvider>,
) -> HostServices {
    HostServices {
        durable_storage: Rc::new(durable_storage()),
        session_storage: Rc::new(session_storage()),
        identity,
        geocoding: Rc::new(WebGeocodingService::new(
            endpoints.geocoding_endpoint.clone(),
            endpoints.geocoding_api_key.clone(),
        )),
        geolocation: Rc::new(WebGeolocationService),
        provider_search: provider_search_service(endpoints),
        admin_credentials: admin_credential_service(endpoints),
        viewport: Rc::new(WebViewportService),
        capabilities: HostCapabilities::browser(),
        host_strategy: HostStrategy::Browser,
    }
}
