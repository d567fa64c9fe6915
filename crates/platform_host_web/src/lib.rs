//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for client storage, geocoding,
//! device geolocation, provider search, admin credential checks, and viewport effects. All
//! network and device calls go through `bridge`, which routes to the wasm interop layer or a
//! non-wasm shim.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod admin;
mod bridge;
pub mod geocoding;
pub mod provider_search;
pub mod storage;
pub mod viewport;

pub use adapters::{
    admin_credential_service, build_host_services, durable_storage, provider_search_service,
    session_storage, WebEndpoints,
};
pub use admin::WebAdminCredentialService;
pub use geocoding::{WebGeocodingService, WebGeolocationService};
pub use provider_search::WebProviderSearchService;
pub use storage::web_storage::WebClientStorage;
pub use viewport::WebViewportService;
