//! Typed host-domain contracts shared by the site runtime and browser adapters.
//!
//! This crate is the API-first boundary for the external collaborators the site talks to:
//! client storage, the identity provider, geocoding and device geolocation, the provider-search
//! capability, admin credential checks, and viewport effects. Concrete browser adapters live in
//! `platform_host_web`; in-memory and no-op adapters here back tests and headless builds.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod admin;
pub mod geocoding;
pub mod host;
pub mod identity;
pub mod provider_search;
pub mod storage;
pub mod viewport;

pub use admin::{AdminCredentialFuture, AdminCredentialService, DenyAllAdminCredentials};
pub use geocoding::{
    AddressComponent, GeoCoordinate, GeocodeResult, GeocodingFuture, GeocodingService,
    GeolocationService, NoopGeocodingService, NoopGeolocationService, ReverseGeocodeResponse,
    COMPONENT_ADMIN_AREA_LEVEL_2, COMPONENT_COUNTRY, COMPONENT_LOCALITY, GEOCODE_STATUS_OK,
};
pub use host::{CapabilityStatus, HostCapabilities, HostServices, HostStrategy};
pub use identity::{
    AuthSession, IdentityFuture, IdentityProvider, MemoryIdentityProvider, NoopIdentityProvider,
    SessionChangeHandler, SessionEvent, SessionSubscription,
};
pub use provider_search::{
    NoopProviderSearchService, ProviderSearchFuture, ProviderSearchRequest, ProviderSearchService,
};
pub use storage::{
    load_typed_with, save_typed_with, ClientStorage, MemoryClientStorage, NoopClientStorage,
    StorageScope,
};
pub use viewport::{NoopViewportService, ViewportService};
