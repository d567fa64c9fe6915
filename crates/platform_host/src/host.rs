//! Shared host-bundle and capability models for browser and headless runtime composition.

use std::rc::Rc;

use crate::{
    AdminCredentialService, ClientStorage, DenyAllAdminCredentials, GeocodingService,
    GeolocationService, IdentityProvider, MemoryClientStorage, NoopGeocodingService,
    NoopGeolocationService, NoopIdentityProvider, NoopProviderSearchService, NoopViewportService,
    ProviderSearchService, StorageScope, ViewportService,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// In-process composition with memory storage and no-op network adapters.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available.
    Available,
    /// Capability is not implemented or not supported on the active host.
    Unavailable,
    /// Capability exists but needs an explicit user permission grant first.
    RequiresUserActivation,
}

impl CapabilityStatus {
    /// Returns whether the capability may be offered to the user at all.
    pub const fn is_offered(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Host capability snapshot exposed to runtime wiring and views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Device geolocation ("search near me").
    pub geolocation: CapabilityStatus,
    /// Durable client storage.
    pub durable_storage: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser-default capability posture.
    pub const fn browser() -> Self {
        Self {
            geolocation: CapabilityStatus::RequiresUserActivation,
            durable_storage: CapabilityStatus::Available,
        }
    }

    /// Headless capability posture.
    pub const fn headless() -> Self {
        Self {
            geolocation: CapabilityStatus::Unavailable,
            durable_storage: CapabilityStatus::Available,
        }
    }
}

/// Runtime-selected host service bundle injected into the site runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `site_runtime`, which keeps the runtime decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Storage surviving browser restarts (profile, consent).
    pub durable_storage: Rc<dyn ClientStorage>,
    /// Storage scoped to the browsing session (splash, admin session).
    pub session_storage: Rc<dyn ClientStorage>,
    /// End-user identity provider.
    pub identity: Rc<dyn IdentityProvider>,
    /// Reverse-geocoding provider.
    pub geocoding: Rc<dyn GeocodingService>,
    /// Device position provider.
    pub geolocation: Rc<dyn GeolocationService>,
    /// Provider-search capability.
    pub provider_search: Rc<dyn ProviderSearchService>,
    /// Admin-zone credential verifier.
    pub admin_credentials: Rc<dyn AdminCredentialService>,
    /// Viewport side effects.
    pub viewport: Rc<dyn ViewportService>,
    /// Host availability snapshot for optional capability domains.
    pub capabilities: HostCapabilities,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Headless bundle: fresh in-memory storage, signed-out identity, and no-op network adapters.
    pub fn headless() -> Self {
        Self {
            durable_storage: Rc::new(MemoryClientStorage::new(StorageScope::Durable)),
            session_storage: Rc::new(MemoryClientStorage::new(StorageScope::Session)),
            identity: Rc::new(NoopIdentityProvider),
            geocoding: Rc::new(NoopGeocodingService),
            geolocation: Rc::new(NoopGeolocationService),
            provider_search: Rc::new(NoopProviderSearchService),
            admin_credentials: Rc::new(DenyAllAdminCredentials),
            viewport: Rc::new(NoopViewportService),
            capabilities: HostCapabilities::headless(),
            host_strategy: HostStrategy::Headless,
        }
    }
}
