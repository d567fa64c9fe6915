//! Host-side helpers for executing reducer effects against the injected service bundle.

use std::rc::Rc;

use platform_host::{HostCapabilities, HostServices, HostStrategy, IdentityProvider, ViewportService};
use tracing::trace;

use crate::{
    admin_gate::AdminAccessGate,
    client_state::ClientStateStore,
    geo_resolver::GeoResolver,
    reducer::RuntimeEffect,
    search::ProviderSearchPipeline,
};

#[derive(Clone)]
/// Service bundle the runtime uses for side effects and async workflows.
pub struct SiteHostContext {
    client_state: ClientStateStore,
    identity: Rc<dyn IdentityProvider>,
    viewport: Rc<dyn ViewportService>,
    search: ProviderSearchPipeline,
    admin_gate: AdminAccessGate,
    capabilities: HostCapabilities,
    host_strategy: HostStrategy,
}

impl SiteHostContext {
    pub fn new(services: HostServices) -> Self {
        Self {
            client_state: ClientStateStore::new(services.durable_storage, services.session_storage),
            identity: services.identity,
            viewport: services.viewport,
            search: ProviderSearchPipeline::new(
                GeoResolver::new(services.geocoding),
                services.provider_search,
                services.geolocation,
            ),
            admin_gate: AdminAccessGate::new(services.admin_credentials),
            capabilities: services.capabilities,
            host_strategy: services.host_strategy,
        }
    }

    pub fn client_state(&self) -> &ClientStateStore {
        &self.client_state
    }

    pub fn identity(&self) -> Rc<dyn IdentityProvider> {
        self.identity.clone()
    }

    pub fn search_pipeline(&self) -> &ProviderSearchPipeline {
        &self.search
    }

    pub fn admin_gate(&self) -> &AdminAccessGate {
        &self.admin_gate
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    pub fn host_strategy(&self) -> HostStrategy {
        self.host_strategy
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        trace!(?effect, "running effect");
        match effect {
            RuntimeEffect::ScrollToTop => self.viewport.scroll_to_top(),
            RuntimeEffect::PersistProfile(profile) => {
                self.client_state.profile_store().set(profile)
            }
            RuntimeEffect::ClearPersistedProfile => self.client_state.profile_store().clear(),
            RuntimeEffect::PersistConsent => self.client_state.set_consent_given(true),
            RuntimeEffect::PersistSplashShown => self.client_state.mark_splash_shown(),
            RuntimeEffect::PersistAdminSession(unlocked) => {
                self.client_state.set_admin_session(unlocked)
            }
        }
    }
}
