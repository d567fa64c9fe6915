//! Headless core of the site: navigation model, profile guards, reducer, and the async
//! find-a-provider pipeline, composed by [`SiteRuntime`] over injected host services.

pub mod admin_gate;
pub mod client_state;
pub mod config;
pub mod geo_resolver;
pub mod guards;
pub mod host;
pub mod language;
pub mod model;
pub mod reducer;
pub mod runtime;
pub mod search;
pub mod session_watcher;

pub use admin_gate::{AdminAccessGate, AdminGateError};
pub use client_state::{ClientStateStore, ProfileStore};
pub use config::{ConfigError, SiteConfig};
pub use geo_resolver::{GeoError, GeoResolver, ResolvedLocation};
pub use guards::{evaluate_guards, GuardOutcome};
pub use host::SiteHostContext;
pub use language::language_for_country;
pub use model::*;
pub use reducer::{reduce_site, ReducerError, RuntimeEffect, SiteAction};
pub use runtime::{nav_path, parse_path, render_frame, SiteRuntime};
pub use search::{
    ProviderSearchPipeline, SearchHost, GEOLOCATION_UNAVAILABLE_MESSAGE, LOCATION_UNRESOLVED_MESSAGE,
    MISSING_COUNTRY_MESSAGE, SEARCH_FAILED_MESSAGE,
};
pub use session_watcher::SessionWatcher;
