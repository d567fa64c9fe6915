//! Browser host bundle assembled from the embedded site configuration.

use std::rc::Rc;

use leptos::logging;
use platform_host::{HostServices, NoopIdentityProvider};
use platform_host_web::{build_host_services, WebEndpoints};
use site_runtime::SiteConfig;

const SITE_CONFIG: &str = include_str!("../site.toml");

pub fn web_endpoints(config: &SiteConfig) -> WebEndpoints {
    WebEndpoints {
        geocoding_endpoint: config.geocoding.endpoint.clone(),
        geocoding_api_key: config.geocoding.api_key.clone(),
        provider_search_endpoint: config.provider_search.endpoint.clone(),
        provider_search_api_key: config.provider_search.api_key.clone(),
        admin_verify_endpoint: config.admin.verify_endpoint.clone(),
    }
}

/// Browser services for the embedded config, or the headless bundle if the config is rejected.
pub fn browser_host_services() -> HostServices {
    match SiteConfig::from_toml_str(SITE_CONFIG) {
        // Sign-in lives with the hosting identity service; until one is wired the site runs
        // signed out.
        Ok(config) => build_host_services(&web_endpoints(&config), Rc::new(NoopIdentityProvider)),
        Err(err) => {
            logging::warn!("site config rejected, running headless: {err}");
            HostServices::headless()
        }
    }
}
