//! Find-a-provider search pipeline: optional geocoding, language selection, provider search.
//!
//! Each `search` call is strictly sequential. Every transition is tagged with the request id
//! allocated by `SearchStarted`; the state holder drops transitions whose id is no longer the
//! latest, so the last started search wins regardless of completion order.

use std::rc::Rc;

use platform_host::{
    GeoCoordinate, GeolocationService, ProviderSearchRequest, ProviderSearchService,
};
use tracing::{debug, info, warn};

use crate::{
    geo_resolver::{GeoError, GeoResolver},
    language::language_for_country,
    model::SearchQuery,
    reducer::SiteAction,
};

pub const LOCATION_UNRESOLVED_MESSAGE: &str =
    "We could not determine your location. Please enter your country and city.";
pub const GEOLOCATION_UNAVAILABLE_MESSAGE: &str =
    "Location access is unavailable. Please enter your country and city.";
pub const MISSING_COUNTRY_MESSAGE: &str = "Please enter a country to search.";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again later.";

/// State holder the pipeline reports transitions to.
pub trait SearchHost {
    /// Applies a search transition and returns the latest request id afterwards.
    fn apply_search(&self, action: SiteAction) -> u64;
}

#[derive(Clone)]
pub struct ProviderSearchPipeline {
    geo: GeoResolver,
    provider: Rc<dyn ProviderSearchService>,
    geolocation: Rc<dyn GeolocationService>,
}

impl ProviderSearchPipeline {
    pub fn new(
        geo: GeoResolver,
        provider: Rc<dyn ProviderSearchService>,
        geolocation: Rc<dyn GeolocationService>,
    ) -> Self {
        Self {
            geo,
            provider,
            geolocation,
        }
    }

    /// Runs one search and returns its request id.
    ///
    /// A coordinate is always geocoded first and the search is issued by country/city; the
    /// provider never receives the raw coordinate.
    pub async fn search(
        &self,
        host: &dyn SearchHost,
        country: Option<String>,
        city: Option<String>,
        coordinate: Option<GeoCoordinate>,
    ) -> u64 {
        let query = SearchQuery {
            country: country.unwrap_or_default().trim().to_string(),
            city: city.unwrap_or_default().trim().to_string(),
            last_search_location: coordinate,
        };
        let request_id = host.apply_search(SiteAction::SearchStarted {
            query: query.clone(),
        });
        let mut settle = SettleGuard::new(host, request_id);
        info!(request_id, by_coordinate = coordinate.is_some(), "provider search started");

        match coordinate {
            Some(coordinate) => self.search_around(&mut settle, coordinate).await,
            None => self.query_provider(&mut settle, query.country, query.city).await,
        }
        request_id
    }

    /// Searches around the device position.
    ///
    /// The request id is allocated before the position is requested, so a search started while
    /// the device is still locating supersedes this one.
    pub async fn search_near_me(&self, host: &dyn SearchHost) -> u64 {
        let request_id = host.apply_search(SiteAction::SearchStarted {
            query: SearchQuery::default(),
        });
        let mut settle = SettleGuard::new(host, request_id);
        info!(request_id, "near-me search started");

        match self.geolocation.current_position().await {
            Ok(coordinate) => {
                let current = settle.apply(SiteAction::SearchPositionAcquired {
                    request_id,
                    coordinate,
                });
                if !current {
                    debug!(request_id, "superseded while locating the device");
                    settle.release();
                    return request_id;
                }
                self.search_around(&mut settle, coordinate).await;
            }
            Err(err) => {
                warn!(request_id, error = %err, "device geolocation failed");
                settle.fail(GEOLOCATION_UNAVAILABLE_MESSAGE.to_string());
            }
        }
        request_id
    }

    async fn search_around(&self, settle: &mut SettleGuard<'_>, coordinate: GeoCoordinate) {
        let request_id = settle.request_id;
        match self.geo.resolve(coordinate).await {
            Ok(location) => {
                let current = settle.apply(SiteAction::SearchLocationResolved {
                    request_id,
                    country: location.country.clone(),
                    city: location.city.clone(),
                });
                if !current {
                    debug!(request_id, "superseded after geocoding");
                    settle.release();
                    return;
                }
                self.query_provider(settle, location.country, location.city)
                    .await;
            }
            Err(err) => {
                warn!(request_id, error = %err, "location resolution failed");
                settle.fail(resolution_failure_message(&err));
            }
        }
    }

    async fn query_provider(&self, settle: &mut SettleGuard<'_>, country: String, city: String) {
        let request_id = settle.request_id;
        if country.is_empty() {
            settle.fail(MISSING_COUNTRY_MESSAGE.to_string());
            return;
        }

        let request = ProviderSearchRequest {
            language: language_for_country(&country).to_string(),
            country,
            city,
            coordinate: None,
        };
        debug!(
            request_id,
            country = %request.country,
            city = %request.city,
            language = %request.language,
            "querying provider search"
        );

        match self.provider.search(&request).await {
            Ok(payload) => {
                settle.apply(SiteAction::SearchSucceeded {
                    request_id,
                    payload,
                });
            }
            Err(err) => {
                warn!(request_id, error = %err, "provider search failed");
                settle.fail(provider_failure_message(&err));
            }
        }
    }
}

fn resolution_failure_message(err: &GeoError) -> String {
    match err {
        GeoError::Request(_) | GeoError::Status(_) | GeoError::MissingCountry => {
            LOCATION_UNRESOLVED_MESSAGE.to_string()
        }
    }
}

/// User-facing text for a provider failure, carrying the provider message when there is one.
pub fn provider_failure_message(err: &str) -> String {
    let err = err.trim();
    if err.is_empty() {
        SEARCH_FAILED_MESSAGE.to_string()
    } else {
        format!("Search failed: {err}")
    }
}

/// Guarantees the request never stays `Loading` once the search call is gone.
struct SettleGuard<'a> {
    host: &'a dyn SearchHost,
    request_id: u64,
    settled: bool,
}

impl<'a> SettleGuard<'a> {
    fn new(host: &'a dyn SearchHost, request_id: u64) -> Self {
        Self {
            host,
            request_id,
            settled: false,
        }
    }

    /// Applies `action`; returns whether this request is still the latest.
    fn apply(&mut self, action: SiteAction) -> bool {
        if matches!(
            action,
            SiteAction::SearchSucceeded { .. } | SiteAction::SearchFailed { .. }
        ) {
            self.settled = true;
        }
        self.host.apply_search(action) == self.request_id
    }

    /// Marks the request finished without a terminal transition of its own.
    fn release(&mut self) {
        self.settled = true;
    }

    fn fail(&mut self, message: String) {
        self.apply(SiteAction::SearchFailed {
            request_id: self.request_id,
            message,
        });
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.host.apply_search(SiteAction::SearchAbandoned {
                request_id: self.request_id,
            });
        }
    }
}
