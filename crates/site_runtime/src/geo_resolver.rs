//! Coordinate → (country, city) resolution over the geocoding provider.

use std::rc::Rc;

use platform_host::{
    GeoCoordinate, GeocodingService, ReverseGeocodeResponse, COMPONENT_ADMIN_AREA_LEVEL_2,
    COMPONENT_COUNTRY, COMPONENT_LOCALITY,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub country: String,
    /// Empty when neither a locality nor a second-level area was returned.
    pub city: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeoError {
    #[error("geocoding request failed: {0}")]
    Request(String),
    #[error("geocoding returned status {0}")]
    Status(String),
    #[error("geocoding result has no country")]
    MissingCountry,
}

#[derive(Clone)]
pub struct GeoResolver {
    service: Rc<dyn GeocodingService>,
}

impl GeoResolver {
    pub fn new(service: Rc<dyn GeocodingService>) -> Self {
        Self { service }
    }

    /// Resolves `coordinate` with exactly one provider call.
    pub async fn resolve(&self, coordinate: GeoCoordinate) -> Result<ResolvedLocation, GeoError> {
        let response = self
            .service
            .reverse_geocode(coordinate)
            .await
            .map_err(GeoError::Request)?;
        let location = select_location(&response)?;
        debug!(
            country = %location.country,
            city = %location.city,
            "resolved coordinate"
        );
        Ok(location)
    }
}

/// Picks country and city from the best result.
///
/// City prefers `locality` and falls back to `administrative_area_level_2`, which is where many
/// regions file their municipalities.
pub fn select_location(response: &ReverseGeocodeResponse) -> Result<ResolvedLocation, GeoError> {
    if !response.is_ok() {
        return Err(GeoError::Status(response.status.clone()));
    }
    let components = response
        .results
        .first()
        .map(|result| result.address_components.as_slice())
        .unwrap_or_default();

    let named = |kind: &str| {
        components
            .iter()
            .find(|component| component.has_type(kind))
            .map(|component| component.long_name.clone())
    };

    let country = named(COMPONENT_COUNTRY)
        .filter(|name| !name.is_empty())
        .ok_or(GeoError::MissingCountry)?;
    let city = named(COMPONENT_LOCALITY)
        .or_else(|| named(COMPONENT_ADMIN_AREA_LEVEL_2))
        .unwrap_or_default();

    Ok(ResolvedLocation { country, city })
}
