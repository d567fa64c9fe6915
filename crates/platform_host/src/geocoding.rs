//! Reverse-geocoding and device-geolocation host contracts.
//!
//! Response models follow the Google Geocoding JSON shape (`status` plus `results[]` of
//! `address_components`), which is what the browser adapter deserializes.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`GeocodingService`] and [`GeolocationService`].
pub type GeocodingFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Provider status reported for a successful reverse-geocode lookup.
pub const GEOCODE_STATUS_OK: &str = "OK";

/// Address component type carrying the country name.
pub const COMPONENT_COUNTRY: &str = "country";
/// Address component type carrying the city name.
pub const COMPONENT_LOCALITY: &str = "locality";
/// Second-level administrative area, used as a city fallback.
pub const COMPONENT_ADMIN_AREA_LEVEL_2: &str = "administrative_area_level_2";

/// WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl GeoCoordinate {
    /// Creates a coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One address component of a geocode result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Full display name (for example `France`).
    pub long_name: String,
    /// Abbreviated name (for example `FR`).
    #[serde(default)]
    pub short_name: String,
    /// Component types (for example `["country", "political"]`).
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// Returns whether this component carries `kind` among its types.
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// One candidate result of a reverse-geocode lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Address components, most specific first.
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    /// Human-readable address when provided.
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Raw reverse-geocode response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReverseGeocodeResponse {
    /// Provider status token (`OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, ...).
    pub status: String,
    /// Candidate results, best match first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Provider-supplied diagnostic text.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ReverseGeocodeResponse {
    /// Returns whether the provider reported success.
    pub fn is_ok(&self) -> bool {
        self.status == GEOCODE_STATUS_OK
    }
}

/// Host service turning coordinates into address components.
pub trait GeocodingService {
    /// Issues one reverse-geocode request.
    ///
    /// Transport failures are returned as `Err`; provider-level failures arrive as a response
    /// with a non-`OK` status.
    fn reverse_geocode(
        &self,
        coordinate: GeoCoordinate,
    ) -> GeocodingFuture<'_, Result<ReverseGeocodeResponse, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Geocoding service for targets without network access.
pub struct NoopGeocodingService;

impl GeocodingService for NoopGeocodingService {
    fn reverse_geocode(
        &self,
        _coordinate: GeoCoordinate,
    ) -> GeocodingFuture<'_, Result<ReverseGeocodeResponse, String>> {
        Box::pin(async { Err("geocoding unavailable".to_string()) })
    }
}

/// Host service reading the device position.
pub trait GeolocationService {
    /// Requests the current device position.
    fn current_position(&self) -> GeocodingFuture<'_, Result<GeoCoordinate, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Geolocation service for targets without a positioning API.
pub struct NoopGeolocationService;

impl GeolocationService for NoopGeolocationService {
    fn current_position(&self) -> GeocodingFuture<'_, Result<GeoCoordinate, String>> {
        Box::pin(async { Err("geolocation unavailable".to_string()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_deserializes_google_shape_with_missing_optionals() {
        let raw = r#"{
            "status": "OK",
            "results": [{
                "address_components": [
                    {"long_name": "Paris", "short_name": "Paris", "types": ["locality", "political"]},
                    {"long_name": "France", "short_name": "FR", "types": ["country", "political"]}
                ]
            }]
        }"#;
        let response: ReverseGeocodeResponse = serde_json::from_str(raw).expect("decode");
        assert!(response.is_ok());
        let components = &response.results[0].address_components;
        assert!(components[0].has_type(COMPONENT_LOCALITY));
        assert!(components[1].has_type(COMPONENT_COUNTRY));
        assert_eq!(response.error_message, None);
    }

    #[test]
    fn zero_results_response_is_not_ok() {
        let response: ReverseGeocodeResponse =
            serde_json::from_str(r#"{"status":"ZERO_RESULTS"}"#).expect("decode");
        assert!(!response.is_ok());
        assert!(response.results.is_empty());
    }
}
