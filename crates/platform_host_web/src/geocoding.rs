//! Google Geocoding and `navigator.geolocation` adapters.

use platform_host::{
    GeoCoordinate, GeocodingFuture, GeocodingService, GeolocationService, ReverseGeocodeResponse,
};
use url::Url;

use crate::bridge;

/// Language the geocoder is asked to name places in.
const RESULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
/// Reverse-geocoding adapter issuing one `GET` per lookup against a Google-compatible endpoint.
pub struct WebGeocodingService {
    endpoint: String,
    api_key: String,
}

impl WebGeocodingService {
    /// Creates an adapter for `endpoint` (for example
    /// `https://maps.googleapis.com/maps/api/geocode/json`).
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds the lookup URL for `coordinate`, appending to any query the endpoint already has.
    ///
    /// Place names are requested in English so the country matches the language table no matter
    /// what locale the browser sends.
    pub fn request_url(&self, coordinate: GeoCoordinate) -> Result<Url, String> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|err| format!("invalid geocoding endpoint `{}`: {err}", self.endpoint))?;
        url.query_pairs_mut()
            .append_pair("latlng", &format!("{},{}", coordinate.lat, coordinate.lng))
            .append_pair("language", RESULT_LANGUAGE)
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl GeocodingService for WebGeocodingService {
    fn reverse_geocode(
        &self,
        coordinate: GeoCoordinate,
    ) -> GeocodingFuture<'_, Result<ReverseGeocodeResponse, String>> {
        let url = self.request_url(coordinate);
        Box::pin(async move { bridge::http_get_json(url?.as_str()).await })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Device position adapter backed by `navigator.geolocation.getCurrentPosition`.
pub struct WebGeolocationService;

impl GeolocationService for WebGeolocationService {
    fn current_position(&self) -> GeocodingFuture<'_, Result<GeoCoordinate, String>> {
        Box::pin(async {
            let (lat, lng) = bridge::current_position().await?;
            Ok(GeoCoordinate::new(lat, lng))
        })
    }
}
