//! Location resolution: place names to coordinates and back.
//! Forward lookups use Open-Meteo geocoding, reverse lookups use Nominatim
//! (OpenStreetMap). Neither needs an API key.

use crate::http::{build_client, get_json};
use crate::types::{Coordinates, PlaceDescriptor, FALLBACK_PLACE_NAME};
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{ServicesConfig, WeatherError};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingCandidate {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

/// Turns free-text queries or coordinates into a `PlaceDescriptor`.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Arc<Client>,
    geocoding_url: String,
    reverse_geocoding_url: String,
    language: String,
}

impl LocationResolver {
    pub fn new(client: Arc<Client>, services: &ServicesConfig) -> Self {
        Self {
            client,
            geocoding_url: services.geocoding_url.clone(),
            reverse_geocoding_url: services.reverse_geocoding_url.clone(),
            language: services.language.clone(),
        }
    }

    pub fn from_config(services: &ServicesConfig) -> Result<Self, WeatherError> {
        let client = build_client(services)?;
        Ok(Self::new(Arc::new(client), services))
    }

    /// Forward geocode a place name, taking the best match.
    ///
    /// An empty query or zero matches is `NotFound`; transport failures are
    /// `Network`. There is nothing to fall back on here, so failures propagate.
    pub async fn resolve_by_name(&self, query: &str) -> Result<PlaceDescriptor, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound(String::new()));
        }

        tracing::debug!("Geocoding place name: {}", query);

        let request = self.client.get(&self.geocoding_url).query(&[
            ("name", query),
            ("count", "1"),
            ("language", self.language.as_str()),
            ("format", "json"),
        ]);

        let body: GeocodingResponse = get_json(request).await?;

        let candidate = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        let coordinates = Coordinates::new(candidate.latitude, candidate.longitude)
            .map_err(|e| WeatherError::malformed(e.to_string()))?;

        let place = PlaceDescriptor::new(
            candidate.name,
            candidate.country.unwrap_or_default(),
            coordinates,
        );

        tracing::info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query,
            place.label(),
            coordinates.latitude(),
            coordinates.longitude()
        );
        Ok(place)
    }

    /// Reverse geocode coordinates to a place name.
    ///
    /// Never fails: the coordinates are already enough to fetch weather, so
    /// an unreachable service or a nameless result yields "Your Location".
    pub async fn resolve_by_coordinates(&self, coordinates: Coordinates) -> PlaceDescriptor {
        match self.reverse_lookup(coordinates).await {
            Ok(body) => {
                let place = place_from_address(body.address, coordinates);
                tracing::info!("Reverse geocoded to: {}", place.label());
                place
            }
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                PlaceDescriptor::unnamed(coordinates)
            }
        }
    }

    async fn reverse_lookup(&self, coordinates: Coordinates) -> Result<NominatimResponse, WeatherError> {
        let request = self.client.get(&self.reverse_geocoding_url).query(&[
            ("format", "json".to_string()),
            ("lat", coordinates.latitude().to_string()),
            ("lon", coordinates.longitude().to_string()),
        ]);

        get_json(request).await
    }
}

/// Prefer city > town > village for the name; keep the country when given.
fn place_from_address(address: Option<NominatimAddress>, coordinates: Coordinates) -> PlaceDescriptor {
    let Some(addr) = address else {
        return PlaceDescriptor::unnamed(coordinates);
    };

    let name = non_blank(addr.city)
        .or_else(|| non_blank(addr.town))
        .or_else(|| non_blank(addr.village))
        .unwrap_or_else(|| FALLBACK_PLACE_NAME.to_string());

    PlaceDescriptor::new(name, addr.country.unwrap_or_default(), coordinates)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pune() -> Coordinates {
        Coordinates::new(18.52, 73.86).unwrap()
    }

    fn address(city: Option<&str>, town: Option<&str>, village: Option<&str>) -> NominatimAddress {
        NominatimAddress {
            city: city.map(String::from),
            town: town.map(String::from),
            village: village.map(String::from),
            country: Some("India".to_string()),
        }
    }

    #[test]
    fn test_city_preferred_over_town_and_village() {
        let place = place_from_address(Some(address(Some("Pune"), Some("Aundh"), Some("Baner"))), pune());
        assert_eq!(place.name(), "Pune");
        assert_eq!(place.country(), "India");
    }

    #[test]
    fn test_town_then_village_fallback() {
        let place = place_from_address(Some(address(None, Some("Lonavala"), Some("Kune"))), pune());
        assert_eq!(place.name(), "Lonavala");

        let place = place_from_address(Some(address(None, None, Some("Kune"))), pune());
        assert_eq!(place.name(), "Kune");
    }

    #[test]
    fn test_blank_locality_falls_through() {
        let place = place_from_address(Some(address(Some(""), Some("Lonavala"), None)), pune());
        assert_eq!(place.name(), "Lonavala");

        let place = place_from_address(Some(address(Some(" "), Some(""), Some("Kune"))), pune());
        assert_eq!(place.name(), "Kune");
    }

    #[test]
    fn test_address_without_locality_keeps_country() {
        let place = place_from_address(Some(address(None, None, None)), pune());
        assert_eq!(place.name(), FALLBACK_PLACE_NAME);
        assert_eq!(place.country(), "India");
    }

    #[test]
    fn test_missing_address_is_unnamed() {
        let place = place_from_address(None, pune());
        assert_eq!(place, PlaceDescriptor::unnamed(pune()));
    }

    #[tokio::test]
    async fn test_empty_query_is_not_found_without_request() {
        let services = ServicesConfig {
            geocoding_url: "http://127.0.0.1:9/search".to_string(),
            ..ServicesConfig::default()
        };
        let resolver = LocationResolver::from_config(&services).unwrap();

        let err = resolver.resolve_by_name("   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(_)));
    }
}
