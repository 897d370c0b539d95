use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use skycast_core::UnitSystem;

/// Name shown when reverse geocoding yields nothing usable
pub const FALLBACK_PLACE_NAME: &str = "Your Location";

/// Number of daily entries a report carries
pub const FORECAST_DAYS: usize = 5;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

// Deserialization goes through `Coordinates::new` so range checks always apply
#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Coordinates out of range: ({latitude}, {longitude})")]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinates {
                latitude,
                longitude,
            })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A resolved place: display name, country (empty when unknown) and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDescriptor {
    name: String,
    country: String,
    coordinates: Coordinates,
}

impl PlaceDescriptor {
    pub fn new(name: impl Into<String>, country: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            coordinates,
        }
    }

    /// Placeholder descriptor for coordinates without a known name
    pub fn unnamed(coordinates: Coordinates) -> Self {
        Self::new(FALLBACK_PLACE_NAME, "", coordinates)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// "Name, Country", or just the name when the country is unknown
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Current weather conditions, in the units the report was requested with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_percent: u8,
    pub wind_speed: f64,
    pub visibility_km: f64,
    pub weather_code: i32,
    pub is_day: bool,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub weather_code: i32,
}

/// Current conditions plus a chronological forecast of `FORECAST_DAYS` entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecastEntry>,
    pub unit: UnitSystem,
}

/// Geolocation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}
