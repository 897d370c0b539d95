//! Weather pipeline for SkyCast
//!
//! Resolves places via forward and reverse geocoding, retrieves Open-Meteo
//! forecasts in either unit system, and persists favorites and theme.

pub mod condition;
pub mod favorites;
pub mod geocode;
mod http;
pub mod location;
pub mod provider;
pub mod storage;
pub mod theme;
pub mod types;

pub use condition::{classify, Classification};
pub use favorites::FavoritesStore;
pub use geocode::LocationResolver;
pub use http::build_client;
pub use location::{Geolocator, StaticGeolocator};
pub use provider::WeatherFetcher;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;
pub use types::*;

pub use skycast_core::{NetworkError, StorageError, WeatherError};
