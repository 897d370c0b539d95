//! Dashboard orchestration: one user action at a time.
//!
//! Every action takes `&mut self`, so resolve+fetch cycles for a session
//! can never interleave. Errors stop here: each one becomes a message on
//! the renderer and the loading indicator is always switched off again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use skycast_core::{Config, DashboardConfig, WeatherError};
use skycast_weather::location::locate_within;
use skycast_weather::{
    build_client, Coordinates, FavoritesStore, Geolocator, KeyValueStore, LocationResolver,
    PlaceDescriptor, UnitSystem, WeatherFetcher,
};

use crate::render::{FavoriteIndicator, Renderer};
use crate::session::SessionState;
use crate::view::WeatherView;

/// Startup behavior and initial session settings
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub default_city: String,
    pub unit: UnitSystem,
    pub geolocation_timeout: Duration,
}

impl DashboardOptions {
    pub fn from_config(dashboard: &DashboardConfig) -> Self {
        Self {
            default_city: dashboard.default_city.clone(),
            unit: dashboard.unit,
            geolocation_timeout: Duration::from_secs(dashboard.geolocation_timeout_secs),
        }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

pub struct DashboardController<G: Geolocator, R: Renderer> {
    resolver: LocationResolver,
    fetcher: WeatherFetcher,
    favorites: FavoritesStore,
    geolocator: G,
    renderer: R,
    session: SessionState,
    default_city: String,
    geolocation_timeout: Duration,
}

impl<G: Geolocator, R: Renderer> DashboardController<G, R> {
    pub fn new(
        resolver: LocationResolver,
        fetcher: WeatherFetcher,
        favorites: FavoritesStore,
        geolocator: G,
        renderer: R,
        options: DashboardOptions,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            favorites,
            geolocator,
            renderer,
            session: SessionState::new(options.unit),
            default_city: options.default_city,
            geolocation_timeout: options.geolocation_timeout,
        }
    }

    /// Wire a controller from configuration, sharing one HTTP client.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        geolocator: G,
        renderer: R,
    ) -> Result<Self, WeatherError> {
        let client = Arc::new(build_client(&config.services)?);
        Ok(Self::new(
            LocationResolver::new(client.clone(), &config.services),
            WeatherFetcher::new(client, &config.services),
            FavoritesStore::load(store),
            geolocator,
            renderer,
            DashboardOptions::from_config(&config.dashboard),
        ))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Show favorites, then weather for the device position or the default city.
    pub async fn startup(&mut self) {
        tracing::info!("Dashboard starting");
        self.refresh_favorites();

        self.begin_action();
        let located = locate_within(&self.geolocator, self.geolocation_timeout).await;
        let outcome = match located {
            Ok(coordinates) => self.load_coordinates(coordinates).await,
            Err(e) => {
                tracing::info!(
                    "Geolocation unavailable ({}), falling back to {}",
                    e,
                    self.default_city
                );
                let city = self.default_city.clone();
                self.load_by_name(&city).await
            }
        };
        self.finish_action(outcome);
    }

    /// Resolve a place name and show its weather. Blank queries are ignored.
    pub async fn search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        tracing::info!("Search: {}", query);
        self.begin_action();
        let outcome = self.load_by_name(query).await;
        self.finish_action(outcome);
    }

    /// Show weather for the device position; any geolocation failure is reported as denied.
    pub async fn locate(&mut self) {
        tracing::info!("Locate requested");
        self.begin_action();
        let located = locate_within(&self.geolocator, self.geolocation_timeout).await;
        let outcome = match located {
            Ok(coordinates) => self.load_coordinates(coordinates).await,
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                Err(WeatherError::PermissionDenied)
            }
        };
        self.finish_action(outcome);
    }

    /// Switch unit systems, re-fetching the current place if there is one.
    ///
    /// The place is not re-resolved. If the re-fetch fails the previous unit
    /// is restored so the session matches what is on screen.
    pub async fn toggle_unit(&mut self) {
        let previous = self.session.current_unit;
        self.session.current_unit = previous.toggled();
        tracing::info!("Unit system: {}", self.session.current_unit.as_str());

        let Some(place) = self.session.current_place.clone() else {
            return;
        };

        self.begin_action();
        let outcome = self.load_place(place).await;
        if outcome.is_err() {
            self.session.current_unit = previous;
        }
        self.finish_action(outcome);
    }

    /// Add or remove the current place from favorites.
    pub fn toggle_favorite(&mut self) {
        let Some(name) = self.session.current_place_name().map(str::to_string) else {
            return;
        };

        if let Err(e) = self.favorites.toggle(&name) {
            tracing::error!("Failed to update favorites: {}", e);
            self.renderer
                .show_error(WeatherError::from(e).user_message());
        }
        self.refresh_favorites();
    }

    pub fn remove_favorite(&mut self, name: &str) {
        if let Err(e) = self.favorites.remove(name) {
            tracing::error!("Failed to remove favorite {}: {}", name, e);
            self.renderer
                .show_error(WeatherError::from(e).user_message());
        }
        self.refresh_favorites();
    }

    /// Show weather for a saved favorite.
    pub async fn select_favorite(&mut self, name: &str) {
        self.search(name).await;
    }

    fn begin_action(&mut self) {
        self.renderer.clear_error();
        self.renderer.set_loading(true);
    }

    fn finish_action(&mut self, outcome: Result<(), WeatherError>) {
        if let Err(e) = outcome {
            tracing::warn!("Dashboard action failed: {}", e);
            self.renderer.show_error(e.user_message());
        }
        self.renderer.set_loading(false);
    }

    async fn load_by_name(&mut self, query: &str) -> Result<(), WeatherError> {
        let place = self.resolver.resolve_by_name(query).await?;
        self.load_place(place).await
    }

    async fn load_coordinates(&mut self, coordinates: Coordinates) -> Result<(), WeatherError> {
        let place = self.resolver.resolve_by_coordinates(coordinates).await;
        self.load_place(place).await
    }

    /// Fetch and render; the session only moves to `place` once its weather is shown.
    async fn load_place(&mut self, place: PlaceDescriptor) -> Result<(), WeatherError> {
        let report = self
            .fetcher
            .fetch(place.coordinates(), self.session.current_unit)
            .await?;

        let view = WeatherView::build(&place, &report, Local::now().date_naive());
        self.renderer.render_weather(&view);
        self.session.current_place = Some(place);
        self.refresh_favorite_indicator();
        Ok(())
    }

    fn refresh_favorite_indicator(&mut self) {
        let is_favorite = self
            .session
            .current_place_name()
            .is_some_and(|name| self.favorites.contains(name));
        self.renderer
            .set_favorite_indicator(FavoriteIndicator::from_membership(is_favorite));
    }

    fn refresh_favorites(&mut self) {
        self.renderer.render_favorites(self.favorites.list());
        self.refresh_favorite_indicator();
    }
}
