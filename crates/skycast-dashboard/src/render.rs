//! Rendering surface seam.

use crate::view::WeatherView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteIndicator {
    Active,
    #[default]
    Inactive,
}

impl FavoriteIndicator {
    pub fn from_membership(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteIndicator::Active
        } else {
            FavoriteIndicator::Inactive
        }
    }
}

/// Whatever displays the dashboard. The controller drives it; it never calls back.
pub trait Renderer {
    fn set_loading(&mut self, loading: bool);

    fn show_error(&mut self, message: &str);

    fn clear_error(&mut self);

    fn render_weather(&mut self, view: &WeatherView);

    fn set_favorite_indicator(&mut self, indicator: FavoriteIndicator);

    fn render_favorites(&mut self, favorites: &[String]);
}

/// Renderer that keeps the last rendered state in memory.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    loading: bool,
    loading_cycles: usize,
    error: Option<String>,
    weather: Option<WeatherView>,
    favorite: FavoriteIndicator,
    favorites: Vec<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// How many times loading was switched on
    pub fn loading_cycles(&self) -> usize {
        self.loading_cycles
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn weather(&self) -> Option<&WeatherView> {
        self.weather.as_ref()
    }

    pub fn favorite_indicator(&self) -> FavoriteIndicator {
        self.favorite
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }
}

impl Renderer for DashboardState {
    fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            self.loading_cycles += 1;
        }
        self.loading = loading;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn render_weather(&mut self, view: &WeatherView) {
        self.weather = Some(view.clone());
    }

    fn set_favorite_indicator(&mut self, indicator: FavoriteIndicator) {
        self.favorite = indicator;
    }

    fn render_favorites(&mut self, favorites: &[String]) {
        self.favorites = favorites.to_vec();
    }
}
