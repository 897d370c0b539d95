//! Dashboard layer for SkyCast
//!
//! Drives user actions (search, locate, unit toggle, favorites) through the
//! weather pipeline and hands display-ready views to a [`Renderer`].

pub mod controller;
pub mod render;
pub mod session;
pub mod view;

pub use controller::{DashboardController, DashboardOptions};
pub use render::{DashboardState, FavoriteIndicator, Renderer};
pub use session::SessionState;
pub use view::{ForecastCard, WeatherView};
