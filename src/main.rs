use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use skycast_core::{Config, UnitSystem};
use skycast_dashboard::{DashboardController, DashboardState, FavoriteIndicator, WeatherView};
use skycast_weather::{FavoritesStore, JsonFileStore, KeyValueStore, StaticGeolocator, Theme};

#[derive(Parser)]
#[command(name = "skycast")]
#[command(about = "Current weather and a 5-day forecast for any city")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start in imperial units (°F, mph)
    #[arg(long, global = true)]
    imperial: bool,

    /// Device latitude, used in place of the configured position
    #[arg(long, global = true, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude, used in place of the configured position
    #[arg(long, global = true, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Weather for the current position, or the default city
    Show,
    /// Weather for a city
    Search { city: String },
    /// Weather for the current position only
    Locate,
    /// Look up a city and toggle it in favorites
    Favorite { city: String },
    /// Manage saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show or change the display theme
    Theme {
        /// light, dark, or toggle
        mode: Option<String>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    List,
    Add { name: String },
    Remove { name: String },
    /// Weather for a saved favorite
    Show { name: String },
}

type Dashboard = DashboardController<StaticGeolocator, DashboardState>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    skycast_core::init()?;

    let (mut config, _) =
        Config::load_validated(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.imperial {
        config.dashboard.unit = UnitSystem::Imperial;
    }

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("Failed to create data directory {}", config.data_dir.display())
    })?;
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::in_dir(&config.data_dir));
    let theme = Theme::load(store.as_ref());

    let position = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => config.location.position(),
    };
    let geolocator = StaticGeolocator::from_position(position);

    tracing::info!("SkyCast started (theme: {})", theme.as_str());

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let mut dashboard = dashboard(&config, store, geolocator)?;
            dashboard.startup().await;
            report(&dashboard, theme)?;
        }
        Commands::Search { city } => {
            let mut dashboard = dashboard(&config, store, geolocator)?;
            dashboard.search(&city).await;
            report(&dashboard, theme)?;
        }
        Commands::Locate => {
            let mut dashboard = dashboard(&config, store, geolocator)?;
            dashboard.locate().await;
            report(&dashboard, theme)?;
        }
        Commands::Favorite { city } => {
            let mut dashboard = dashboard(&config, store, geolocator)?;
            dashboard.search(&city).await;
            if dashboard.session().current_place.is_some() {
                dashboard.toggle_favorite();
            }
            report(&dashboard, theme)?;
        }
        Commands::Favorites { action } => match action {
            FavoritesAction::List => {
                print_favorites(FavoritesStore::load(store).list());
            }
            FavoritesAction::Add { name } => {
                if name.trim().is_empty() {
                    anyhow::bail!("Favorite name must not be empty");
                }
                let mut favorites = FavoritesStore::load(store);
                favorites
                    .add(name.trim())
                    .context("Failed to save favorites")?;
                print_favorites(favorites.list());
            }
            FavoritesAction::Remove { name } => {
                let mut dashboard = dashboard(&config, store, geolocator)?;
                dashboard.remove_favorite(name.trim());
                print_favorites(dashboard.renderer().favorites());
                fail_on_error(dashboard.renderer())?;
            }
            FavoritesAction::Show { name } => {
                let mut dashboard = dashboard(&config, store, geolocator)?;
                dashboard.select_favorite(&name).await;
                report(&dashboard, theme)?;
            }
        },
        Commands::Theme { mode } => {
            let next = match mode.as_deref().map(str::trim) {
                None => theme,
                Some(m) if m.eq_ignore_ascii_case("toggle") => theme.toggled(),
                Some(m) => m.parse::<Theme>().map_err(anyhow::Error::msg)?,
            };
            if next != theme {
                next.save(store.as_ref())
                    .context("Failed to save theme preference")?;
            }
            println!("Theme: {}", next.as_str());
        }
    }

    Ok(())
}

fn dashboard(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
    geolocator: StaticGeolocator,
) -> Result<Dashboard> {
    DashboardController::from_config(config, store, geolocator, DashboardState::new())
        .context("Failed to set up dashboard")
}

/// Print whatever the dashboard ended up showing; fail if it ended on an error.
fn report(dashboard: &Dashboard, theme: Theme) -> Result<()> {
    let state = dashboard.renderer();

    if let Some(view) = state.weather() {
        print_weather(view, state.favorite_indicator(), theme);
    }
    if !state.favorites().is_empty() {
        println!();
        print_favorites(state.favorites());
    }

    fail_on_error(state)
}

fn fail_on_error(state: &DashboardState) -> Result<()> {
    match state.error() {
        Some(message) => anyhow::bail!("{}", message),
        None => Ok(()),
    }
}

fn print_weather(view: &WeatherView, indicator: FavoriteIndicator, theme: Theme) {
    let star = match indicator {
        FavoriteIndicator::Active => "★",
        FavoriteIndicator::Inactive => " ",
    };
    let rule = match theme {
        Theme::Light => "-",
        Theme::Dark => "=",
    }
    .repeat(40);

    println!("{} {}", star, view.place_label);
    println!("  {}", view.date_line);
    println!("{}", rule);
    println!("  {}  {} [{}]", view.temperature, view.condition, view.icon_key);
    println!("  Feels like  {}", view.feels_like);
    println!("  Humidity    {}", view.humidity);
    println!("  Wind        {}", view.wind);
    println!("  Visibility  {}", view.visibility);
    println!("  Icon        {}", view.icon_url);
    println!("{}", rule);
    for card in &view.forecast {
        println!(
            "  {:<12} {:>5} / {:<5} {} [{}]",
            card.day_label, card.max, card.min, card.condition, card.icon_key
        );
    }
}

fn print_favorites(favorites: &[String]) {
    if favorites.is_empty() {
        println!("No favorites saved.");
        return;
    }
    println!("Favorites:");
    for name in favorites {
        println!("  - {}", name);
    }
}
