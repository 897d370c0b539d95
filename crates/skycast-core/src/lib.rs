pub mod config;
pub mod error;

pub use config::{
    Config, DashboardConfig, LocationConfig, ServicesConfig, UnitSystem, ValidationResult,
};
pub use error::{NetworkError, ReqwestErrorExt, StorageError, WeatherError};

use anyhow::Result;

/// Initialize logging for the process.
///
/// Logs go to stderr so stdout stays reserved for dashboard output.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
