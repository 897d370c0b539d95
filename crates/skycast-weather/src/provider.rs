//! Open-Meteo forecast retrieval.

use crate::http::{build_client, get_json};
use crate::types::{
    Coordinates, CurrentConditions, DailyForecastEntry, UnitSystem, WeatherReport, FORECAST_DAYS,
};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{ServicesConfig, WeatherError};
use std::sync::Arc;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m,visibility";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

// Every field is optional on the wire so a partial body becomes a typed
// error instead of a decode failure with no context.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<RawCurrent>,
    daily: Option<RawDaily>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    is_day: Option<u8>,
    weather_code: Option<i32>,
    wind_speed_10m: Option<f64>,
    /// Meters
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Option<Vec<String>>,
    temperature_2m_max: Option<Vec<Option<f64>>>,
    temperature_2m_min: Option<Vec<Option<f64>>>,
    weather_code: Option<Vec<Option<i32>>>,
}

/// Query parameters selecting the unit system; metric is the service default.
pub fn unit_query_params(unit: UnitSystem) -> &'static [(&'static str, &'static str)] {
    match unit {
        UnitSystem::Metric => &[],
        UnitSystem::Imperial => &[
            ("temperature_unit", "fahrenheit"),
            ("wind_speed_unit", "mph"),
            ("precipitation_unit", "inch"),
        ],
    }
}

#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: Arc<Client>,
    forecast_url: String,
}

impl WeatherFetcher {
    pub fn new(client: Arc<Client>, services: &ServicesConfig) -> Self {
        Self {
            client,
            forecast_url: services.forecast_url.clone(),
        }
    }

    pub fn from_config(services: &ServicesConfig) -> Result<Self, WeatherError> {
        let client = build_client(services)?;
        Ok(Self::new(Arc::new(client), services))
    }

    /// Fetch current conditions and a five-day forecast in one request.
    pub async fn fetch(
        &self,
        coordinates: Coordinates,
        unit: UnitSystem,
    ) -> Result<WeatherReport, WeatherError> {
        tracing::debug!(
            "Fetching {} forecast for {:.4}, {:.4}",
            unit.as_str(),
            coordinates.latitude(),
            coordinates.longitude()
        );

        let request = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", coordinates.latitude().to_string()),
                ("longitude", coordinates.longitude().to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .query(unit_query_params(unit));

        let body: ForecastResponse = get_json(request).await?;
        let report = parse_report(body, unit)?;

        tracing::info!(
            "Fetched weather: {:.1}° code {} with {} forecast days",
            report.current.temperature,
            report.current.weather_code,
            report.forecast.len()
        );
        Ok(report)
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, WeatherError> {
    value.ok_or_else(|| WeatherError::malformed(format!("missing field '{}'", field)))
}

fn parse_report(body: ForecastResponse, unit: UnitSystem) -> Result<WeatherReport, WeatherError> {
    let current = parse_current(required(body.current, "current")?)?;
    let forecast = parse_daily(required(body.daily, "daily")?)?;

    Ok(WeatherReport {
        current,
        forecast,
        unit,
    })
}

fn parse_current(raw: RawCurrent) -> Result<CurrentConditions, WeatherError> {
    let humidity = required(raw.relative_humidity_2m, "current.relative_humidity_2m")?;
    let visibility_m = required(raw.visibility, "current.visibility")?;

    Ok(CurrentConditions {
        temperature: required(raw.temperature_2m, "current.temperature_2m")?,
        feels_like: required(raw.apparent_temperature, "current.apparent_temperature")?,
        humidity_percent: humidity.round().clamp(0.0, 100.0) as u8,
        wind_speed: required(raw.wind_speed_10m, "current.wind_speed_10m")?,
        visibility_km: visibility_m / 1000.0,
        weather_code: required(raw.weather_code, "current.weather_code")?,
        is_day: required(raw.is_day, "current.is_day")? != 0,
    })
}

/// Take the first `FORECAST_DAYS` days; fewer is an error rather than a short list.
fn parse_daily(raw: RawDaily) -> Result<Vec<DailyForecastEntry>, WeatherError> {
    let time = required(raw.time, "daily.time")?;
    let max = required(raw.temperature_2m_max, "daily.temperature_2m_max")?;
    let min = required(raw.temperature_2m_min, "daily.temperature_2m_min")?;
    let codes = required(raw.weather_code, "daily.weather_code")?;

    let available = time.len().min(max.len()).min(min.len()).min(codes.len());
    if available < FORECAST_DAYS {
        return Err(WeatherError::malformed(format!(
            "expected {} forecast days, got {}",
            FORECAST_DAYS, available
        )));
    }

    (0..FORECAST_DAYS)
        .map(|i| {
            let date = NaiveDate::parse_from_str(&time[i], "%Y-%m-%d").map_err(|e| {
                WeatherError::malformed(format!("bad date '{}' in daily.time: {}", time[i], e))
            })?;

            Ok(DailyForecastEntry {
                date,
                max_temp: required(max[i], "daily.temperature_2m_max")?,
                min_temp: required(min[i], "daily.temperature_2m_min")?,
                weather_code: required(codes[i], "daily.weather_code")?,
            })
        })
        .collect()
}
