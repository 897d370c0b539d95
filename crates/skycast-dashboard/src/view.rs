//! Display-ready strings built from a weather report.

use chrono::NaiveDate;
use skycast_weather::{classify, PlaceDescriptor, UnitSystem, WeatherReport};

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    /// e.g. "Sat, Oct 18"
    pub day_label: String,
    pub max: String,
    pub min: String,
    pub condition: String,
    pub icon_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub place_label: String,
    /// e.g. "Saturday, October 18, 2026"
    pub date_line: String,
    pub temperature: String,
    pub condition: String,
    pub icon_key: String,
    pub icon_url: String,
    pub humidity: String,
    pub wind: String,
    pub feels_like: String,
    pub visibility: String,
    pub forecast: Vec<ForecastCard>,
    pub unit: UnitSystem,
}

fn degrees(value: f64) -> String {
    format!("{}°", value.round() as i64)
}

impl WeatherView {
    pub fn build(place: &PlaceDescriptor, report: &WeatherReport, today: NaiveDate) -> Self {
        let current = &report.current;
        let classification = classify(current.weather_code, current.is_day);

        let forecast = report
            .forecast
            .iter()
            .map(|day| {
                // Forecast cards always use the day icon
                let c = classify(day.weather_code, true);
                ForecastCard {
                    day_label: day.date.format("%a, %b %-d").to_string(),
                    max: degrees(day.max_temp),
                    min: degrees(day.min_temp),
                    condition: c.description.to_string(),
                    icon_key: c.icon_key,
                }
            })
            .collect();

        Self {
            place_label: place.label(),
            date_line: today.format("%A, %B %-d, %Y").to_string(),
            temperature: degrees(current.temperature),
            condition: classification.description.to_string(),
            icon_url: classification.icon_url(),
            icon_key: classification.icon_key,
            humidity: format!("{}%", current.humidity_percent),
            wind: format!(
                "{} {}",
                current.wind_speed.round() as i64,
                report.unit.wind_speed_label()
            ),
            feels_like: degrees(current.feels_like),
            visibility: format!("{:.1} km", current.visibility_km),
            forecast,
            unit: report.unit,
        }
    }
}
