//! Integration tests for WeatherFetcher using wiremock.

use std::time::Duration;

use chrono::NaiveDate;
use skycast_core::ServicesConfig;
use skycast_weather::{
    Coordinates, NetworkError, UnitSystem, WeatherError, WeatherFetcher, FORECAST_DAYS,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn fetcher(server: &MockServer) -> WeatherFetcher {
    let services = ServicesConfig {
        forecast_url: format!("{}/v1/forecast", server.uri()),
        request_timeout_secs: 1,
        ..ServicesConfig::default()
    };
    WeatherFetcher::from_config(&services).unwrap()
}

fn delhi() -> Coordinates {
    Coordinates::new(28.61, 77.21).unwrap()
}

/// Open-Meteo style body with `days` daily entries
fn forecast_body(days: usize) -> serde_json::Value {
    let time: Vec<String> = (1..=days).map(|d| format!("2026-10-{:02}", d)).collect();
    let max: Vec<f64> = (0..days).map(|d| 31.0 + d as f64).collect();
    let min: Vec<f64> = (0..days).map(|d| 21.0 + d as f64).collect();
    let codes: Vec<i32> = (0..days).map(|d| [0, 1, 2, 3, 61][d % 5]).collect();

    serde_json::json!({
        "latitude": 28.625,
        "longitude": 77.25,
        "timezone": "Asia/Kolkata",
        "current": {
            "time": "2026-10-18T12:00",
            "temperature_2m": 30.4,
            "relative_humidity_2m": 48,
            "apparent_temperature": 32.1,
            "is_day": 1,
            "weather_code": 2,
            "wind_speed_10m": 7.6,
            "visibility": 24140.0
        },
        "daily": {
            "time": time,
            "weather_code": codes,
            "temperature_2m_max": max,
            "temperature_2m_min": min
        }
    })
}

#[tokio::test]
async fn test_fetch_metric_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "28.61"))
        .and(query_param("longitude", "77.21"))
        .and(query_param("timezone", "auto"))
        .and(query_param("daily", "weather_code,temperature_2m_max,temperature_2m_min"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(report.unit, UnitSystem::Metric);
    assert_eq!(report.current.temperature, 30.4);
    assert_eq!(report.current.feels_like, 32.1);
    assert_eq!(report.current.humidity_percent, 48);
    assert_eq!(report.current.weather_code, 2);
    assert!(report.current.is_day);
    assert!((report.current.visibility_km - 24.14).abs() < 1e-9);

    assert_eq!(report.forecast.len(), FORECAST_DAYS);
    let dates: Vec<NaiveDate> = report.forecast.iter().map(|d| d.date).collect();
    let expected: Vec<NaiveDate> = (1..=5)
        .map(|d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap())
        .collect();
    assert_eq!(dates, expected);
    assert_eq!(report.forecast[4].weather_code, 61);
}

#[tokio::test]
async fn test_fetch_metric_omits_unit_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(5)))
        .mount(&mock_server)
        .await;

    fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .unwrap();

    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let has_unit_param = requests[0]
        .url
        .query_pairs()
        .any(|(k, _)| k.ends_with("_unit"));
    assert!(!has_unit_param, "metric request carried unit overrides: {}", requests[0].url);
}

#[tokio::test]
async fn test_fetch_imperial_sends_unit_overrides() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("wind_speed_unit", "mph"))
        .and(query_param("precipitation_unit", "inch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Imperial)
        .await
        .unwrap();
    assert_eq!(report.unit, UnitSystem::Imperial);
}

#[tokio::test]
async fn test_fetch_requests_current_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m,visibility",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_fetch_too_few_days_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3)))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)), "{:?}", err);
}

#[tokio::test]
async fn test_fetch_missing_current_block_is_malformed() {
    let mock_server = MockServer::start().await;

    let mut body = forecast_body(5);
    if let Some(obj) = body.as_object_mut() {
        obj.remove("current");
    }

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_fetch_api_error_status_is_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WeatherError::Network(NetworkError::ServerError { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_fetch_slow_service_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(5))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server)
        .fetch(delhi(), UnitSystem::Metric)
        .await
        .unwrap_err();
    assert_eq!(err, WeatherError::Network(NetworkError::Timeout));
}
