//! Shared HTTP plumbing for the geocoding and forecast services.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use skycast_core::{NetworkError, ReqwestErrorExt, ServicesConfig, WeatherError};

/// Build the client shared by every service call.
///
/// The timeout applies to each request; exceeding it surfaces as `NetworkError::Timeout`.
pub fn build_client(services: &ServicesConfig) -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(Duration::from_secs(services.request_timeout_secs))
        .user_agent(services.user_agent.as_str())
        .build()
        .map_err(|e| WeatherError::Network(e.into_network_error()))
}

/// Send a request and decode a JSON body.
///
/// Transport failures and non-success statuses are network errors; a body
/// that is not the expected JSON shape is a malformed response.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, WeatherError> {
    let response = request
        .send()
        .await
        .map_err(|e| WeatherError::Network(e.into_network_error()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WeatherError::Network(NetworkError::ServerError {
            status: status.as_u16(),
            message: format!("Request failed with status: {}", status),
        }));
    }

    let body = response
        .text()
        .await
        .map_err(|e| WeatherError::Network(e.into_network_error()))?;

    serde_json::from_str(&body).map_err(|e| WeatherError::malformed(e.to_string()))
}
