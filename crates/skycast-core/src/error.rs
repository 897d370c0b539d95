//! Error types shared by the weather pipeline and the dashboard.
//!
//! Every variant maps to a short display message via `user_message()`, so the
//! dashboard never shows raw transport or decode errors.

use thiserror::Error;

/// Failures talking to the geocoding or forecast services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Could not reach service: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Service returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Unreadable response body: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Could not reach the weather service. Check your connection."
            }
            NetworkError::Timeout => {
                "The weather service took too long to answer. Please try again."
            }
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The weather service rejected the request.",
            NetworkError::InvalidResponse(_) => "The weather service sent an unreadable reply.",
        }
    }
}

/// Local key-value storage errors (favorites, theme).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to read storage: {0}")]
    Read(String),

    #[error("Failed to write storage: {0}")]
    Write(String),

    #[error("Failed to serialize value: {0}")]
    Serialize(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Read(_) => "Saved preferences could not be read.",
            StorageError::Write(_) | StorageError::Serialize(_) => {
                "Could not save favorites. Please try again."
            }
        }
    }
}

/// Failures of the location-resolution and weather-retrieval pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// Forward geocoding produced no candidate.
    #[error("City not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The service answered but required fields were absent or unusable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Location permission denied")]
    PermissionDenied,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WeatherError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        WeatherError::MalformedResponse(detail.into())
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::NotFound(_) => "City not found",
            WeatherError::Network(e) => e.user_message(),
            WeatherError::MalformedResponse(_) => {
                "Received incomplete weather data. Please try again."
            }
            WeatherError::PermissionDenied => "Location access denied.",
            WeatherError::Storage(e) => e.user_message(),
        }
    }
}

/// Classify a reqwest failure.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
