//! OpenWeatherMap current-conditions client
//!
//! One request per query, metric units, no retries and no timeout. Any
//! transport failure or non-success status collapses into
//! [`FetchError::NotFound`]; a body missing the fields we read becomes
//! [`FetchError::InvalidResponse`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::WidgetConfig;
use crate::query::LocationQuery;
use crate::state::WeatherReading;

/// Which query variant failed, for the user-facing message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    Name,
    Coords,
}

impl QueryKind {
    pub fn of(query: &LocationQuery) -> Self {
        match query {
            LocationQuery::ByName(_) => QueryKind::Name,
            LocationQuery::ByCoords { .. } => QueryKind::Coords,
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            QueryKind::Name => "City not found",
            QueryKind::Coords => "Weather data not available",
        }
    }
}

/// Weather fetch errors
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Unknown city, unreachable service or any non-success status
    #[error("{}", .0.not_found_message())]
    NotFound(QueryKind),

    /// The body did not contain the fields a reading needs
    #[error("Unexpected response from weather service")]
    InvalidResponse(String),
}

/// Fetches current conditions for a location
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReading, FetchError>;
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    sys: Sys,
    weather: Vec<Condition>,
    main: Main,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Sys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl CurrentWeatherResponse {
    fn into_reading(self) -> Result<WeatherReading, FetchError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::InvalidResponse("empty weather list".into()))?;

        Ok(WeatherReading {
            city: self.name,
            country: self.sys.country,
            description: condition.description,
            icon: condition.icon,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
        })
    }
}

/// Parse a current-weather JSON body into a reading
pub fn parse_reading(body: &str) -> Result<WeatherReading, FetchError> {
    let response: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
    response.into_reading()
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the OpenWeatherMap `weather` endpoint
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &WidgetConfig) -> Self {
        Self::new(client, config.base_url.clone(), config.api_key.clone())
    }

    fn query_params(&self, query: &LocationQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            LocationQuery::ByName(city) => vec![("q", city.clone())],
            LocationQuery::ByCoords { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReading, FetchError> {
        let kind = QueryKind::of(query);
        let not_found = |e: reqwest::Error| {
            warn!(error = %e, "Weather request failed");
            FetchError::NotFound(kind)
        };

        info!("Fetching current weather");
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(not_found)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Weather service returned an error status");
            return Err(FetchError::NotFound(kind));
        }

        let body = response.text().await.map_err(not_found)?;
        let reading = parse_reading(&body).inspect_err(|e| {
            if let FetchError::InvalidResponse(detail) = e {
                warn!(%detail, "Weather response did not match the expected shape");
            }
        })?;

        debug!(city = %reading.city, temp = reading.temperature, "Weather loaded");
        Ok(reading)
    }
}
