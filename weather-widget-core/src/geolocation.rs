//! "Use my location" capability
//!
//! A terminal has no position sensor, so the provider is chosen at startup:
//! fixed coordinates from the command line, an IP lookup service, or nothing.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::query::Coordinates;

pub const DEFAULT_IP_LOCATION_URL: &str = "http://ip-api.com/json";

/// Geolocation errors, displayed verbatim to the user
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,

    /// Denied, timed out or no position; the detail is only logged
    #[error("Unable to retrieve your location")]
    Unavailable(String),
}

/// One-shot current position lookup
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether this provider can ever produce a position
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// No geolocation available
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Always reports the same coordinates
#[derive(Clone, Copy, Debug)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Approximate position from the public IP address
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    client: Client,
    url: String,
}

impl IpLocationProvider {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, DEFAULT_IP_LOCATION_URL)
    }

    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let unavailable = |e: reqwest::Error| {
            warn!(error = %e, "IP location lookup failed");
            GeolocationError::Unavailable(e.to_string())
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;
        let body: IpLocationResponse = response.json().await.map_err(unavailable)?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => {
                debug!(lat, lon, "Resolved position from IP");
                Ok(Coordinates { lat, lon })
            }
            _ => {
                let reason = body.message.unwrap_or(body.status);
                warn!(%reason, "IP location lookup returned no position");
                Err(GeolocationError::Unavailable(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GeolocationError::Unsupported.to_string(),
            "Geolocation is not supported by your browser"
        );
        assert_eq!(
            GeolocationError::Unavailable("denied".into()).to_string(),
            "Unable to retrieve your location"
        );
    }

    #[tokio::test]
    async fn test_no_location_is_unsupported() {
        assert!(!NoLocation.is_supported());
        assert_eq!(
            NoLocation.current_position().await,
            Err(GeolocationError::Unsupported)
        );
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let coords = Coordinates { lat: 1.5, lon: -2.5 };
        let provider = FixedLocation(coords);
        assert!(provider.is_supported());
        assert_eq!(provider.current_position().await, Ok(coords));
    }

    #[tokio::test]
    async fn test_ip_location_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "lat": 52.52,
                "lon": 13.405
            })))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::with_url(Client::new(), server.uri());
        let coords = provider.current_position().await.unwrap();
        assert_eq!(coords, Coordinates { lat: 52.52, lon: 13.405 });
    }

    #[tokio::test]
    async fn test_ip_location_fail_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "message": "reserved range"
            })))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::with_url(Client::new(), server.uri());
        assert_eq!(
            provider.current_position().await,
            Err(GeolocationError::Unavailable("reserved range".into()))
        );
    }

    #[tokio::test]
    async fn test_ip_location_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::with_url(Client::new(), server.uri());
        assert!(matches!(
            provider.current_position().await,
            Err(GeolocationError::Unavailable(_))
        ));
    }
}
