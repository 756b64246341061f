//! Application state - single source of truth
//!
//! Only the reducer mutates `AppState`. Renderers receive a derived
//! [`Screen`](crate::view::Screen) and never see the state directly.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::history::RecentSearches;
use crate::query::LocationQuery;
use crate::units::{round_half_up, to_fahrenheit};

/// Current conditions as returned by the weather service (metric units)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub description: String,
    /// Service icon identifier, e.g. `01d`
    pub icon: String,
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    /// %
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// hPa
    pub pressure: f64,
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    /// Format a Celsius value in this unit, rounded, with suffix.
    pub fn format(self, celsius: f64) -> String {
        let value = match self {
            Unit::Celsius => round_half_up(celsius),
            Unit::Fahrenheit => round_half_up(to_fahrenheit(celsius)),
        };
        format!("{}{}", value, self.symbol())
    }
}

impl FromStr for Unit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" | "metric" => Ok(Unit::Celsius),
            "f" | "fahrenheit" | "imperial" => Ok(Unit::Fahrenheit),
            other => Err(ConfigError::UnknownUnit(other.to_string())),
        }
    }
}

/// What a unit change does to the displayed reading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitChangePolicy {
    /// Re-derive temperatures from the stored reading
    #[default]
    Recompute,
    /// Fetch the displayed city again by name, recording it in history
    Refetch,
}

/// Which region of the widget is visible
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Presentation {
    #[default]
    Idle,
    Loading,
    Loaded(WeatherReading),
    Error(String),
}

impl Presentation {
    pub fn is_loading(&self) -> bool {
        matches!(self, Presentation::Loading)
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            Presentation::Loaded(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Presentation::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// The last successful fetch and the query that produced it
#[derive(Clone, Debug, PartialEq)]
pub struct LastSuccess {
    pub query: LocationQuery,
    pub reading: WeatherReading,
}

/// Application state - everything the surface needs to render
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub presentation: Presentation,

    pub unit: Unit,

    pub unit_change: UnitChangePolicy,

    /// Search field contents
    pub input: String,

    /// Recent city searches, most recent first
    pub recent: RecentSearches,

    /// City restored at startup (most recent successful name search)
    pub last_city: Option<String>,

    /// Survives Loading/Error so a unit change can still find the city
    pub last_success: Option<LastSuccess>,

    /// Whether a location provider is available at all
    pub geolocation_supported: bool,
}

impl AppState {
    pub fn new(recent: RecentSearches, last_city: Option<String>) -> Self {
        Self {
            recent,
            last_city,
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_unit_change(mut self, policy: UnitChangePolicy) -> Self {
        self.unit_change = policy;
        self
    }

    pub fn with_geolocation(mut self, supported: bool) -> Self {
        self.geolocation_supported = supported;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.presentation.is_loading()
    }
}
