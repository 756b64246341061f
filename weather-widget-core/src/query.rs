//! Location queries and input resolution

use std::fmt;

/// A point on the globe, as reported by a [`LocationProvider`](crate::geolocation::LocationProvider)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What to ask the weather service for
#[derive(Clone, Debug, PartialEq)]
pub enum LocationQuery {
    /// City name exactly as the user typed it (after trimming)
    ByName(String),
    /// Latitude/longitude pair
    ByCoords { lat: f64, lon: f64 },
}

impl LocationQuery {
    pub fn by_name(city: impl Into<String>) -> Self {
        LocationQuery::ByName(city.into())
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            LocationQuery::ByName(city) => Some(city),
            LocationQuery::ByCoords { .. } => None,
        }
    }
}

impl From<Coordinates> for LocationQuery {
    fn from(coords: Coordinates) -> Self {
        LocationQuery::ByCoords {
            lat: coords.lat,
            lon: coords.lon,
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::ByName(city) => write!(f, "{city}"),
            LocationQuery::ByCoords { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

/// Turn raw search-field text into a query.
///
/// Blank input yields `None`: the search is silently skipped.
pub fn resolve_text(input: &str) -> Option<LocationQuery> {
    let city = input.trim();
    if city.is_empty() {
        None
    } else {
        Some(LocationQuery::by_name(city))
    }
}
