//! Actions
//!
//! Naming follows the intent/result convention: `SearchSubmit` and
//! `LocationRequest` are intents, the `*Did*` variants carry the outcome of
//! async work back into the reducer.

use crate::api::FetchError;
use crate::geolocation::GeolocationError;
use crate::query::{Coordinates, LocationQuery};
use crate::state::{Unit, WeatherReading};
use crate::store::ActionSummary;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// History loaded; re-query the last city if there is one
    AppStart,

    /// Search field edited
    SearchInputChange(String),

    /// Search button or Enter in the search field
    SearchSubmit,

    /// "Use my location"
    LocationRequest,

    LocationDidResolve(Coordinates),

    LocationDidFail(GeolocationError),

    /// A recent-search entry was chosen
    RecentSelect(String),

    UnitSelect(Unit),

    WeatherDidLoad {
        query: LocationQuery,
        reading: WeatherReading,
    },

    WeatherDidError {
        query: LocationQuery,
        error: FetchError,
    },

    Quit,
}

impl Action {
    /// Results of spawned work (fetch or geolocation)
    pub fn is_async_result(&self) -> bool {
        matches!(
            self,
            Action::LocationDidResolve(_)
                | Action::LocationDidFail(_)
                | Action::WeatherDidLoad { .. }
                | Action::WeatherDidError { .. }
        )
    }
}

impl ActionSummary for Action {
    /// Concise log line instead of the full reading
    fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad { query, reading } => format!(
                "WeatherDidLoad {{ query: {}, temp: {:.1}°C, icon: {} }}",
                query, reading.temperature, reading.icon
            ),
            Action::WeatherDidError { query, error } => {
                format!("WeatherDidError {{ query: {}, error: {:?} }}", query, error)
            }
            // Keystrokes are noisy and may contain half-typed input
            Action::SearchInputChange(value) => {
                format!("SearchInputChange({} chars)", value.chars().count())
            }
            _ => format!("{:?}", self),
        }
    }
}
