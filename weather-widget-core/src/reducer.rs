//! Reducer - (state, action) -> (changed, effects)
//!
//! Presentation transitions:
//!
//! ```text
//! Idle ──fetch start──► Loading ──WeatherDidLoad──► Loaded
//!                          │  ▲                        │
//!                          │  └──────fetch start───────┤
//!                          └──WeatherDidError──► Error ┘
//! ```
//!
//! History is only touched by a successful fetch-by-name.

use crate::action::Action;
use crate::effect::Effect;
use crate::geolocation::GeolocationError;
use crate::query::{resolve_text, LocationQuery};
use crate::state::{AppState, LastSuccess, Presentation, UnitChangePolicy};
use crate::store::DispatchResult;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::AppStart => match state.last_city.clone() {
            Some(city) => start_fetch(state, LocationQuery::ByName(city)),
            None => DispatchResult::unchanged(),
        },

        Action::SearchInputChange(value) => {
            if state.input == value {
                return DispatchResult::unchanged();
            }
            state.input = value;
            DispatchResult::changed()
        }

        // Blank input is a silent no-op
        Action::SearchSubmit => match resolve_text(&state.input) {
            Some(query) => start_fetch(state, query),
            None => DispatchResult::unchanged(),
        },

        Action::LocationRequest => {
            if !state.geolocation_supported {
                state.presentation = Presentation::Error(GeolocationError::Unsupported.to_string());
                return DispatchResult::changed();
            }
            state.presentation = Presentation::Loading;
            DispatchResult::changed_with(Effect::Locate)
        }

        // Still Loading from LocationRequest
        Action::LocationDidResolve(coords) => {
            DispatchResult::effect(Effect::FetchWeather(coords.into()))
        }

        Action::LocationDidFail(error) => {
            state.presentation = Presentation::Error(error.to_string());
            DispatchResult::changed()
        }

        Action::RecentSelect(city) => {
            state.input = city.clone();
            start_fetch(state, LocationQuery::ByName(city))
        }

        Action::UnitSelect(unit) => {
            if unit == state.unit {
                return DispatchResult::unchanged();
            }
            state.unit = unit;

            match state.unit_change {
                UnitChangePolicy::Recompute => DispatchResult::changed(),
                UnitChangePolicy::Refetch => {
                    let displayed_city = state
                        .last_success
                        .as_ref()
                        .map(|last| last.reading.city.clone())
                        .filter(|city| !city.is_empty());
                    match displayed_city {
                        Some(city) => start_fetch(state, LocationQuery::ByName(city)),
                        None => DispatchResult::changed(),
                    }
                }
            }
        }

        Action::WeatherDidLoad { query, reading } => {
            let city = query.city().map(str::to_owned);
            state.presentation = Presentation::Loaded(reading.clone());
            state.last_success = Some(LastSuccess { query, reading });

            match city {
                Some(city) => {
                    state.recent.record(&city);
                    state.last_city = Some(city.clone());
                    DispatchResult::changed_with_many(vec![
                        Effect::PersistRecent(state.recent.clone()),
                        Effect::PersistLastCity(city),
                    ])
                }
                None => DispatchResult::changed(),
            }
        }

        Action::WeatherDidError { error, .. } => {
            state.presentation = Presentation::Error(error.to_string());
            DispatchResult::changed()
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn start_fetch(state: &mut AppState, query: LocationQuery) -> DispatchResult<Effect> {
    state.presentation = Presentation::Loading;
    DispatchResult::changed_with(Effect::FetchWeather(query))
}
