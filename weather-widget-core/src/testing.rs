//! Test utilities for the weather widget
//!
//! - [`StubFetcher`]: scripted weather results keyed by query, with a call log
//! - [`StubLocator`]: geolocation that returns a fixed outcome
//! - [`RecordingRenderer`]: keeps every rendered [`Screen`]
//! - [`assert_effect!`](crate::assert_effect) / [`count_effects!`](crate::count_effects)
//!
//! ```ignore
//! use weather_widget_core::testing::*;
//!
//! let fetcher = Arc::new(StubFetcher::new().with_reading("Paris", paris()));
//! let mut widget = Widget::new(&config, fetcher.clone(), Arc::new(NoLocation),
//!     MemoryStore::new(), RecordingRenderer::new());
//!
//! widget.dispatch(Action::RecentSelect("Paris".into()))?;
//! widget.settle().await?;
//! assert_eq!(fetcher.call_count(), 1);
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{FetchError, QueryKind, WeatherFetcher};
use crate::geolocation::{GeolocationError, LocationProvider};
use crate::query::{Coordinates, LocationQuery};
use crate::state::WeatherReading;
use crate::view::{Renderer, Screen};

pub use crate::storage::MemoryStore;

/// A `WeatherReading` for Paris at 20°C, wind 3 m/s
pub fn paris() -> WeatherReading {
    WeatherReading {
        city: "Paris".into(),
        country: "FR".into(),
        description: "clear sky".into(),
        icon: "01d".into(),
        temperature: 20.0,
        feels_like: 19.0,
        humidity: 60.0,
        wind_speed: 3.0,
        pressure: 1012.0,
    }
}

/// Reading for `city` with otherwise Paris-like values
pub fn reading_for(city: &str, country: &str) -> WeatherReading {
    WeatherReading {
        city: city.into(),
        country: country.into(),
        ..paris()
    }
}

/// Scripted [`WeatherFetcher`]
///
/// Results are keyed by the query's display form (`"Paris"` or
/// `"48.8566,2.3522"`). Unscripted queries fail with
/// [`FetchError::NotFound`].
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<WeatherReading, FetchError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<LocationQuery>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(mut self, key: impl Into<String>, reading: WeatherReading) -> Self {
        self.responses.insert(key.into(), Ok(reading));
        self
    }

    pub fn with_error(mut self, key: impl Into<String>, error: FetchError) -> Self {
        self.responses.insert(key.into(), Err(error));
        self
    }

    /// Hold the response for `key` back by `delay`.
    pub fn with_delay(mut self, key: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(key.into(), delay);
        self
    }

    pub fn calls(&self) -> Vec<LocationQuery> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl WeatherFetcher for StubFetcher {
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReading, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }

        let key = query.to_string();
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }

        self.responses
            .get(&key)
            .cloned()
            .unwrap_or(Err(FetchError::NotFound(QueryKind::of(query))))
    }
}

/// [`LocationProvider`] with a fixed outcome
#[derive(Clone, Debug)]
pub struct StubLocator {
    supported: bool,
    result: Result<Coordinates, GeolocationError>,
}

impl StubLocator {
    pub fn at(lat: f64, lon: f64) -> Self {
        Self {
            supported: true,
            result: Ok(Coordinates { lat, lon }),
        }
    }

    /// Supported, but the lookup fails (permission denied, timeout...)
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            supported: true,
            result: Err(GeolocationError::Unavailable(reason.into())),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            result: Err(GeolocationError::Unsupported),
        }
    }
}

#[async_trait]
impl LocationProvider for StubLocator {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.result.clone()
    }
}

/// Renderer that records every frame
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<Screen>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Screen] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Screen> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    type Error = Infallible;

    fn render(&mut self, screen: &Screen) -> Result<(), Self::Error> {
        self.frames.push(screen.clone());
        Ok(())
    }
}

/// Assert that an effect matching a pattern was returned.
///
/// ```ignore
/// let result = reducer(&mut state, Action::SearchSubmit);
/// assert_effect!(result.effects, Effect::FetchWeather(LocationQuery::ByName(_)));
/// ```
#[macro_export]
macro_rules! assert_effect {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $effects.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected effect matching `{}`, but got: {:?}",
            stringify!($pattern),
            $effects
        );
    };
}

/// Count effects matching a pattern.
#[macro_export]
macro_rules! count_effects {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        $effects.iter().filter(|e| matches!(e, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;

    #[tokio::test]
    async fn test_stub_fetcher_scripted_and_default() {
        let fetcher = StubFetcher::new()
            .with_reading("Paris", paris())
            .with_error("Oslo", FetchError::InvalidResponse("bad".into()));

        assert_eq!(
            fetcher.fetch(&LocationQuery::by_name("Paris")).await,
            Ok(paris())
        );
        assert!(matches!(
            fetcher.fetch(&LocationQuery::by_name("Oslo")).await,
            Err(FetchError::InvalidResponse(_))
        ));
        assert_eq!(
            fetcher
                .fetch(&LocationQuery::ByCoords { lat: 1.0, lon: 2.0 })
                .await,
            Err(FetchError::NotFound(QueryKind::Coords))
        );
        assert_eq!(fetcher.call_count(), 3);
    }

    #[test]
    fn test_effect_macros() {
        let effects = vec![
            Effect::Locate,
            Effect::PersistLastCity("Paris".into()),
            Effect::Locate,
        ];
        assert_effect!(effects, Effect::PersistLastCity(city) if city == "Paris");
        assert_eq!(count_effects!(effects, Effect::Locate), 2);
        assert_eq!(count_effects!(effects, Effect::FetchWeather(_)), 0);
    }

    #[test]
    fn test_recording_renderer() {
        let mut renderer = RecordingRenderer::new();
        assert!(renderer.last().is_none());
        let _ = renderer.render(&Screen::default());
        assert_eq!(renderer.frames().len(), 1);
    }
}
