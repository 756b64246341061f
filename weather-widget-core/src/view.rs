//! Render-ready view derived from [`AppState`]
//!
//! Every string the surface shows is formatted here, so a renderer only lays
//! text out. Temperatures are derived from the stored Celsius reading on each
//! call, which is what lets a unit change re-render without a fetch.

use crate::state::{AppState, Presentation, Unit, WeatherReading};
use crate::units::wind_kmh;

/// Formatted weather detail for the loaded region
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherView {
    /// `"{city}, {country}"`
    pub location_label: String,
    pub icon: String,
    pub icon_url: String,
    pub description: String,
    /// Unformatted °C, for styling
    pub celsius: f64,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
}

impl WeatherView {
    pub fn new(reading: &WeatherReading, unit: Unit, icon_base_url: &str) -> Self {
        Self {
            location_label: format!("{}, {}", reading.city, reading.country),
            icon: reading.icon.clone(),
            icon_url: icon_url(icon_base_url, &reading.icon),
            description: reading.description.clone(),
            celsius: reading.temperature,
            temperature: unit.format(reading.temperature),
            feels_like: unit.format(reading.feels_like),
            humidity: format!("{}%", reading.humidity),
            wind: format!("{} km/h", wind_kmh(reading.wind_speed)),
            pressure: format!("{} hPa", reading.pressure),
        }
    }
}

/// `{base}/{icon}@2x.png`
pub fn icon_url(base: &str, icon: &str) -> String {
    format!("{}/{}@2x.png", base.trim_end_matches('/'), icon)
}

/// The mutually exclusive content region
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Panel {
    /// Nothing fetched yet
    #[default]
    Hidden,
    Loading,
    Error(String),
    Weather(WeatherView),
}

/// Everything a [`Renderer`] needs for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Screen {
    pub panel: Panel,
    pub unit: Unit,
    pub input: String,
    /// Empty means the recent region is hidden
    pub recent: Vec<String>,
    pub geolocation_supported: bool,
}

impl Screen {
    pub fn from_state(state: &AppState, icon_base_url: &str) -> Self {
        let panel = match &state.presentation {
            Presentation::Idle => Panel::Hidden,
            Presentation::Loading => Panel::Loading,
            Presentation::Error(message) => Panel::Error(message.clone()),
            Presentation::Loaded(reading) => {
                Panel::Weather(WeatherView::new(reading, state.unit, icon_base_url))
            }
        };

        Self {
            panel,
            unit: state.unit,
            input: state.input.clone(),
            recent: state.recent.entries().to_vec(),
            geolocation_supported: state.geolocation_supported,
        }
    }

    pub fn weather(&self) -> Option<&WeatherView> {
        match &self.panel {
            Panel::Weather(view) => Some(view),
            _ => None,
        }
    }

    pub fn show_recent(&self) -> bool {
        !self.recent.is_empty()
    }
}

/// Output surface for the widget
///
/// Called with a freshly derived [`Screen`] after every state change.
pub trait Renderer {
    type Error;

    fn render(&mut self, screen: &Screen) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ICON_BASE_URL;
    use crate::history::RecentSearches;

    fn paris() -> WeatherReading {
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

    #[test]
    fn test_weather_view_celsius() {
        let view = WeatherView::new(&paris(), Unit::Celsius, DEFAULT_ICON_BASE_URL);

        assert_eq!(view.location_label, "Paris, FR");
        assert_eq!(
            view.icon_url,
            "https://openweathermap.org/img/wn/01d@2x.png"
        );
        assert_eq!(view.description, "clear sky");
        assert_eq!(view.temperature, "20°C");
        assert_eq!(view.feels_like, "19°C");
        assert_eq!(view.humidity, "60%");
        assert_eq!(view.wind, "11 km/h");
        assert_eq!(view.pressure, "1012 hPa");
    }

    #[test]
    fn test_weather_view_fahrenheit() {
        let view = WeatherView::new(&paris(), Unit::Fahrenheit, DEFAULT_ICON_BASE_URL);
        assert_eq!(view.temperature, "68°F");
        assert_eq!(view.feels_like, "66°F");
    }

    #[test]
    fn test_icon_url_trailing_slash() {
        assert_eq!(icon_url("http://x/img/", "10n"), "http://x/img/10n@2x.png");
    }

    #[test]
    fn test_screen_panels() {
        let mut state = AppState::default();
        assert_eq!(Screen::from_state(&state, "").panel, Panel::Hidden);

        state.presentation = Presentation::Loading;
        assert_eq!(Screen::from_state(&state, "").panel, Panel::Loading);

        state.presentation = Presentation::Error("City not found".into());
        assert_eq!(
            Screen::from_state(&state, "").panel,
            Panel::Error("City not found".into())
        );

        state.presentation = Presentation::Loaded(paris());
        let screen = Screen::from_state(&state, DEFAULT_ICON_BASE_URL);
        assert_eq!(
            screen.weather().map(|w| w.location_label.as_str()),
            Some("Paris, FR")
        );
    }

    #[test]
    fn test_screen_recent_visibility() {
        let state = AppState::default();
        assert!(!Screen::from_state(&state, "").show_recent());

        let state = AppState::new(RecentSearches::from_entries(["Oslo", "Rome"].map(String::from)), None);
        let screen = Screen::from_state(&state, "");
        assert!(screen.show_recent());
        assert_eq!(screen.recent, ["Oslo", "Rome"]);
    }
}
