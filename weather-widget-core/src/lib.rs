//! Core of the weather widget
//!
//! A unidirectional data flow: user and location events become
//! [`Action`]s, a pure [`reducer`] updates the single [`AppState`] and returns
//! [`Effect`]s, and the [`Widget`] driver performs those effects and renders a
//! derived [`Screen`].
//!
//! ```text
//! event ─► Action ─► reducer(&mut AppState, Action) ─► DispatchResult { changed, effects }
//!                                                          │               │
//!                                              Renderer::render(Screen)   Widget runs effect
//!                                                                          │
//!                                  spawned fetch / locate ─► WeatherDid* / LocationDid* action
//! ```
//!
//! # Capabilities
//!
//! Everything outside the process is behind a trait so the state machine runs
//! without a network, a terminal or a disk:
//!
//! - [`WeatherFetcher`]: [`OpenWeatherClient`]
//! - [`LocationProvider`]: [`FixedLocation`], [`IpLocationProvider`], [`NoLocation`]
//! - [`KeyValueStore`]: [`FileStore`], [`MemoryStore`]
//! - [`Renderer`]: implemented by the terminal surface in the binary crate
//!
//! The [`testing`] module has scripted stand-ins for each of them.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod geolocation;
pub mod history;
pub mod query;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;
pub mod testing;
pub mod units;
pub mod view;
pub mod widget;

pub use action::Action;
pub use api::{parse_reading, FetchError, OpenWeatherClient, QueryKind, WeatherFetcher};
pub use config::{ConfigError, WidgetConfig, DEFAULT_BASE_URL, DEFAULT_ICON_BASE_URL};
pub use effect::Effect;
pub use geolocation::{
    FixedLocation, GeolocationError, IpLocationProvider, LocationProvider, NoLocation,
};
pub use history::{History, HistoryStore, RecentSearches, MAX_RECENT};
pub use query::{resolve_text, Coordinates, LocationQuery};
pub use reducer::reducer;
pub use state::{AppState, LastSuccess, Presentation, Unit, UnitChangePolicy, WeatherReading};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{ActionSummary, DispatchResult, Reducer, Store};
pub use view::{Panel, Renderer, Screen, WeatherView};
pub use widget::Widget;
