//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; the [`Widget`](crate::widget::Widget) driver
//! performs these after each dispatch.

use crate::history::RecentSearches;
use crate::query::LocationQuery;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Spawn a weather request; answers with `WeatherDidLoad`/`WeatherDidError`
    FetchWeather(LocationQuery),

    /// Spawn a position lookup; answers with `LocationDidResolve`/`LocationDidFail`
    Locate,

    /// Write the whole recent-search list
    PersistRecent(RecentSearches),

    PersistLastCity(String),
}
