//! Recent searches and the last searched city
//!
//! `RecentSearches` is a pure value kept in [`AppState`](crate::state::AppState).
//! `HistoryStore` maps it onto a [`KeyValueStore`] under two keys:
//!
//! - `recentSearches`: JSON array of at most [`MAX_RECENT`] strings
//! - `lastCity`: plain string

use tracing::warn;

use crate::storage::{KeyValueStore, StorageError};

pub const MAX_RECENT: usize = 5;

pub const RECENT_SEARCHES_KEY: &str = "recentSearches";
pub const LAST_CITY_KEY: &str = "lastCity";

/// Most-recent-first, de-duplicated, capped list of city names
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping later duplicates and anything past the cap.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut recent = Self::new();
        for entry in entries {
            if recent.entries.len() == MAX_RECENT {
                break;
            }
            if !recent.entries.contains(&entry) {
                recent.entries.push(entry);
            }
        }
        recent
    }

    /// Move `city` to the front, evicting the oldest entry past the cap.
    ///
    /// Equality is case-sensitive: "paris" and "Paris" are distinct entries.
    pub fn record(&mut self, city: &str) {
        self.entries.retain(|entry| entry != city);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(MAX_RECENT);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// History restored at startup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    pub recent: RecentSearches,
    pub last_city: Option<String>,
}

/// Persists [`RecentSearches`] and the last city in a key-value store
#[derive(Debug)]
pub struct HistoryStore<K> {
    store: K,
}

impl<K: KeyValueStore> HistoryStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Load both keys. Missing or unreadable values come back empty.
    pub fn load(&self) -> History {
        let recent = match self.store.get(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(entries) => RecentSearches::from_entries(entries),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable recent searches");
                    RecentSearches::new()
                }
            },
            Ok(None) => RecentSearches::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read recent searches");
                RecentSearches::new()
            }
        };

        let last_city = match self.store.get(LAST_CITY_KEY) {
            Ok(city) => city.filter(|city| !city.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read last city");
                None
            }
        };

        History { recent, last_city }
    }

    /// Write the whole list.
    pub fn persist_recent(&mut self, recent: &RecentSearches) -> Result<(), StorageError> {
        let raw = serde_json::to_string(recent.entries())?;
        self.store.set(RECENT_SEARCHES_KEY, &raw)
    }

    pub fn record_last_city(&mut self, city: &str) -> Result<(), StorageError> {
        self.store.set(LAST_CITY_KEY, city)
    }

    pub fn store(&self) -> &K {
        &self.store
    }
}
