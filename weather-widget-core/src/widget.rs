//! Widget driver
//!
//! Owns the store and the injected capabilities, runs effects and hands a
//! fresh [`Screen`] to the renderer whenever the state changes.
//!
//! Fetch and location effects run as spawned tokio tasks that send their
//! result back as an action. Nothing is cancelled, so when two fetches
//! overlap the later arrival decides what is shown.
//!
//! ```ignore
//! let mut widget = Widget::new(&config, fetcher, locator, store, surface);
//! widget.start()?;
//! while let Some(action) = widget.next_action().await {
//!     if matches!(action, Action::Quit) { break; }
//!     widget.dispatch(action)?;
//! }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::Action;
use crate::api::WeatherFetcher;
use crate::config::WidgetConfig;
use crate::effect::Effect;
use crate::geolocation::LocationProvider;
use crate::history::HistoryStore;
use crate::reducer::reducer;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use crate::store::Store;
use crate::view::{Renderer, Screen};

pub struct Widget<K, R> {
    store: Store<AppState, Action, Effect>,
    fetcher: Arc<dyn WeatherFetcher>,
    locator: Arc<dyn LocationProvider>,
    history: HistoryStore<K>,
    renderer: R,
    icon_base_url: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    in_flight: usize,
}

impl<K, R> Widget<K, R>
where
    K: KeyValueStore,
    R: Renderer,
{
    /// Build the widget, restoring history from `store`.
    pub fn new(
        config: &WidgetConfig,
        fetcher: Arc<dyn WeatherFetcher>,
        locator: Arc<dyn LocationProvider>,
        store: K,
        renderer: R,
    ) -> Self {
        let history = HistoryStore::new(store);
        let restored = history.load();
        debug!(
            recent = restored.recent.len(),
            last_city = ?restored.last_city,
            "History restored"
        );

        let state = AppState::new(restored.recent, restored.last_city)
            .with_unit(config.default_unit)
            .with_unit_change(config.unit_change)
            .with_geolocation(locator.is_supported());

        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            store: Store::new(state, reducer),
            fetcher,
            locator,
            history,
            renderer,
            icon_base_url: config.icon_base_url.clone(),
            action_tx,
            action_rx,
            in_flight: 0,
        }
    }

    /// Draw the initial frame and queue [`Action::AppStart`].
    pub fn start(&mut self) -> Result<(), R::Error> {
        self.render()?;
        self.enqueue(Action::AppStart);
        Ok(())
    }

    /// Reduce one action, run its effects and re-render if anything changed.
    ///
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, R::Error> {
        if action.is_async_result() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect);
        }

        if result.changed {
            self.render()?;
        }
        Ok(result.changed)
    }

    /// Queue an action for the next loop iteration.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Wait for the next queued action.
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Dispatch queued actions until the queue is empty and no task is running.
    pub async fn settle(&mut self) -> Result<(), R::Error> {
        loop {
            while let Ok(action) = self.action_rx.try_recv() {
                self.dispatch(action)?;
            }
            if self.in_flight == 0 {
                return Ok(());
            }
            match self.action_rx.recv().await {
                Some(action) => {
                    self.dispatch(action)?;
                }
                None => return Ok(()),
            }
        }
    }

    pub fn render(&mut self) -> Result<(), R::Error> {
        let screen = self.screen();
        self.renderer.render(&screen)
    }

    pub fn screen(&self) -> Screen {
        Screen::from_state(self.store.state(), &self.icon_base_url)
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn history(&self) -> &HistoryStore<K> {
        &self.history
    }

    /// Spawned fetch/locate tasks whose result has not been dispatched yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWeather(query) => {
                let fetcher = Arc::clone(&self.fetcher);
                let tx = self.action_tx.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let action = match fetcher.fetch(&query).await {
                        Ok(reading) => Action::WeatherDidLoad { query, reading },
                        Err(error) => Action::WeatherDidError { query, error },
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::Locate => {
                let locator = Arc::clone(&self.locator);
                let tx = self.action_tx.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let action = match locator.current_position().await {
                        Ok(coords) => Action::LocationDidResolve(coords),
                        Err(error) => Action::LocationDidFail(error),
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::PersistRecent(recent) => {
                if let Err(e) = self.history.persist_recent(&recent) {
                    warn!(error = %e, "Failed to persist recent searches");
                }
            }
            Effect::PersistLastCity(city) => {
                if let Err(e) = self.history.record_last_city(&city) {
                    warn!(error = %e, "Failed to persist last city");
                }
            }
        }
    }
}
