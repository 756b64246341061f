//! Event/action loop for the terminal widget
//!
//! ```text
//! crossterm poller ─► EventKind ─► TerminalSurface::handle_event ─► Action ─┐
//!                                                                          ▼
//!            spawned fetch/locate results ─────────────────────► Widget::dispatch
//! ```

use std::io;
use std::ops::ControlFlow;
use std::time::Duration;

use ratatui::backend::Backend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use weather_widget_core::{Action, KeyValueStore, Widget};

use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::surface::TerminalSurface;

/// Spinner frame interval while loading
pub const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Configuration for the crossterm event poller
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub poll_timeout: Duration,
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Route one terminal event through the surface and dispatch what it yields.
///
/// Actions are reduced before the next event is read, so each key edits the
/// input the previous key produced. Breaks when the user asks to quit.
pub fn handle_terminal_event<K, B>(
    widget: &mut Widget<K, TerminalSurface<B>>,
    event: &EventKind,
) -> io::Result<ControlFlow<()>>
where
    K: KeyValueStore,
    B: Backend,
{
    for action in widget.renderer_mut().handle_event(event)? {
        if matches!(action, Action::Quit) {
            info!("Quit requested");
            return Ok(ControlFlow::Break(()));
        }
        widget.dispatch(action)?;
    }
    Ok(ControlFlow::Continue(()))
}

/// Run the widget until the user quits.
pub async fn run<K, B>(
    widget: &mut Widget<K, TerminalSurface<B>>,
    poller: PollerConfig,
) -> io::Result<()>
where
    K: KeyValueStore,
    B: Backend,
{
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(
        event_tx,
        poller.poll_timeout,
        poller.loop_sleep,
        cancel_token.clone(),
    );
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    widget.start()?;

    loop {
        tokio::select! {
            Some(raw) = event_rx.recv() => {
                let Some(event) = process_raw_event(raw) else {
                    continue;
                };
                if handle_terminal_event(widget, &event)?.is_break() {
                    break;
                }
            }

            Some(action) = widget.next_action() => {
                if matches!(action, Action::Quit) {
                    info!("Quit requested");
                    break;
                }
                widget.dispatch(action)?;
            }

            _ = ticker.tick() => {
                if widget.state().is_loading() {
                    widget.renderer_mut().handle_event(&EventKind::Tick)?;
                }
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
