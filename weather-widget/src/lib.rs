//! Terminal front end for the weather widget
//!
//! [`TerminalSurface`] implements the core [`Renderer`](weather_widget_core::Renderer)
//! with ratatui and turns crossterm key presses into core actions; [`run`]
//! drives it.

pub mod cli;
pub mod component;
pub mod components;
pub mod event;
pub mod runtime;
pub mod surface;
pub mod testing;
pub mod ui;

pub use component::Component;
pub use event::EventKind;
pub use runtime::{handle_terminal_event, run, PollerConfig};
pub use surface::TerminalSurface;
pub use ui::{EventOutcome, Focus, WidgetUi};
