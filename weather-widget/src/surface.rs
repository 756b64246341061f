//! ratatui rendering surface

use std::io;

use ratatui::{backend::Backend, Terminal};
use weather_widget_core::{Action, Renderer, Screen};

use crate::event::EventKind;
use crate::ui::WidgetUi;

/// Draws [`Screen`]s into a terminal and maps key presses to actions
///
/// Keeps the last screen so focus changes and spinner ticks can redraw
/// without a state change.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    ui: WidgetUi,
    screen: Screen,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            ui: WidgetUi::new(),
            screen: Screen::default(),
        }
    }

    /// Route an event through the UI, redrawing if only UI-local state moved.
    pub fn handle_event(&mut self, event: &EventKind) -> io::Result<Vec<Action>> {
        let outcome = self.ui.handle_event(event, &self.screen);
        if outcome.needs_render {
            self.draw()?;
        }
        Ok(outcome.actions)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn ui(&self) -> &WidgetUi {
        &self.ui
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn draw(&mut self) -> io::Result<()> {
        let Self {
            terminal,
            ui,
            screen,
        } = self;
        terminal.draw(|frame| {
            let area = frame.area();
            ui.render(frame, area, screen);
        })?;
        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalSurface<B> {
    type Error = io::Error;

    fn render(&mut self, screen: &Screen) -> Result<(), Self::Error> {
        self.screen = screen.clone();
        self.draw()
    }
}
