//! Root UI: focus handling and layout of the widget's regions

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use weather_widget_core::{Action, Panel, Screen};

use crate::component::Component;
use crate::components::{
    HelpBar, HelpBarProps, RecentList, RecentListProps, SearchBar, SearchBarProps, UnitSelector,
    UnitSelectorProps, WeatherPanel, WeatherPanelProps,
};
use crate::event::EventKind;

/// Which control receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Search,
    Recent,
    Units,
}

impl Focus {
    /// Tab order; the recent list is skipped while hidden.
    pub fn next(self, has_recent: bool) -> Self {
        match self {
            Focus::Search if has_recent => Focus::Recent,
            Focus::Search | Focus::Recent => Focus::Units,
            Focus::Units => Focus::Search,
        }
    }

    pub fn prev(self, has_recent: bool) -> Self {
        match self {
            Focus::Search => Focus::Units,
            Focus::Recent => Focus::Search,
            Focus::Units if has_recent => Focus::Recent,
            Focus::Units => Focus::Search,
        }
    }
}

/// Result of routing one event through the UI
#[derive(Debug, Default, PartialEq)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    /// UI-local state changed (focus, cursor, spinner) without an action
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn needs_render() -> Self {
        Self {
            actions: vec![],
            needs_render: true,
        }
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }
}

#[derive(Default)]
pub struct WidgetUi {
    focus: Focus,
    search: SearchBar,
    recent: RecentList,
    units: UnitSelector,
    panel: WeatherPanel,
    help: HelpBar,
    tick: usize,
}

impl WidgetUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn handle_event(&mut self, event: &EventKind, screen: &Screen) -> EventOutcome {
        if event.is_quit() {
            return EventOutcome::action(Action::Quit);
        }

        // Recent list disappeared under the focus
        if self.focus == Focus::Recent && !screen.show_recent() {
            self.focus = Focus::Search;
        }

        match event {
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('l') =>
            {
                EventOutcome::action(Action::LocationRequest)
            }
            EventKind::Key(key) if key.code == KeyCode::Tab => {
                self.focus = self.focus.next(screen.show_recent());
                EventOutcome::needs_render()
            }
            EventKind::Key(key) if key.code == KeyCode::BackTab => {
                self.focus = self.focus.prev(screen.show_recent());
                EventOutcome::needs_render()
            }
            EventKind::Key(_) => self.route_key(event, screen),
            EventKind::Resize(_, _) => EventOutcome::needs_render(),
            EventKind::Tick => {
                if screen.panel == Panel::Loading {
                    self.tick = self.tick.wrapping_add(1);
                    EventOutcome::needs_render()
                } else {
                    EventOutcome::ignored()
                }
            }
        }
    }

    fn route_key(&mut self, event: &EventKind, screen: &Screen) -> EventOutcome {
        let mut outcome = match self.focus {
            Focus::Search => EventOutcome::from_actions(self.search.handle_event(
                event,
                SearchBarProps {
                    value: &screen.input,
                    is_focused: true,
                },
            )),
            Focus::Recent => EventOutcome::from_actions(self.recent.handle_event(
                event,
                RecentListProps {
                    items: &screen.recent,
                    is_focused: true,
                },
            )),
            Focus::Units => EventOutcome::from_actions(self.units.handle_event(
                event,
                UnitSelectorProps {
                    unit: screen.unit,
                    is_focused: true,
                },
            )),
        };
        // Cursor and highlight moves have no action but still redraw
        if outcome.actions.is_empty() {
            outcome.needs_render = true;
        }
        outcome
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, screen: &Screen) {
        if self.focus == Focus::Recent && !screen.show_recent() {
            self.focus = Focus::Search;
        }

        let recent_height = if screen.show_recent() {
            RecentList::height_for(screen.recent.len())
        } else {
            0
        };

        let [top, recent_area, panel_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(recent_height),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        let [search_area, units_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(15)]).areas(top);

        self.search.render(
            frame,
            search_area,
            SearchBarProps {
                value: &screen.input,
                is_focused: self.focus == Focus::Search,
            },
        );
        self.units.render(
            frame,
            units_area,
            UnitSelectorProps {
                unit: screen.unit,
                is_focused: self.focus == Focus::Units,
            },
        );
        if screen.show_recent() {
            self.recent.render(
                frame,
                recent_area,
                RecentListProps {
                    items: &screen.recent,
                    is_focused: self.focus == Focus::Recent,
                },
            );
        }
        self.panel.render(
            frame,
            panel_area,
            WeatherPanelProps {
                panel: &screen.panel,
                tick: self.tick,
            },
        );
        self.help.render(
            frame,
            help_area,
            HelpBarProps {
                focus: self.focus,
                geolocation_supported: screen.geolocation_supported,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, key, key_event, type_text};

    fn screen_with_recent() -> Screen {
        Screen {
            recent: vec!["Oslo".into(), "Rome".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut ui = WidgetUi::new();
        let screen = screen_with_recent();

        assert!(ui.handle_event(&key_event("tab"), &screen).needs_render);
        assert_eq!(ui.focus(), Focus::Recent);
        ui.handle_event(&key_event("tab"), &screen);
        assert_eq!(ui.focus(), Focus::Units);
        ui.handle_event(&key_event("tab"), &screen);
        assert_eq!(ui.focus(), Focus::Search);
        ui.handle_event(&key_event("backtab"), &screen);
        assert_eq!(ui.focus(), Focus::Units);
    }

    #[test]
    fn test_tab_skips_hidden_recent() {
        let mut ui = WidgetUi::new();
        ui.handle_event(&key_event("tab"), &Screen::default());
        assert_eq!(ui.focus(), Focus::Units);
    }

    #[test]
    fn test_typing_goes_to_search() {
        let mut ui = WidgetUi::new();
        let mut screen = Screen::default();

        for event in type_text("Rome") {
            let outcome = ui.handle_event(&event, &screen);
            if let [Action::SearchInputChange(value)] = outcome.actions.as_slice() {
                screen.input = value.clone();
            }
        }
        assert_eq!(screen.input, "Rome");

        let outcome = ui.handle_event(&key_event("enter"), &screen);
        assert_eq!(outcome.actions, vec![Action::SearchSubmit]);
    }

    #[test]
    fn test_global_keys() {
        let mut ui = WidgetUi::new();
        let screen = Screen::default();

        assert_eq!(
            ui.handle_event(&key_event("ctrl+l"), &screen).actions,
            vec![Action::LocationRequest]
        );
        assert_eq!(
            ui.handle_event(&key_event("esc"), &screen).actions,
            vec![Action::Quit]
        );
        assert_eq!(
            ui.handle_event(&EventKind::Key(key("ctrl+c")), &screen).actions,
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_units_focus_selects_unit() {
        let mut ui = WidgetUi::new();
        let screen = Screen::default();
        ui.handle_event(&key_event("tab"), &screen);

        assert_eq!(
            ui.handle_event(&EventKind::Key(char_key('f')), &screen).actions,
            vec![Action::UnitSelect(weather_widget_core::Unit::Fahrenheit)]
        );
    }

    #[test]
    fn test_tick_only_redraws_while_loading() {
        let mut ui = WidgetUi::new();
        assert!(!ui.handle_event(&EventKind::Tick, &Screen::default()).needs_render);

        let loading = Screen {
            panel: Panel::Loading,
            ..Default::default()
        };
        assert!(ui.handle_event(&EventKind::Tick, &loading).needs_render);
    }
}
