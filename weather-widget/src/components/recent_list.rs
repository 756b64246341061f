//! Recent searches list

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use weather_widget_core::Action;

use crate::component::Component;
use crate::event::EventKind;

pub struct RecentListProps<'a> {
    /// Most recent first; the list is not drawn when empty
    pub items: &'a [String],
    pub is_focused: bool,
}

/// Up/Down (or j/k) move the highlight, Enter searches the highlighted city
#[derive(Default)]
pub struct RecentList {
    selected: usize,
}

impl RecentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Rows needed to draw `count` entries with borders
    pub fn height_for(count: usize) -> u16 {
        count as u16 + 2
    }
}

impl Component<Action> for RecentList {
    type Props<'a> = RecentListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }
        let last = props.items.len() - 1;
        self.selected = self.selected.min(last);

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(last);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Home => {
                self.selected = 0;
                None
            }
            KeyCode::End => {
                self.selected = last;
                None
            }
            KeyCode::Enter => props
                .items
                .get(self.selected)
                .map(|city| Action::RecentSelect(city.clone())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.items.is_empty() {
            return;
        }
        self.selected = self.selected.min(props.items.len() - 1);

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|city| ListItem::new(Line::raw(city.as_str())))
            .collect();

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(" Recent searches "),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        // Highlight only while focused
        let mut state = ListState::default().with_selected(props.is_focused.then_some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
