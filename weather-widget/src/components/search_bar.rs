//! City search field

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weather_widget_core::Action;

use crate::component::Component;
use crate::event::EventKind;

pub const PLACEHOLDER: &str = "Enter city name";

pub struct SearchBarProps<'a> {
    /// Current field text, owned by the reducer
    pub value: &'a str,
    pub is_focused: bool,
}

/// Single-line input with a cursor
///
/// Every edit emits `SearchInputChange` with the full new value; Enter emits
/// `SearchSubmit`.
#[derive(Default)]
pub struct SearchBar {
    /// Byte index into the value
    cursor: usize,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keep the cursor on a char boundary inside `value`.
    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some(Action::SearchInputChange(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(Action::SearchInputChange(self.insert(props.value, c))),
            KeyCode::Backspace => self.backspace(props.value).map(Action::SearchInputChange),
            KeyCode::Delete => self.delete(props.value).map(Action::SearchInputChange),
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some(Action::SearchSubmit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // A value replaced from outside (recent selection) lands the cursor at the end
        if self.cursor > props.value.len() || !props.is_focused {
            self.cursor = props.value.len();
        }
        self.clamp_cursor(props.value);

        let (text, style) = if props.value.is_empty() {
            (PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ");

        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if props.is_focused {
            let column = props.value[..self.cursor].chars().count() as u16;
            let cursor_x = area.x + 1 + column;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, key, RenderHarness};

    fn focused(value: &str) -> SearchBarProps<'_> {
        SearchBarProps {
            value,
            is_focused: true,
        }
    }

    fn actions(bar: &mut SearchBar, event: EventKind, value: &str) -> Vec<Action> {
        bar.handle_event(&event, focused(value)).into_iter().collect()
    }

    #[test]
    fn test_typing_emits_full_value() {
        let mut bar = SearchBar::new();
        assert_eq!(
            actions(&mut bar, EventKind::Key(char_key('P')), ""),
            vec![Action::SearchInputChange("P".into())]
        );
        assert_eq!(
            actions(&mut bar, EventKind::Key(char_key('a')), "P"),
            vec![Action::SearchInputChange("Pa".into())]
        );
        assert_eq!(bar.cursor(), 2);
    }

    #[test]
    fn test_insert_in_middle_and_backspace() {
        let mut bar = SearchBar::new();
        bar.cursor = 4;
        actions(&mut bar, EventKind::Key(key("left")), "Pars");
        actions(&mut bar, EventKind::Key(key("left")), "Pars");
        assert_eq!(
            actions(&mut bar, EventKind::Key(char_key('i')), "Pars"),
            vec![Action::SearchInputChange("Pairs".into())]
        );

        // Multi-byte character before the cursor
        let mut bar = SearchBar::new();
        bar.cursor = "Zü".len();
        assert_eq!(
            actions(&mut bar, EventKind::Key(key("backspace")), "Zü"),
            vec![Action::SearchInputChange("Z".into())]
        );
    }

    #[test]
    fn test_backspace_at_start_is_ignored() {
        let mut bar = SearchBar::new();
        assert!(actions(&mut bar, EventKind::Key(key("backspace")), "Oslo").is_empty());
    }

    #[test]
    fn test_enter_submits() {
        let mut bar = SearchBar::new();
        assert_eq!(
            actions(&mut bar, EventKind::Key(key("enter")), "Paris"),
            vec![Action::SearchSubmit]
        );
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut bar = SearchBar::new();
        bar.cursor = 5;
        assert_eq!(
            actions(&mut bar, EventKind::Key(key("ctrl+u")), "Paris"),
            vec![Action::SearchInputChange(String::new())]
        );
        assert_eq!(bar.cursor(), 0);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut bar = SearchBar::new();
        let props = SearchBarProps {
            value: "",
            is_focused: false,
        };
        let emitted: Vec<_> = bar
            .handle_event(&EventKind::Key(char_key('x')), props)
            .into_iter()
            .collect();
        assert!(emitted.is_empty());
    }

    #[test]
    fn test_render_placeholder_and_value() {
        let mut render = RenderHarness::new(30, 3);
        let mut bar = SearchBar::new();

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), focused(""));
        });
        assert!(output.contains(PLACEHOLDER));

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), focused("Paris"));
        });
        assert!(output.contains("Paris"));
        assert!(!output.contains(PLACEHOLDER));
    }
}
