//! °C / °F toggle

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weather_widget_core::{Action, Unit};

use crate::component::Component;
use crate::event::EventKind;

pub struct UnitSelectorProps {
    pub unit: Unit,
    pub is_focused: bool,
}

/// Left or `c` picks Celsius, Right or `f` picks Fahrenheit
///
/// Always emits on a key press; the reducer ignores a re-selection of the
/// active unit.
#[derive(Default)]
pub struct UnitSelector;

impl Component<Action> for UnitSelector {
    type Props<'a> = UnitSelectorProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('c') | KeyCode::Char('C') => {
                    Some(Action::UnitSelect(Unit::Celsius))
                }
                KeyCode::Right | KeyCode::Char('f') | KeyCode::Char('F') => {
                    Some(Action::UnitSelect(Unit::Fahrenheit))
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let option = |unit: Unit| {
            let label = format!(" {} ", unit.symbol());
            if unit == props.unit {
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(Color::DarkGray))
            }
        };

        let line = Line::from(vec![option(Unit::Celsius), Span::raw(" "), option(Unit::Fahrenheit)])
            .centered();

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Units ");

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, key, RenderHarness};

    fn press(event: EventKind, is_focused: bool) -> Vec<Action> {
        let props = UnitSelectorProps {
            unit: Unit::Celsius,
            is_focused,
        };
        UnitSelector.handle_event(&event, props).into_iter().collect()
    }

    #[test]
    fn test_keys_select_units() {
        assert_eq!(
            press(EventKind::Key(key("right")), true),
            vec![Action::UnitSelect(Unit::Fahrenheit)]
        );
        assert_eq!(
            press(EventKind::Key(char_key('c')), true),
            vec![Action::UnitSelect(Unit::Celsius)]
        );
        assert!(press(EventKind::Key(char_key('f')), false).is_empty());
    }

    #[test]
    fn test_render_both_options() {
        let mut render = RenderHarness::new(20, 3);
        let output = render.render_to_string_plain(|frame| {
            let props = UnitSelectorProps {
                unit: Unit::Fahrenheit,
                is_focused: false,
            };
            UnitSelector.render(frame, frame.area(), props);
        });
        assert!(output.contains("°C"));
        assert!(output.contains("°F"));
    }
}
