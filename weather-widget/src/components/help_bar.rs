//! Key hints for the focused region

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weather_widget_core::Action;

use crate::component::Component;
use crate::ui::Focus;

pub struct HelpBarProps {
    pub focus: Focus,
    pub geolocation_supported: bool,
}

#[derive(Default)]
pub struct HelpBar;

impl HelpBar {
    fn hints(props: &HelpBarProps) -> Vec<(&'static str, &'static str)> {
        let mut hints = match props.focus {
            Focus::Search => vec![("enter", "search")],
            Focus::Recent => vec![("↑↓", "move"), ("enter", "search")],
            Focus::Units => vec![("←/c", "°C"), ("→/f", "°F")],
        };
        hints.push(("tab", "focus"));
        if props.geolocation_supported {
            hints.push(("ctrl+l", "my location"));
        }
        hints.push(("esc", "quit"));
        hints
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = Self::hints(&props)
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
