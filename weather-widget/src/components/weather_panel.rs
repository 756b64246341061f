//! The loading / error / weather region
//!
//! Exactly one of the three is drawn, chosen by [`Panel`]. Before the first
//! search a short hint is shown instead.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weather_widget_core::{Action, Panel, WeatherView};

use crate::component::Component;

pub const ERROR_ICON: &str = "⚠";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const LOADING_TEXT: &str = "Loading weather";
pub const IDLE_HINT: &str = "Type a city and press Enter";

pub struct WeatherPanelProps<'a> {
    pub panel: &'a Panel,
    /// Advances on every animation tick
    pub tick: usize,
}

#[derive(Default)]
pub struct WeatherPanel;

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = rows_for(props.panel, props.tick);
        let constraints = rows.iter().map(|row| Constraint::Length(row.height()));
        let chunks = Layout::vertical(constraints).flex(Flex::Center).split(inner);

        for (row, area) in rows.into_iter().zip(chunks.iter().copied()) {
            row.render(frame, area);
        }
    }
}

enum Row {
    Line(Line<'static>),
    Art(Text<'static>),
}

impl Row {
    fn height(&self) -> u16 {
        match self {
            Row::Line(_) => 1,
            Row::Art(text) => text.lines.len() as u16,
        }
    }

    fn render(self, frame: &mut Frame, area: Rect) {
        match self {
            Row::Line(line) => frame.render_widget(Paragraph::new(line), area),
            Row::Art(text) => {
                frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area)
            }
        }
    }
}

fn rows_for(panel: &Panel, tick: usize) -> Vec<Row> {
    match panel {
        Panel::Hidden => vec![centered(vec![Span::styled(
            IDLE_HINT,
            Style::default().fg(Color::DarkGray),
        )])],

        Panel::Loading => {
            let spinner = SPINNERS[tick % SPINNERS.len()];
            let dots = ".".repeat(tick / 2 % 4);
            vec![centered(vec![
                Span::styled(spinner, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" {LOADING_TEXT}{dots:<3}"),
                    Style::default().fg(Color::Gray),
                ),
            ])]
        }

        Panel::Error(message) => vec![
            centered(vec![Span::styled(
                ERROR_ICON,
                Style::default().fg(Color::Red).bold(),
            )]),
            centered(vec![Span::styled(
                message.clone(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )]),
        ],

        Panel::Weather(view) => weather_rows(view),
    }
}

fn weather_rows(view: &WeatherView) -> Vec<Row> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: &str| Span::styled(text.to_string(), Style::default().fg(Color::White));

    vec![
        centered(vec![Span::styled(
            view.location_label.clone(),
            Style::default().fg(Color::White).bold(),
        )]),
        Row::Art(icon_art(&view.icon)),
        centered(vec![Span::styled(
            view.temperature.clone(),
            Style::default().fg(temp_color(view.celsius)).bold(),
        )]),
        centered(vec![Span::styled(
            view.description.clone(),
            Style::default().fg(Color::Gray),
        )]),
        centered(vec![label("Feels like "), value(&view.feels_like)]),
        centered(vec![
            label("Humidity "),
            value(&view.humidity),
            label("   Wind "),
            value(&view.wind),
            label("   Pressure "),
            value(&view.pressure),
        ]),
        centered(vec![Span::styled(
            view.icon_url.clone(),
            Style::default().fg(Color::Rgb(90, 90, 110)),
        )]),
    ]
}

fn centered(spans: Vec<Span<'static>>) -> Row {
    Row::Line(Line::from(spans).centered())
}

/// Small art for an OpenWeatherMap icon code (`01d`, `10n`, ...)
fn icon_art(icon: &str) -> Text<'static> {
    let (art, color): (&[&str], Color) = match icon.get(..2).unwrap_or_default() {
        "01" => (&["  \\ | /  ", "-- ( ) --", "  / | \\  "], Color::Yellow),
        "02" => (&[" \\ /     ", "-( ).--. ", " (___(__)"], Color::Yellow),
        "03" | "04" => (&["   .--.  ", ".-(    ).", "(___.__)_)"], Color::Gray),
        "09" | "10" => (&["   .--.  ", " (___(__)", "  ' ' ' '"], Color::LightBlue),
        "11" => (&["   .--.  ", " (___(__)", "   ⚡ ⚡  "], Color::LightYellow),
        "13" => (&["   .--.  ", " (___(__)", "  *  *  * "], Color::White),
        "50" => (&[" _ - _ - ", "  _ - _  ", " _ - _ - "], Color::Gray),
        _ => (&["    ?    "], Color::DarkGray),
    };
    let style = Style::default().fg(color);
    Text::from(
        art.iter()
            .map(|line| Line::styled(*line, style))
            .collect::<Vec<_>>(),
    )
}

fn temp_color(celsius: f64) -> Color {
    match celsius.round() as i64 {
        ..=-10 => Color::Rgb(150, 200, 255),
        -9..=0 => Color::Rgb(100, 180, 255),
        1..=10 => Color::Rgb(100, 220, 200),
        11..=20 => Color::Rgb(150, 230, 150),
        21..=30 => Color::Rgb(255, 220, 100),
        31..=40 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}
