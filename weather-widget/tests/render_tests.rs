//! Whole-widget rendering through the terminal surface on a TestBackend

use std::ops::ControlFlow;
use std::sync::Arc;

use ratatui::{backend::TestBackend, Terminal};
use weather_widget::testing::{buffer_to_string_plain, char_key, key_event, type_text};
use weather_widget::{handle_terminal_event, EventKind, Focus, TerminalSurface};
use weather_widget_core::testing::{paris, reading_for, StubFetcher, StubLocator};
use weather_widget_core::{
    FetchError, KeyValueStore, LocationProvider, LocationQuery, MemoryStore, NoLocation,
    QueryKind, Unit, Widget, WidgetConfig,
};

type TestWidget = Widget<MemoryStore, TerminalSurface<TestBackend>>;

fn widget(fetcher: Arc<StubFetcher>, locator: Arc<dyn LocationProvider>, store: MemoryStore) -> TestWidget {
    let config = WidgetConfig {
        api_key: "test".into(),
        ..Default::default()
    };
    let terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    Widget::new(&config, fetcher, locator, store, TerminalSurface::new(terminal))
}

fn screen_text(widget: &TestWidget) -> String {
    buffer_to_string_plain(widget.renderer().terminal().backend().buffer())
}

/// Feed events the way the runtime loop does.
fn send(widget: &mut TestWidget, events: impl IntoIterator<Item = EventKind>) {
    for event in events {
        let flow = handle_terminal_event(widget, &event).unwrap();
        assert!(flow.is_continue());
    }
}

#[tokio::test]
async fn typing_a_city_shows_its_weather() {
    let fetcher = Arc::new(StubFetcher::new().with_reading("Paris", paris()));
    let mut widget = widget(fetcher.clone(), Arc::new(NoLocation), MemoryStore::new());
    widget.start().unwrap();
    widget.settle().await.unwrap();

    let idle = screen_text(&widget);
    assert!(idle.contains("Enter city name"));
    assert!(!idle.contains("Recent searches"));

    send(&mut widget, type_text("Paris"));
    send(&mut widget, [key_event("enter")]);
    assert!(screen_text(&widget).contains("Loading weather"));

    widget.settle().await.unwrap();
    let output = screen_text(&widget);

    assert!(output.contains("Paris, FR"), "{output}");
    assert!(output.contains("20°C"));
    assert!(output.contains("clear sky"));
    assert!(output.contains("11 km/h"));
    assert!(output.contains("1012 hPa"));
    assert!(output.contains("Recent searches"));
    assert!(!output.contains("Loading weather"));
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn unit_toggle_converts_displayed_temperature() {
    let fetcher = Arc::new(StubFetcher::new().with_reading("Paris", paris()));
    let mut widget = widget(fetcher.clone(), Arc::new(NoLocation), MemoryStore::new());

    send(&mut widget, type_text("Paris"));
    send(&mut widget, [key_event("enter")]);
    widget.settle().await.unwrap();

    // Search -> Recent -> Units
    send(&mut widget, [key_event("tab"), key_event("tab")]);
    assert_eq!(widget.renderer().ui().focus(), Focus::Units);
    send(&mut widget, [EventKind::Key(char_key('f'))]);
    widget.settle().await.unwrap();

    assert_eq!(widget.state().unit, Unit::Fahrenheit);
    let output = screen_text(&widget);
    assert!(output.contains("68°F"), "{output}");
    assert!(!output.contains("20°C"));
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn recent_entry_reruns_search() {
    let mut store = MemoryStore::new();
    store.set("recentSearches", r#"["Oslo","Rome"]"#).unwrap();
    let fetcher = Arc::new(StubFetcher::new().with_reading("Rome", reading_for("Rome", "IT")));
    let mut widget = widget(fetcher.clone(), Arc::new(NoLocation), store);
    widget.start().unwrap();
    widget.settle().await.unwrap();

    assert!(screen_text(&widget).contains("Oslo"));

    send(&mut widget, [key_event("tab"), key_event("down"), key_event("enter")]);
    assert_eq!(widget.state().input, "Rome");
    widget.settle().await.unwrap();

    let output = screen_text(&widget);
    assert!(output.contains("Rome, IT"), "{output}");
    assert_eq!(widget.state().recent.entries(), ["Rome", "Oslo"]);
}

#[tokio::test]
async fn not_found_shows_error_region() {
    let fetcher = Arc::new(
        StubFetcher::new().with_error("Atlantis", FetchError::NotFound(QueryKind::Name)),
    );
    let mut widget = widget(fetcher, Arc::new(NoLocation), MemoryStore::new());

    send(&mut widget, type_text("Atlantis"));
    send(&mut widget, [key_event("enter")]);
    widget.settle().await.unwrap();

    let output = screen_text(&widget);
    assert!(output.contains("City not found"));
    assert!(!output.contains("Recent searches"));
}

#[tokio::test]
async fn location_key_uses_provider() {
    let fetcher = Arc::new(StubFetcher::new().with_reading("51.5074,-0.1278", reading_for("London", "GB")));
    let mut widget = widget(
        fetcher,
        Arc::new(StubLocator::at(51.5074, -0.1278)),
        MemoryStore::new(),
    );
    widget.render().unwrap();
    assert!(screen_text(&widget).contains("my location"));

    send(&mut widget, [key_event("ctrl+l")]);
    widget.settle().await.unwrap();

    assert!(screen_text(&widget).contains("London, GB"));
}

#[tokio::test]
async fn location_key_without_provider_shows_unsupported() {
    let fetcher = Arc::new(StubFetcher::new());
    let mut widget = widget(fetcher, Arc::new(NoLocation), MemoryStore::new());

    send(&mut widget, [key_event("ctrl+l")]);

    assert!(screen_text(&widget).contains("Geolocation is not supported by your browser"));
}

#[tokio::test]
async fn escape_requests_quit() {
    let fetcher = Arc::new(StubFetcher::new());
    let mut widget = widget(fetcher, Arc::new(NoLocation), MemoryStore::new());

    let actions = widget.renderer_mut().handle_event(&key_event("esc")).unwrap();
    assert_eq!(actions, vec![weather_widget_core::Action::Quit]);
}

#[tokio::test]
async fn escape_breaks_the_event_loop() {
    let fetcher = Arc::new(StubFetcher::new());
    let mut widget = widget(fetcher, Arc::new(NoLocation), MemoryStore::new());

    let flow = handle_terminal_event(&mut widget, &key_event("esc")).unwrap();
    assert_eq!(flow, ControlFlow::Break(()));
}

#[tokio::test]
async fn back_to_back_keys_build_on_each_other() {
    let fetcher = Arc::new(StubFetcher::new().with_reading("Paris", paris()));
    let mut widget = widget(fetcher.clone(), Arc::new(NoLocation), MemoryStore::new());

    // No settle between keys, as when a burst of keys arrives in one poll
    for event in type_text("Paris") {
        handle_terminal_event(&mut widget, &event).unwrap();
    }
    assert_eq!(widget.state().input, "Paris");
    assert!(screen_text(&widget).contains("Paris"));

    handle_terminal_event(&mut widget, &key_event("enter")).unwrap();
    widget.settle().await.unwrap();

    assert_eq!(fetcher.calls(), vec![LocationQuery::by_name("Paris")]);
    assert_eq!(widget.state().recent.entries(), ["Paris"]);
}
