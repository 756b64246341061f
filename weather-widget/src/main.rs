//! weather-widget: current weather by city name or location
//!
//! ```sh
//! OPENWEATHER_API_KEY=... weather-widget
//! weather-widget --api-key ... --unit fahrenheit --lat 48.85 --lon 2.35
//! weather-widget --config widget.json --log-file /tmp/weather.log
//! ```

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reqwest::Client;
use tracing::{info, warn};
use weather_widget::cli::Args;
use weather_widget::{run, PollerConfig, TerminalSurface};
use weather_widget_core::{FileStore, OpenWeatherClient, StorageError, Widget};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let store = match open_store(&args) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: could not open storage: {e}");
            std::process::exit(1);
        }
    };

    let client = Client::new();
    let fetcher = Arc::new(OpenWeatherClient::from_config(client.clone(), &config));
    let locator = args.location_provider(&client);
    info!(
        base_url = %config.base_url,
        unit = ?config.default_unit,
        unit_change = ?config.unit_change,
        geolocation = locator.is_supported(),
        "Starting weather widget"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let surface = TerminalSurface::new(terminal);
    let mut widget = Widget::new(&config, fetcher, locator, store, surface);
    let result = run(&mut widget, PollerConfig::default()).await;

    // ===== Cleanup =====
    let terminal = widget.renderer_mut().terminal_mut();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// An unreadable storage file starts the widget with empty history.
fn open_store(args: &Args) -> Result<FileStore, StorageError> {
    let path = args.data_dir().join(FileStore::FILE_NAME);
    match FileStore::open(&path) {
        Ok(store) => Ok(store),
        Err(StorageError::Json(e)) => {
            warn!(path = %path.display(), error = %e, "Storage file is corrupt, starting empty");
            Ok(FileStore::empty(path))
        }
        Err(e) => Err(e),
    }
}
