//! Command-line arguments and how they layer over the config file

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use reqwest::Client;
use weather_widget_core::{
    ConfigError, Coordinates, FixedLocation, IpLocationProvider, LocationProvider, NoLocation,
    UnitChangePolicy, WidgetConfig,
};

const APP_DIR: &str = "weather-widget";

/// Terminal weather lookup with recent searches
#[derive(Parser, Debug)]
#[command(name = "weather-widget", version)]
#[command(about = "Look up current weather by city or location")]
pub struct Args {
    /// JSON config file; flags below override its values
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Current-weather endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Unit at startup: celsius or fahrenheit
    #[arg(long, short)]
    pub unit: Option<String>,

    /// Fetch again when the unit changes instead of converting locally
    #[arg(long)]
    pub refetch_on_unit_change: bool,

    /// Fixed latitude for "use my location"
    #[arg(long, requires = "lon", allow_negative_numbers = true, conflicts_with = "ip_location")]
    pub lat: Option<f64>,

    /// Fixed longitude for "use my location"
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Approximate "use my location" from the public IP address
    #[arg(long)]
    pub ip_location: bool,

    /// Directory for storage.json (recent searches, last city)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Config file (or defaults) with flags applied, validated.
    pub fn config(&self) -> Result<WidgetConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => WidgetConfig::from_json_file(path)?,
            None => WidgetConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(unit) = &self.unit {
            config.default_unit = unit.parse()?;
        }
        if self.refetch_on_unit_change {
            config.unit_change = UnitChangePolicy::Refetch;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
        }
    }

    pub fn location_provider(&self, client: &Client) -> Arc<dyn LocationProvider> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Arc::new(FixedLocation(Coordinates { lat, lon })),
            _ if self.ip_location => Arc::new(IpLocationProvider::new(client.clone())),
            _ => Arc::new(NoLocation),
        }
    }
}
