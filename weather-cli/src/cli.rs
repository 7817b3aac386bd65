use chrono::Utc;
use clap::{Parser, error::ErrorKind};
use std::env;
use waybar_weather_core::{
    Cache, DistanceUnit, FileConfig, Output, Overrides, Settings, TemperatureUnit, WttrProvider,
    config::system_locale, format, pipeline,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "waybar-weather",
    version,
    about = "Print the current weather as JSON for a Waybar custom module"
)]
pub struct Cli {
    /// Temperature unit: (C)elsius or (F)ahrenheit.
    #[arg(short, long, value_name = "C|F")]
    pub temperature: Option<TemperatureUnit>,

    /// Unit for wind speed.
    #[arg(short, long, value_name = "km|miles")]
    pub distance: Option<DistanceUnit>,

    /// City to report on; empty or absent lets wttr.in locate you by IP.
    #[arg(short, long)]
    pub city: Option<String>,
}

/// Exit status for a failed parse: help and version requests are not failures.
pub fn parse_error_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            city: self.city.clone(),
            temperature: self.temperature,
            distance: self.distance,
        }
    }

    /// Resolve settings from the environment and produce one status bar update.
    pub async fn run(self) -> Output {
        let file = match FileConfig::default_path() {
            Ok(path) => FileConfig::load_from(&path),
            Err(err) => {
                tracing::warn!("{err:#}");
                FileConfig::default()
            }
        };

        let settings = Settings::resolve(&file, system_locale().as_deref(), &self.overrides());
        tracing::debug!(?settings, "resolved settings");

        let cache_path = Cache::default_path().unwrap_or_else(|err| {
            tracing::warn!("{err:#}, caching in the temp directory");
            env::temp_dir().join("waybar-weather.json")
        });
        let cache = Cache::new(cache_path);

        match WttrProvider::new() {
            Ok(provider) => pipeline::run(&provider, &settings, &cache, Utc::now()).await,
            Err(err) => format::unavailable(&format!("{err:#}")),
        }
    }
}
