use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions as reported by the weather service.
///
/// Numbers stay in the textual form the API sent so they are rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub weather_code: String,
    pub description: String,
    pub area_name: String,
    pub country: String,
    pub temp_c: String,
    pub temp_f: String,
    pub feels_like_c: String,
    pub feels_like_f: String,
    pub wind_kmph: String,
    pub wind_mph: String,
    pub wind_direction: String,
    pub humidity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputClass {
    Weather,
    WeatherError,
}

/// One status bar update: what Waybar reads from stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub text: String,
    pub tooltip: String,
    pub class: OutputClass,
}

/// Last successful output, as written to the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub data: Output,
}
