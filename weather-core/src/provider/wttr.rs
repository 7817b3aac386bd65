use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::Snapshot;

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider backed by the `wttr.in` JSON (`format=j1`) endpoint.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// An empty location segment makes wttr.in locate the caller by IP.
    ///
    /// `/` stays literal; everything else outside the unreserved set is percent-encoded.
    pub fn url_for(&self, city: Option<&str>) -> String {
        let location = city
            .map(|c| {
                c.split('/')
                    .map(urlencoding::encode)
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        format!("{}/{location}?format=j1", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    #[serde(rename = "FeelsLikeF")]
    feels_like_f: String,
    #[serde(rename = "weatherCode")]
    weather_code: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "windspeedMiles")]
    windspeed_miles: String,
    #[serde(rename = "winddir16Point")]
    winddir_16_point: String,
    humidity: String,
}

#[derive(Debug, Deserialize)]
struct WttrArea {
    #[serde(rename = "areaName")]
    area_name: Vec<WttrValue>,
    country: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<WttrCurrent>,
    nearest_area: Vec<WttrArea>,
}

fn first_value(values: Vec<WttrValue>, field: &str) -> Result<String> {
    values
        .into_iter()
        .next()
        .map(|v| v.value)
        .ok_or_else(|| anyhow!("wttr.in response has an empty '{field}' list"))
}

impl TryFrom<WttrResponse> for Snapshot {
    type Error = anyhow::Error;

    fn try_from(response: WttrResponse) -> Result<Self> {
        let current = response
            .current_condition
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("wttr.in response contained no current_condition"))?;
        let area = response
            .nearest_area
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("wttr.in response contained no nearest_area"))?;

        Ok(Snapshot {
            description: first_value(current.weather_desc, "weatherDesc")?,
            area_name: first_value(area.area_name, "areaName")?,
            country: first_value(area.country, "country")?,
            weather_code: current.weather_code,
            temp_c: current.temp_c,
            temp_f: current.temp_f,
            feels_like_c: current.feels_like_c,
            feels_like_f: current.feels_like_f,
            wind_kmph: current.windspeed_kmph,
            wind_mph: current.windspeed_miles,
            wind_direction: current.winddir_16_point,
            humidity: current.humidity,
        })
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn current(&self, city: Option<&str>) -> Result<Snapshot> {
        let url = self.url_for(city);
        tracing::debug!(%url, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to wttr.in")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read wttr.in response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "wttr.in request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WttrResponse =
            serde_json::from_str(&body).context("Failed to parse wttr.in JSON")?;

        Snapshot::try_from(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
