use chrono::{DateTime, Utc};

use crate::{
    cache::Cache,
    config::Settings,
    format::{render, unavailable},
    model::Output,
    provider::WeatherProvider,
};

/// Fetch and render the current weather, falling back to the cache on failure.
///
/// Never fails: when neither the provider nor the cache has anything usable,
/// the result is the `weather-error` output carrying the fetch error.
pub async fn run(
    provider: &dyn WeatherProvider,
    settings: &Settings,
    cache: &Cache,
    now: DateTime<Utc>,
) -> Output {
    match provider.current(settings.city.as_deref()).await {
        Ok(snapshot) => {
            let output = render(&snapshot, settings);
            if let Err(err) = cache.store(&output, now) {
                tracing::warn!("failed to update cache: {err:#}");
            }
            output
        }
        Err(err) => {
            tracing::warn!("weather fetch failed: {err:#}");
            cache
                .load()
                .and_then(|entry| entry.aged(now))
                .unwrap_or_else(|| unavailable(&format!("{err:#}")))
        }
    }
}
