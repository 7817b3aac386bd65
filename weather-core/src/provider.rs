use crate::model::Snapshot;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wttr;

pub use wttr::WttrProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, or for the caller's own location when `None`.
    async fn current(&self, city: Option<&str>) -> anyhow::Result<Snapshot>;
}
