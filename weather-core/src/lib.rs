//! Core library for the `waybar-weather` status bar module.
//!
//! This crate defines:
//! - Configuration and unit resolution
//! - The wttr.in provider and the weather-code icon table
//! - Output formatting and the single-entry fallback cache
//!
//! [`pipeline::run`] ties these together; `waybar-weather` only wires in real paths.

pub mod cache;
pub mod config;
pub mod format;
pub mod icons;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use cache::{Cache, Freshness};
pub use config::{DistanceUnit, FileConfig, Overrides, Settings, TemperatureUnit, UnitError};
pub use model::{CacheEntry, Output, OutputClass, Snapshot};
pub use provider::{WeatherProvider, WttrProvider};
