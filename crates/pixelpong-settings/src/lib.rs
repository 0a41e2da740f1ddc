//! PixelPong Settings Crate
//!
//! Handles application configuration: connection, polling cadence,
//! validation sampling and canvas rendering preferences.

pub mod config;
pub mod error;

pub use config::{Config, ConnectionSettings, PollingSettings, RenderSettings};
pub use error::{SettingsError, SettingsResult};
