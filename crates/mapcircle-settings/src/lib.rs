//! MapCircle Settings Crate
//!
//! File-backed configuration: circle defaults, interaction timing and
//! logging, stored as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, InteractionSettings, LoggingSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
