//! # MapCircle
//!
//! Editable geodesic circles for slippy maps.
//!
//! ## Architecture
//!
//! MapCircle is organized as a workspace with multiple crates:
//!
//! 1. **mapcircle-core** - Errors, instance ids, units, the broadcast bus
//! 2. **mapcircle-geodesy** - Coordinates, GeoJSON, spherical geodesy
//! 3. **mapcircle-editor** - The circle facade, drag handles, coordination
//! 4. **mapcircle-settings** - JSON/TOML configuration
//! 5. **mapcircle** - Logging setup and the command line tool

pub use mapcircle_core::{CircleError, Error, HostError, InstanceId, Result};
pub use mapcircle_editor::{
    BroadcastCoordinator, Circle, CircleEvent, CircleEventKind, CircleOptions, EditorContext,
    HostMap, MapHandle,
};
pub use mapcircle_geodesy::{Bbox, Feature, GeodesyPort, LngLat, Spherical};
pub use mapcircle_settings::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Human-readable output on stderr at `info`, overridable through
/// `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(&LoggingSettings::default())
}

/// Initialize logging from settings.
///
/// `RUST_LOG` takes precedence over `settings.level`. Output goes to stderr
/// so stdout stays clean for GeoJSON.
pub fn init_logging_with(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if settings.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
