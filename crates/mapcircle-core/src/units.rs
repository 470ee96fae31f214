//! Distance units
//!
//! Handles conversion between meters and the other units a geodesy
//! collaborator may be asked to work in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Units for geodesic distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnits {
    /// Meters
    #[default]
    Meters,
    /// Kilometers
    Kilometers,
    /// Statute miles
    Miles,
    /// Nautical miles
    NauticalMiles,
}

impl DistanceUnits {
    /// Number of meters in one unit.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => 1000.0,
            Self::Miles => 1609.344,
            Self::NauticalMiles => 1852.0,
        }
    }

    /// Convert a value in these units to meters.
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Convert a value in meters to these units.
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    /// Short label ("m", "km", ...)
    pub fn label(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Miles => "mi",
            Self::NauticalMiles => "nmi",
        }
    }
}

impl fmt::Display for DistanceUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters => write!(f, "meters"),
            Self::Kilometers => write!(f, "kilometers"),
            Self::Miles => write!(f, "miles"),
            Self::NauticalMiles => write!(f, "nauticalmiles"),
        }
    }
}

impl FromStr for DistanceUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meters" | "metres" | "m" => Ok(Self::Meters),
            "kilometers" | "kilometres" | "km" => Ok(Self::Kilometers),
            "miles" | "mi" => Ok(Self::Miles),
            "nauticalmiles" | "nmi" => Ok(Self::NauticalMiles),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

/// Format a distance for display
///
/// * `meters` - Distance in meters
/// * `units` - Target units
pub fn format_distance(meters: f64, units: DistanceUnits) -> String {
    format!("{:.3} {}", units.from_meters(meters), units.label())
}
