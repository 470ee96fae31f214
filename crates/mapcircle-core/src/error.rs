//! Error handling for MapCircle
//!
//! Provides error types for the layers of the library:
//! - Circle errors (invariant violations, invalid input)
//! - Host errors (failures reported by the map host)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Circle error type
///
/// Represents programmer errors and rejected input on a circle instance.
/// Out-of-range radii are clamped rather than reported here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircleError {
    /// The circle is attached and a different map was supplied
    #[error("Circle {instance} is already attached to a different map")]
    MapAlreadyAssigned {
        /// The instance id of the circle.
        instance: u64,
    },

    /// Options failed validation
    #[error("Invalid circle options: {reason}")]
    InvalidOptions {
        /// The reason the options were rejected.
        reason: String,
    },

    /// Center is not a valid longitude/latitude pair
    #[error("Invalid center ({lng}, {lat})")]
    InvalidCenter {
        /// The rejected longitude.
        lng: f64,
        /// The rejected latitude.
        lat: f64,
    },

    /// Radius is not a finite number
    #[error("Invalid radius: {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
}

/// Host map error type
///
/// Represents failures reported by the map that renders the circle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A source with this id already exists
    #[error("Source already exists: {id}")]
    SourceExists {
        /// The source id.
        id: String,
    },

    /// No source with this id
    #[error("Source not found: {id}")]
    SourceNotFound {
        /// The source id.
        id: String,
    },

    /// A layer with this id already exists
    #[error("Layer already exists: {id}")]
    LayerExists {
        /// The layer id.
        id: String,
    },

    /// No layer with this id
    #[error("Layer not found: {id}")]
    LayerNotFound {
        /// The layer id.
        id: String,
    },

    /// Generic host error
    #[error("Host error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for MapCircle
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Circle error
    #[error(transparent)]
    Circle(#[from] CircleError),

    /// Host error
    #[error(transparent)]
    Host(#[from] HostError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a circle error
    pub fn is_circle_error(&self) -> bool {
        matches!(self, Error::Circle(_))
    }

    /// Check if this is a host error
    pub fn is_host_error(&self) -> bool {
        matches!(self, Error::Host(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_error_display() {
        let err = CircleError::MapAlreadyAssigned { instance: 3 };
        assert_eq!(
            err.to_string(),
            "Circle 3 is already attached to a different map"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = HostError::LayerNotFound {
            id: "circle-fill-layer-0".to_string(),
        }
        .into();
        assert!(err.is_host_error());
        assert!(!err.is_circle_error());
        assert_eq!(err.to_string(), "Layer not found: circle-fill-layer-0");
    }

    #[test]
    fn test_other() {
        let err = Error::other("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
