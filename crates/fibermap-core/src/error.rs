//! Error types for route editing.

use thiserror::Error;

/// Errors raised by route mutations, hydration and save validation.
///
/// Every variant is recoverable: callers report it once and keep the
/// session alive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// A gesture referenced a point index that does not exist (usually stale).
    #[error("Point index {index} out of range for route of {len} points")]
    IndexOutOfRange { index: usize, len: usize },
    /// A stored route could not be read as a coordinate sequence.
    #[error("Malformed stored route: {0}")]
    MalformedStoredRoute(String),
    /// A save was attempted with a route that is not a path.
    #[error("Route needs at least 2 points, got {count}")]
    InsufficientPoints { count: usize },
    /// A mutation arrived while no edit session was active.
    #[error("No active edit session")]
    NoActiveSession,
    /// The presentation shell does not expose this gesture.
    #[error("Gesture '{gesture}' is not supported by the {shell} editor")]
    GestureNotSupported {
        gesture: &'static str,
        shell: &'static str,
    },
    /// Latitude or longitude was NaN or infinite.
    #[error("Coordinate ({lat}, {lng}) is not finite")]
    NonFiniteCoordinate { lat: f64, lng: f64 },
}

/// Result type for route operations.
pub type RouteResult<T> = Result<T, RouteError>;
