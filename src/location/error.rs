//! Error types for geolocation acquisition.

use thiserror::Error;

/// Errors that can occur while acquiring a device location fix.
///
/// Acquisition is a single attempt; none of these are retried internally.
/// The caller decides whether to let the user try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// No reading was produced within the requested timeout.
    #[error("location acquisition timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The device reports the app lacks location authorization.
    #[error("location permission denied")]
    PermissionDenied,

    /// Any other provider-reported failure.
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}

/// Result type alias for acquisition operations.
pub type Result<T> = std::result::Result<T, LocationError>;
