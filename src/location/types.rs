//! Geolocation reading and acquisition option types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Constraints for a single location acquisition.
///
/// The `Default` profile is the fresh-fix configuration used when placing a
/// clock-in point: no cached samples, a 10 second deadline, and the
/// high-accuracy sensor path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireOptions {
    /// Maximum acceptable age of a cached provider sample, in milliseconds.
    /// Zero mandates a fresh sample.
    pub max_age_ms: u64,
    /// Deadline for the acquisition, in milliseconds.
    pub timeout_ms: u64,
    /// Whether to request the high-accuracy sensor path (GPS rather than
    /// network triangulation).
    pub high_accuracy: bool,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            max_age_ms: 0,
            timeout_ms: 10_000,
            high_accuracy: true,
        }
    }
}

/// A single point-in-time location snapshot from the device sensor.
///
/// Ephemeral: produced once per acquisition call and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeolocationReading {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Reported 68% confidence radius of the fix, in meters.
    pub accuracy_meters: f64,
    /// When the fix was taken (Unix milliseconds).
    pub timestamp_ms: i64,
}

impl GeolocationReading {
    /// The reading's position as a coordinate.
    ///
    /// Device fixes are within valid range by contract; the conversion is
    /// infallible.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// When the fix was taken, as a UTC timestamp.
    ///
    /// Returns `None` if the provider reported a millisecond value outside
    /// the representable date range.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_mandate_fresh_high_accuracy_fix() {
        let options = AcquireOptions::default();
        assert_eq!(options.max_age_ms, 0);
        assert_eq!(options.timeout_ms, 10_000);
        assert!(options.high_accuracy);
    }

    #[test]
    fn reading_coordinate_conversion() {
        let reading = GeolocationReading {
            latitude: 40.0,
            longitude: -74.0,
            accuracy_meters: 3.0,
            timestamp_ms: 1_700_000_000_000,
        };
        let c = reading.coordinate();
        assert_eq!(c.latitude, 40.0);
        assert_eq!(c.longitude, -74.0);
    }

    #[test]
    fn reading_timestamp_converts_to_utc() {
        let reading = GeolocationReading {
            latitude: 40.0,
            longitude: -74.0,
            accuracy_meters: 3.0,
            timestamp_ms: 1_700_000_000_000,
        };
        let ts = reading.timestamp().unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn reading_roundtrip_json() {
        let reading = GeolocationReading {
            latitude: 40.0,
            longitude: -74.0,
            accuracy_meters: 3.0,
            timestamp_ms: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&reading).unwrap();
        let recovered: GeolocationReading = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, reading);
    }
}
