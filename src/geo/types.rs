//! Geographic coordinate type and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for geometry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude or longitude outside the valid range (or non-finite).
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        /// The offending latitude.
        latitude: f64,
        /// The offending longitude.
        longitude: f64,
    },
}

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// A validated geographic coordinate.
///
/// Construction through [`Coordinate::new`] guarantees latitude is within
/// [-90, 90] and longitude within [-180, 180], both finite. Geometry
/// functions take coordinates by value and never re-validate.
///
/// # Examples
///
/// ```
/// use siteclock_core::geo::Coordinate;
///
/// let c = Coordinate::new(40.0, -74.0).unwrap();
/// assert_eq!(c.latitude, 40.0);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating range and finiteness.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCoordinate`] if either component is
    /// non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if lat_ok && lon_ok {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }
}
