//! Spherical geometry for geofence evaluation.
//!
//! Provides:
//! - A validated [`Coordinate`] type (range-checked at construction)
//! - Haversine great-circle [`distance_meters`]
//! - Bearing [`offset`] projection for visualization anchors
//!
//! # Example
//!
//! ```
//! use siteclock_core::geo::{distance_meters, offset, Coordinate};
//!
//! let site = Coordinate::new(40.0, -74.0).unwrap();
//! let north = offset(site, 50.0, 0.0);
//! assert!((distance_meters(site, north) - 50.0).abs() < 0.01);
//! ```

pub mod spherical;
pub mod types;

pub use spherical::{distance_meters, offset, EARTH_RADIUS_METERS};
pub use types::{Coordinate, GeoError};
