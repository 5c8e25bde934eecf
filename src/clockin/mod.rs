//! Clock-in validation: does a location reading fall inside any geofence?
//!
//! A reading is inside a zone iff the great-circle distance to the zone
//! center is within `radius_meters + accuracy_meters`. The accuracy margin
//! is deliberate: a low-confidence fix near the boundary must not be
//! rejected solely due to sensor noise. When zones overlap, the first
//! containing point in registry (insertion) order wins, so repeated calls
//! against the same registry state are deterministic.

use crate::geo::distance_meters;
use crate::location::GeolocationReading;
use crate::worksite::GeofencePoint;

/// Outcome of validating a reading against a worksite's geofences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// The reading falls inside a geofence; carries the first matching
    /// point's id in registry order.
    Inside {
        /// Store id of the matched clock-in point.
        point_id: u64,
    },
    /// No geofence contains the reading.
    Outside,
}

impl ValidationResult {
    /// Whether the reading was accepted.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        matches!(self, Self::Inside { .. })
    }
}

/// Validates a reading against an ordered sequence of geofence points.
///
/// Points without a confirmed id (pending drafts) cannot authorize a
/// clock-in and are skipped.
///
/// # Examples
///
/// ```
/// use siteclock_core::clockin::{validate, ValidationResult};
/// use siteclock_core::location::GeolocationReading;
/// use siteclock_core::worksite::GeofencePoint;
///
/// let zone = GeofencePoint {
///     id: Some(42),
///     worksite_id: 1,
///     name: "Main gate".to_string(),
///     latitude: 40.0,
///     longitude: -74.0,
///     radius_meters: 5.0,
/// };
/// let reading = GeolocationReading {
///     latitude: 40.0,
///     longitude: -74.0,
///     accuracy_meters: 3.0,
///     timestamp_ms: 0,
/// };
/// assert_eq!(validate(&reading, &[zone]), ValidationResult::Inside { point_id: 42 });
/// ```
#[must_use]
pub fn validate(reading: &GeolocationReading, points: &[GeofencePoint]) -> ValidationResult {
    let position = reading.coordinate();
    for point in points {
        let Some(point_id) = point.id else { continue };
        let distance = distance_meters(position, point.center());
        if distance <= point.radius_meters + reading.accuracy_meters {
            return ValidationResult::Inside { point_id };
        }
    }
    ValidationResult::Outside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: u64, lat: f64, lon: f64, radius: f64) -> GeofencePoint {
        GeofencePoint {
            id: Some(id),
            worksite_id: 1,
            name: format!("Point #{id}"),
            latitude: lat,
            longitude: lon,
            radius_meters: radius,
        }
    }

    fn reading(lat: f64, lon: f64, accuracy: f64) -> GeolocationReading {
        GeolocationReading {
            latitude: lat,
            longitude: lon,
            accuracy_meters: accuracy,
            timestamp_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn reading_at_zone_center_is_inside() {
        // 5m zone, reading at the center with 3m accuracy.
        let result = validate(&reading(40.0, -74.0, 3.0), &[zone(42, 40.0, -74.0, 5.0)]);
        assert_eq!(result, ValidationResult::Inside { point_id: 42 });
    }

    #[test]
    fn reading_twenty_meters_away_is_outside() {
        // ~20m north of the zone center; 5m radius + 3m accuracy can't reach.
        let result = validate(
            &reading(40.000_18, -74.0, 3.0),
            &[zone(42, 40.0, -74.0, 5.0)],
        );
        assert_eq!(result, ValidationResult::Outside);
    }

    #[test]
    fn accuracy_margin_admits_boundary_reading() {
        // ~7m away: outside the 5m radius alone, inside with the 3m margin.
        let point = zone(42, 40.0, -74.0, 5.0);
        let near = reading(40.000_063, -74.0, 3.0);

        assert_eq!(
            validate(&near, std::slice::from_ref(&point)),
            ValidationResult::Inside { point_id: 42 }
        );

        let exact = reading(40.000_063, -74.0, 0.0);
        assert_eq!(validate(&exact, &[point]), ValidationResult::Outside);
    }

    #[test]
    fn first_zone_in_registry_order_wins() {
        // Two overlapping zones both contain the reading.
        let p1 = zone(1, 40.0, -74.0, 50.0);
        let p2 = zone(2, 40.000_1, -74.0, 50.0);
        let result = validate(&reading(40.000_05, -74.0, 3.0), &[p1, p2]);
        assert_eq!(result, ValidationResult::Inside { point_id: 1 });
    }

    #[test]
    fn order_decides_ties_deterministically() {
        let p1 = zone(1, 40.0, -74.0, 50.0);
        let p2 = zone(2, 40.000_1, -74.0, 50.0);
        let r = reading(40.000_05, -74.0, 3.0);

        let forward = validate(&r, &[p1.clone(), p2.clone()]);
        let reversed = validate(&r, &[p2, p1]);

        assert_eq!(forward, ValidationResult::Inside { point_id: 1 });
        assert_eq!(reversed, ValidationResult::Inside { point_id: 2 });
    }

    #[test]
    fn pending_drafts_are_skipped() {
        let mut pending = zone(0, 40.0, -74.0, 50.0);
        pending.id = None;
        let result = validate(&reading(40.0, -74.0, 3.0), &[pending]);
        assert_eq!(result, ValidationResult::Outside);
    }

    #[test]
    fn empty_registry_is_outside() {
        assert_eq!(validate(&reading(40.0, -74.0, 3.0), &[]), ValidationResult::Outside);
    }

    #[test]
    fn is_inside_helper() {
        assert!(ValidationResult::Inside { point_id: 1 }.is_inside());
        assert!(!ValidationResult::Outside.is_inside());
    }
}
