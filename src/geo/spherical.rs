//! Great-circle distance and bearing projection.
//!
//! Containment decisions use [`distance_meters`] only; [`offset`] exists for
//! visualization anchors (camera framing around a zone center) and is never
//! part of an accept/reject decision.

use super::types::Coordinate;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Great-circle (haversine) distance between two coordinates, in meters.
///
/// Symmetric, and zero iff `a == b` within floating tolerance.
///
/// # Examples
///
/// ```
/// use siteclock_core::geo::{distance_meters, Coordinate};
///
/// let a = Coordinate::new(40.0, -74.0).unwrap();
/// assert_eq!(distance_meters(a, a), 0.0);
/// ```
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a few ULPs past 1.0 for near-antipodal pairs,
    // where sqrt().asin() would return NaN.
    2.0 * EARTH_RADIUS_METERS * h.min(1.0).sqrt().asin()
}

/// Projects a point `distance_meters` from `center` along `bearing_degrees`.
///
/// Bearing is clockwise from true north. The resulting longitude is
/// normalized back into [-180, 180], so the output is always a valid
/// coordinate.
#[must_use]
pub fn offset(center: Coordinate, distance_meters: f64, bearing_degrees: f64) -> Coordinate {
    let angular = distance_meters / EARTH_RADIUS_METERS;
    let bearing = bearing_degrees.to_radians();
    let lat1 = center.latitude.to_radians();
    let lon1 = center.longitude.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    Coordinate {
        latitude: lat2.to_degrees().clamp(-90.0, 90.0),
        longitude: normalize_longitude(lon2.to_degrees()),
    }
}

/// Wraps a longitude in degrees into [-180, 180].
fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the canonical positive form.
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = coord(40.0, -74.0);
        assert_eq!(distance_meters(a, a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(40.0, -74.0);
        let b = coord(40.001, -74.001);
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }

    #[test]
    fn distance_one_degree_latitude() {
        // One degree of latitude is roughly 111.2 km on the mean sphere.
        let a = coord(0.0, 0.0);
        let b = coord(1.0, 0.0);
        let d = distance_meters(a, b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn distance_short_range_accuracy() {
        // ~20m north of the reference point used in the clock-in scenarios.
        let a = coord(40.0, -74.0);
        let b = coord(40.000_18, -74.0);
        let d = distance_meters(a, b);
        assert!((d - 20.0).abs() < 0.5, "got {d}");
    }

    #[test]
    fn distance_near_antipodal_is_finite() {
        // Rounding here pushes the haversine term past 1.0; the distance
        // must still come out as roughly half the Earth's circumference.
        let a = coord(61.898_547_521_506_77, 97.002_068_385_055_4);
        let b = coord(-61.898_547_521_417_72, -82.997_931_615_235_47);
        let d = distance_meters(a, b);
        assert!(d.is_finite(), "got {d}");
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half_circumference).abs() < 100.0, "got {d}");
    }

    #[test]
    fn distance_exactly_antipodal_is_half_circumference() {
        let a = coord(0.0, 90.0);
        let b = coord(0.0, -90.0);
        let d = distance_meters(a, b);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1.0, "got {d}");
    }

    #[test]
    fn offset_north_increases_latitude() {
        let center = coord(40.0, -74.0);
        let p = offset(center, 50.0, 0.0);
        assert!(p.latitude > center.latitude);
        assert!((p.longitude - center.longitude).abs() < 1e-9);
    }

    #[test]
    fn offset_east_increases_longitude() {
        let center = coord(40.0, -74.0);
        let p = offset(center, 50.0, 90.0);
        assert!(p.longitude > center.longitude);
    }

    #[test]
    fn offset_roundtrips_through_distance() {
        let center = coord(40.0, -74.0);
        for bearing in [0.0, 90.0, 180.0, 270.0] {
            let p = offset(center, 50.0, bearing);
            let d = distance_meters(center, p);
            assert!((d - 50.0).abs() < 0.01, "bearing {bearing}: got {d}");
        }
    }

    #[test]
    fn offset_is_deterministic() {
        let center = coord(40.0, -74.0);
        let a = offset(center, 120.0, 45.0);
        let b = offset(center, 120.0, 45.0);
        assert_eq!(a, b);
    }

    #[test]
    fn offset_normalizes_across_date_line() {
        let center = coord(0.0, 179.999);
        let p = offset(center, 1_000.0, 90.0);
        assert!(p.longitude >= -180.0 && p.longitude <= 180.0);
        assert!(p.longitude < 0.0, "expected wrap, got {}", p.longitude);
    }

    #[test]
    fn offset_output_is_valid_coordinate() {
        let center = coord(89.9999, 0.0);
        let p = offset(center, 5_000.0, 0.0);
        assert!(Coordinate::new(p.latitude, p.longitude).is_ok());
    }
}
