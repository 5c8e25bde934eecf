//! Render primitive specifications.

use crate::geo::Coordinate;
use crate::location::GeolocationReading;
use crate::worksite::GeofencePoint;

/// Stroke color of a clock-in zone circle (RGBA hex).
pub const ZONE_STROKE_COLOR: &str = "#00880050";

/// Fill color of a clock-in zone circle (RGBA hex).
pub const ZONE_FILL_COLOR: &str = "#00880020";

/// Stroke width of a clock-in zone circle, in pixels.
pub const ZONE_STROKE_WIDTH: u32 = 1;

/// Snippet shown for an established clock-in point marker.
pub const POINT_MARKER_SNIPPET: &str =
    "Associates can clock in through their phone app from this point.";

/// Title of the transient preview marker drawn after a location capture.
pub const PREVIEW_MARKER_TITLE: &str = "GPS point";

/// Snippet of the transient preview marker.
pub const PREVIEW_MARKER_SNIPPET: &str = "A clock in/out point has been set here.";

/// Specification for a map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Marker title.
    pub title: String,
    /// Marker snippet/description.
    pub snippet: String,
    /// Marker position.
    pub position: Coordinate,
}

impl MarkerSpec {
    /// Marker for an established clock-in point.
    #[must_use]
    pub fn for_point(point: &GeofencePoint) -> Self {
        Self {
            title: point.name.clone(),
            snippet: POINT_MARKER_SNIPPET.to_string(),
            position: point.center(),
        }
    }

    /// Transient preview marker at a freshly acquired position.
    #[must_use]
    pub fn preview(reading: &GeolocationReading) -> Self {
        Self {
            title: PREVIEW_MARKER_TITLE.to_string(),
            snippet: PREVIEW_MARKER_SNIPPET.to_string(),
            position: reading.coordinate(),
        }
    }
}

/// Specification for a clock-in zone circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSpec {
    /// Circle center.
    pub center: Coordinate,
    /// Circle radius in meters.
    pub radius_meters: f64,
    /// Stroke color (RGBA hex).
    pub stroke_color: &'static str,
    /// Stroke width in pixels.
    pub stroke_width: u32,
    /// Fill color (RGBA hex).
    pub fill_color: &'static str,
}

impl CircleSpec {
    /// Zone circle for a clock-in point, in the standard zone colors.
    #[must_use]
    pub fn zone(point: &GeofencePoint) -> Self {
        Self {
            center: point.center(),
            radius_meters: point.radius_meters,
            stroke_color: ZONE_STROKE_COLOR,
            stroke_width: ZONE_STROKE_WIDTH,
            fill_color: ZONE_FILL_COLOR,
        }
    }
}
