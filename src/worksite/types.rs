//! Core types for worksite geofence management.
//!
//! A worksite owns an ordered set of circular clock-in zones (geofence
//! points). Points are created as local optimistic drafts, promoted to
//! confirmed once the remote store assigns an id, and only ever removed by
//! deletion; center and radius are immutable after creation.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Minimum length of a geofence point name.
pub const MIN_NAME_LEN: usize = 5;

/// Default clock-in zone radius, in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 5.0;

/// A worksite: the parent map context a set of geofence points belongs to.
///
/// Owned by the backend; read-only to this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Worksite {
    /// Backend-assigned worksite id.
    pub id: u64,
    /// Owning client id.
    pub client_id: u64,
    /// Latitude of the worksite center, degrees.
    pub latitude: f64,
    /// Longitude of the worksite center, degrees.
    pub longitude: f64,
}

impl Worksite {
    /// The worksite center as a coordinate.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A circular clock-in zone belonging to exactly one worksite.
///
/// `id` is `None` for a local draft that the store has not yet confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofencePoint {
    /// Store-assigned id; `None` while the point is an unconfirmed draft.
    pub id: Option<u64>,
    /// The owning worksite.
    pub worksite_id: u64,
    /// User-facing name, at least [`MIN_NAME_LEN`] characters.
    pub name: String,
    /// Latitude of the zone center, degrees.
    pub latitude: f64,
    /// Longitude of the zone center, degrees.
    pub longitude: f64,
    /// Zone radius in meters, strictly positive.
    pub radius_meters: f64,
}

impl GeofencePoint {
    /// The zone center as a coordinate.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// User input for a new clock-in zone, before any store interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceDraft {
    /// Requested point name.
    pub name: String,
    /// Requested zone radius in meters.
    pub radius_meters: f64,
    /// Zone center, already range-validated by construction.
    pub center: Coordinate,
}

impl GeofenceDraft {
    /// Draft with the standard [`DEFAULT_RADIUS_METERS`] zone radius, as the
    /// creation form pre-fills it.
    #[must_use]
    pub fn new(name: impl Into<String>, center: Coordinate) -> Self {
        Self {
            name: name.into(),
            radius_meters: DEFAULT_RADIUS_METERS,
            center,
        }
    }
}

/// Identity of a registry entry for render synchronization.
///
/// Confirmed points are keyed by their store id. A pending draft gets a
/// locally generated placeholder key, unique per draft, so a draft is always
/// a fresh add on the map and its confirmation swaps the draft primitive for
/// a confirmed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKey {
    /// Store-assigned id of a confirmed point.
    Confirmed(u64),
    /// Local placeholder key of a pending draft.
    Draft(u64),
}

/// A registry entry: the pending/confirmed state tag plus the point itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    /// Render identity of this entry.
    pub key: PointKey,
    /// The geofence point; `point.id` is `Some` iff the key is `Confirmed`.
    pub point: GeofencePoint,
}

impl RegistryEntry {
    /// Whether this entry is still awaiting store confirmation.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.key, PointKey::Draft(_))
    }
}
