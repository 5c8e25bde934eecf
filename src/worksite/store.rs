//! Remote store contract for worksite geofence points.
//!
//! Transport is out of scope; implementations adapt whatever backend the app
//! talks to. The registry treats the store as the source of truth on `load`
//! and reconciles optimistic local mutations against its responses.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{GeofenceDraft, GeofencePoint, Worksite};

/// A failed store request (transport or backend).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("store request failed: {0}")]
pub struct StoreError(pub String);

/// Backend acknowledgment for a create request.
///
/// Mirrors the store payload: `status` signals acceptance, `id` carries the
/// assigned point id, `msg`/`err` carry the human-readable outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAck {
    /// Whether the store accepted the point.
    pub status: bool,
    /// Assigned point id when `status` is true.
    pub id: Option<u64>,
    /// Success message.
    pub msg: Option<String>,
    /// Failure message when `status` is false.
    pub err: Option<String>,
}

impl CreateAck {
    /// The failure message to surface, with a fallback for stores that
    /// reject without one.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.err
            .clone()
            .unwrap_or_else(|| "store rejected the create request".to_string())
    }
}

/// Remote store of worksites and their geofence points.
///
/// `worksite_locations` returns points in insertion order; that order is the
/// canonical render order and the clock-in tie-break order.
pub trait WorksiteStore: Send + Sync {
    /// Fetches a worksite by id.
    fn worksite(&self, id: u64) -> impl Future<Output = Result<Worksite, StoreError>> + Send;

    /// Fetches the geofence points of a worksite, in insertion order.
    fn worksite_locations(
        &self,
        worksite_id: u64,
    ) -> impl Future<Output = Result<Vec<GeofencePoint>, StoreError>> + Send;

    /// Creates a geofence point for a worksite.
    fn create_worksite_location(
        &self,
        worksite_id: u64,
        draft: &GeofenceDraft,
    ) -> impl Future<Output = Result<CreateAck, StoreError>> + Send;

    /// Deletes a geofence point by id.
    fn delete_worksite_location(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
