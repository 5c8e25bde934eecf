//! Authoritative in-memory registry of a worksite's geofence points.
//!
//! The registry mirrors the remote store for one worksite at a time.
//! Mutations are optimistic: `create` appends a pending draft before the
//! store confirms it, `delete` removes locally before the store acknowledges.
//! A create failure rolls the draft back; a delete failure keeps the local
//! removal and the next `load` reconciles.
//!
//! Every request is tagged with the registry generation at issue time.
//! `load` bumps the generation, so responses that arrive after a worksite
//! switch are recognized as stale and never mutate registry state.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::error::{RegistryError, Result};
use super::store::WorksiteStore;
use super::types::{GeofenceDraft, GeofencePoint, PointKey, RegistryEntry, Worksite, MIN_NAME_LEN};

#[derive(Debug, Default)]
struct RegistryState {
    worksite_id: Option<u64>,
    entries: Vec<RegistryEntry>,
    generation: u64,
    draft_seq: u64,
}

/// In-memory list of geofence points for the loaded worksite, reconciled
/// against a remote [`WorksiteStore`].
///
/// State lives behind an async lock; store calls are awaited with the lock
/// released, so a `load` can supersede an in-flight `create`/`delete`
/// response via the generation check.
#[derive(Debug)]
pub struct GeofenceRegistry<S> {
    store: S,
    state: RwLock<RegistryState>,
}

impl<S: WorksiteStore> GeofenceRegistry<S> {
    /// Creates an empty registry over a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Fetches a worksite record from the store.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LoadFailed`] if the store call fails.
    pub async fn worksite(&self, id: u64) -> Result<Worksite> {
        self.store
            .worksite(id)
            .await
            .map_err(|e| RegistryError::LoadFailed(e.to_string()))
    }

    /// Replaces the registry contents with the store's points for a worksite.
    ///
    /// Clears any prior worksite's points first, so a load failure never
    /// leaves another worksite's points visible. Store order is preserved as
    /// the canonical render and tie-break order; duplicate confirmed ids are
    /// dropped with a warning.
    ///
    /// Returns the registry's contents after the load. If another `load`
    /// superseded this one while its response was in flight, the response is
    /// discarded and the current contents are returned.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LoadFailed`] if the store call fails.
    pub async fn load(&self, worksite_id: u64) -> Result<Vec<RegistryEntry>> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.worksite_id = Some(worksite_id);
            state.entries.clear();
            state.generation
        };

        let points = self
            .store
            .worksite_locations(worksite_id)
            .await
            .map_err(|e| RegistryError::LoadFailed(e.to_string()))?;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(worksite_id, "discarding stale load response");
            return Ok(state.entries.clone());
        }

        for point in points {
            let Some(id) = point.id else {
                warn!(worksite_id, "store returned a point without an id; dropped");
                continue;
            };
            if state
                .entries
                .iter()
                .any(|e| e.key == PointKey::Confirmed(id))
            {
                warn!(worksite_id, id, "store returned a duplicate point id; dropped");
                continue;
            }
            state.entries.push(RegistryEntry {
                key: PointKey::Confirmed(id),
                point,
            });
        }

        debug!(worksite_id, count = state.entries.len(), "worksite points loaded");
        Ok(state.entries.clone())
    }

    /// Creates a geofence point from a draft.
    ///
    /// The draft is validated first (no store call on bad input), appended
    /// as an optimistic pending entry, then sent to the store. On success
    /// the pending entry is promoted to the confirmed point with the
    /// store-assigned id; on failure it is removed again.
    ///
    /// A response arriving after an intervening `load` never mutates the
    /// registry; the returned value still reflects the store's outcome.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] for a short name or non-positive
    ///   radius
    /// - [`RegistryError::WorksiteNotLoaded`] if no `load` has happened
    /// - [`RegistryError::CreateInProgress`] while another create is pending
    /// - [`RegistryError::CreateFailed`] if the store rejects or fails
    pub async fn create(&self, draft: GeofenceDraft) -> Result<GeofencePoint> {
        validate_draft(&draft)?;

        let (generation, draft_key, worksite_id) = {
            let mut state = self.state.write().await;
            let worksite_id = state.worksite_id.ok_or(RegistryError::WorksiteNotLoaded)?;
            if state.entries.iter().any(RegistryEntry::is_pending) {
                return Err(RegistryError::CreateInProgress);
            }

            state.draft_seq += 1;
            let key = PointKey::Draft(state.draft_seq);
            state.entries.push(RegistryEntry {
                key,
                point: GeofencePoint {
                    id: None,
                    worksite_id,
                    name: draft.name.clone(),
                    latitude: draft.center.latitude,
                    longitude: draft.center.longitude,
                    radius_meters: draft.radius_meters,
                },
            });
            (state.generation, key, worksite_id)
        };

        let ack = self.store.create_worksite_location(worksite_id, &draft).await;

        let mut state = self.state.write().await;
        let slot = if state.generation == generation {
            state.entries.iter().position(|e| e.key == draft_key)
        } else {
            debug!(worksite_id, "create response arrived after reload; registry untouched");
            None
        };

        match ack {
            Ok(ack) if ack.status => {
                let Some(id) = ack.id else {
                    if let Some(slot) = slot {
                        state.entries.remove(slot);
                    }
                    return Err(RegistryError::CreateFailed(
                        "store confirmed creation without an id".to_string(),
                    ));
                };

                let confirmed = GeofencePoint {
                    id: Some(id),
                    worksite_id,
                    name: draft.name,
                    latitude: draft.center.latitude,
                    longitude: draft.center.longitude,
                    radius_meters: draft.radius_meters,
                };
                if let Some(slot) = slot {
                    state.entries[slot] = RegistryEntry {
                        key: PointKey::Confirmed(id),
                        point: confirmed.clone(),
                    };
                    debug!(worksite_id, id, "clock-in point confirmed");
                }
                Ok(confirmed)
            }
            Ok(ack) => {
                if let Some(slot) = slot {
                    state.entries.remove(slot);
                }
                warn!(worksite_id, "store rejected clock-in point");
                Err(RegistryError::CreateFailed(ack.failure_message()))
            }
            Err(err) => {
                if let Some(slot) = slot {
                    state.entries.remove(slot);
                }
                warn!(worksite_id, error = %err, "clock-in point creation failed");
                Err(RegistryError::CreateFailed(err.to_string()))
            }
        }
    }

    /// Deletes a confirmed geofence point.
    ///
    /// The point is removed locally before the store call. A store failure
    /// surfaces as [`RegistryError::DeleteFailed`] but the local removal
    /// stands; store deletions are eventually consistent and the next `load`
    /// reconciles. A response arriving after an intervening `load` is
    /// discarded silently.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DeleteFailed`] if the store call fails.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let generation = {
            let mut state = self.state.write().await;
            let before = state.entries.len();
            state.entries.retain(|e| e.key != PointKey::Confirmed(id));
            if state.entries.len() == before {
                warn!(id, "delete requested for a point not in the registry");
            }
            state.generation
        };

        let result = self.store.delete_worksite_location(id).await;

        let state = self.state.read().await;
        if state.generation != generation {
            debug!(id, "delete response arrived after reload; discarded");
            return Ok(());
        }

        result.map_err(|err| {
            warn!(id, error = %err, "clock-in point deletion failed at the store");
            RegistryError::DeleteFailed(err.to_string())
        })
    }

    /// Ordered snapshot of the registry's current entries.
    pub async fn entries(&self) -> Vec<RegistryEntry> {
        self.state.read().await.entries.clone()
    }

    /// The confirmed points, in registry order.
    pub async fn confirmed_points(&self) -> Vec<GeofencePoint> {
        self.state
            .read()
            .await
            .entries
            .iter()
            .filter(|e| !e.is_pending())
            .map(|e| e.point.clone())
            .collect()
    }

    /// The currently loaded worksite id, if any.
    pub async fn worksite_id(&self) -> Option<u64> {
        self.state.read().await.worksite_id
    }

    /// Whether a create is currently awaiting store confirmation.
    pub async fn has_pending_create(&self) -> bool {
        self.state
            .read()
            .await
            .entries
            .iter()
            .any(RegistryEntry::is_pending)
    }
}

fn validate_draft(draft: &GeofenceDraft) -> Result<()> {
    if draft.name.chars().count() < MIN_NAME_LEN {
        return Err(RegistryError::Validation(format!(
            "name must be at least {MIN_NAME_LEN} characters"
        )));
    }
    if !draft.radius_meters.is_finite() || draft.radius_meters <= 0.0 {
        return Err(RegistryError::Validation(
            "radius must be a positive number of meters".to_string(),
        ));
    }
    Ok(())
}
