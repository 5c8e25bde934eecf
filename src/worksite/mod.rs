//! Worksite geofence management.
//!
//! The [`GeofenceRegistry`] is the authoritative in-memory list of clock-in
//! zones for one worksite, reconciled against a remote [`WorksiteStore`]:
//! optimistic create with rollback, optimistic delete with
//! eventual-consistency reconciliation, and generation-tagged requests so a
//! worksite switch silently invalidates in-flight responses.
//!
//! # Example
//!
//! ```ignore
//! use siteclock_core::worksite::{GeofenceDraft, GeofenceRegistry};
//!
//! let registry = GeofenceRegistry::new(store);
//! registry.load(worksite_id).await?;
//! let point = registry.create(GeofenceDraft { name, radius_meters, center }).await?;
//! registry.delete(point.id.unwrap()).await?;
//! ```

pub mod error;
pub mod registry;
pub mod store;
pub mod types;

pub use error::RegistryError;
pub use registry::GeofenceRegistry;
pub use store::{CreateAck, StoreError, WorksiteStore};
pub use types::{
    GeofenceDraft, GeofencePoint, PointKey, RegistryEntry, Worksite, DEFAULT_RADIUS_METERS,
    MIN_NAME_LEN,
};
