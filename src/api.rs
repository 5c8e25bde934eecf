//! High-level worksite session API.
//!
//! [`WorksiteSession`] wires the registry, the map projector, the
//! geolocation acquirer and the clock-in validator into the flows the UI
//! drives: open a worksite, capture and confirm a new clock-in point,
//! delete a point, validate a clock-in. The session owns presentation of
//! nothing; every failure is returned as a structured error for the caller
//! to surface.

use thiserror::Error;

use crate::clockin::{validate, ValidationResult};
use crate::geo::{offset, Coordinate};
use crate::location::{
    AcquireOptions, GeolocationAcquirer, GeolocationReading, LocationError, LocationProvider,
    ProgressIndicator,
};
use crate::map::{MapSyncProjector, RenderProvider};
use crate::worksite::{
    GeofenceDraft, GeofencePoint, GeofenceRegistry, RegistryError, Worksite, WorksiteStore,
};

/// Radius in meters of the initial camera framing around a worksite center.
pub const FRAMING_RADIUS_METERS: f64 = 50.0;

/// Bearings of the four cardinal framing anchors, degrees clockwise from
/// north.
pub const FRAMING_BEARINGS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Error type for session operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Location acquisition failed.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// An operation needed a captured location, but none is held.
    #[error("no location has been captured")]
    NoCapturedLocation,
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// One worksite's active session: registry, projector and acquirer bound
/// together for the supervisor and employee flows.
///
/// Sessions are per-worksite; `open` switches context and resets the map
/// surface.
pub struct WorksiteSession<S, P, L, I>
where
    S: WorksiteStore,
    P: RenderProvider,
    L: LocationProvider,
    I: ProgressIndicator,
{
    registry: GeofenceRegistry<S>,
    projector: MapSyncProjector<P>,
    acquirer: GeolocationAcquirer<L, I>,
    worksite: Option<Worksite>,
    captured: Option<GeolocationReading>,
}

impl<S, P, L, I> WorksiteSession<S, P, L, I>
where
    S: WorksiteStore,
    P: RenderProvider,
    L: LocationProvider,
    I: ProgressIndicator,
{
    /// Creates a session over the three collaborators.
    pub fn new(store: S, render: P, provider: L, indicator: I) -> Self {
        Self {
            registry: GeofenceRegistry::new(store),
            projector: MapSyncProjector::new(render),
            acquirer: GeolocationAcquirer::new(provider, indicator),
            worksite: None,
            captured: None,
        }
    }

    /// Opens a worksite: fetches it, loads its points and redraws the map.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LoadFailed`] (wrapped) if either store call
    /// fails; on a points-load failure the map is left cleared rather than
    /// showing another worksite's zones.
    pub async fn open(&mut self, worksite_id: u64) -> Result<Worksite> {
        let worksite = self.registry.worksite(worksite_id).await?;
        self.worksite = Some(worksite);
        self.captured = None;
        self.projector.clear();

        let entries = self.registry.load(worksite_id).await?;
        self.projector.sync(&entries).await;
        Ok(worksite)
    }

    /// The opened worksite, if any.
    #[must_use]
    pub const fn worksite(&self) -> Option<&Worksite> {
        self.worksite.as_ref()
    }

    /// Four cardinal points around the worksite center for initial camera
    /// framing.
    #[must_use]
    pub fn framing_anchors(&self) -> Option<[Coordinate; 4]> {
        let center = self.worksite?.center();
        Some(FRAMING_BEARINGS.map(|bearing| offset(center, FRAMING_RADIUS_METERS, bearing)))
    }

    /// Default name for the next point, numbered after the current count.
    pub async fn next_point_name(&self) -> String {
        let count = self.registry.entries().await.len();
        format!("Point #{}", count + 1)
    }

    /// Captures a fresh location fix and draws the preview marker.
    ///
    /// Uses the fresh-fix acquisition profile (no cached samples, 10 s
    /// deadline, high accuracy). The captured reading is held until
    /// [`confirm_point`](Self::confirm_point) or
    /// [`cancel_capture`](Self::cancel_capture).
    ///
    /// # Errors
    ///
    /// Propagates the acquisition failure; no preview is drawn and no
    /// registry state changes.
    pub async fn capture_point(&mut self) -> Result<GeolocationReading> {
        let reading = self.acquirer.acquire(&AcquireOptions::default()).await?;
        self.projector.set_preview(&reading).await;
        self.captured = Some(reading);
        Ok(reading)
    }

    /// Cancels an in-progress capture, discarding the preview marker.
    ///
    /// Registry and projector return to their prior committed state; no
    /// partial commit is visible.
    pub fn cancel_capture(&mut self) {
        self.captured = None;
        self.projector.clear_preview();
    }

    /// Confirms the captured location as a new clock-in point.
    ///
    /// Validates the draft, creates it through the registry (optimistic,
    /// rolled back on store failure), then swaps the preview marker for the
    /// synced point primitives.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoCapturedLocation`] without a prior capture
    /// - Registry validation/creation errors, wrapped in
    ///   [`SessionError::Registry`]
    pub async fn confirm_point(&mut self, name: &str, radius_meters: f64) -> Result<GeofencePoint> {
        let reading = self.captured.ok_or(SessionError::NoCapturedLocation)?;
        let center = Coordinate::new(reading.latitude, reading.longitude)
            .map_err(RegistryError::from)?;

        let result = self
            .registry
            .create(GeofenceDraft {
                name: name.to_string(),
                radius_meters,
                center,
            })
            .await;

        match result {
            Ok(point) => {
                self.captured = None;
                self.projector.clear_preview();
                let entries = self.registry.entries().await;
                self.projector.sync(&entries).await;
                Ok(point)
            }
            Err(err) => {
                // Capture and preview stay; the user may retry or cancel.
                Err(err.into())
            }
        }
    }

    /// Deletes a clock-in point and redraws the map.
    ///
    /// The local removal is rendered even when the store call fails; the
    /// error is still surfaced (store deletions reconcile on the next
    /// open).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DeleteFailed`] (wrapped) if the store call
    /// fails.
    pub async fn delete_point(&mut self, id: u64) -> Result<()> {
        let result = self.registry.delete(id).await;
        let entries = self.registry.entries().await;
        self.projector.sync(&entries).await;
        result.map_err(SessionError::from)
    }

    /// Acquires a fresh fix and validates it against the worksite's
    /// confirmed clock-in points.
    ///
    /// # Errors
    ///
    /// Propagates the acquisition failure.
    pub async fn validate_clock_in(&mut self) -> Result<ValidationResult> {
        let reading = self.acquirer.acquire(&AcquireOptions::default()).await?;
        let points = self.registry.confirmed_points().await;
        Ok(validate(&reading, &points))
    }
}
