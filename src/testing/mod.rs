//! Test utilities: in-memory collaborator doubles.
//!
//! Available to unit tests and, behind the `test-utils` feature, to
//! integration tests. DO NOT use in production: doubles hold state in plain
//! memory and panic on poisoned locks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::location::{
    AcquireOptions, GeolocationReading, LocationError, LocationProvider, ProgressIndicator,
};
use crate::map::{CircleSpec, MarkerSpec, RenderProvider};
use crate::worksite::{CreateAck, GeofenceDraft, GeofencePoint, StoreError, Worksite, WorksiteStore};

// ==================== Store double ====================

#[derive(Debug, Default)]
struct StoreInner {
    worksites: HashMap<u64, Worksite>,
    points: Vec<GeofencePoint>,
    next_id: u64,
    fail_next_load: Option<String>,
    fail_next_create: Option<String>,
    reject_next_create: Option<String>,
    fail_next_delete: Option<String>,
    create_gate: Option<Arc<Notify>>,
    delete_gate: Option<Arc<Notify>>,
    create_calls: usize,
    delete_calls: usize,
}

/// In-memory [`WorksiteStore`] with scriptable failures and gates.
///
/// Clones share state, so a test can keep a handle for inspection after
/// handing the store to a registry.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store; assigned ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                next_id: 1,
                ..StoreInner::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap()
    }

    /// Registers a worksite.
    pub fn insert_worksite(&self, worksite: Worksite) {
        self.lock().worksites.insert(worksite.id, worksite);
    }

    /// Seeds a confirmed point, returning its assigned id.
    pub fn seed_point(&self, worksite_id: u64, name: &str, lat: f64, lon: f64, radius: f64) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.points.push(GeofencePoint {
            id: Some(id),
            worksite_id,
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            radius_meters: radius,
        });
        id
    }

    /// Seeds a second point carrying an already-used id (corrupt backend).
    pub fn seed_duplicate_of(&self, worksite_id: u64, id: u64) {
        let mut inner = self.lock();
        let Some(original) = inner
            .points
            .iter()
            .find(|p| p.id == Some(id) && p.worksite_id == worksite_id)
            .cloned()
        else {
            panic!("no point with id {id} to duplicate");
        };
        inner.points.push(original);
    }

    /// Forces the next assigned id.
    pub fn set_next_id(&self, id: u64) {
        self.lock().next_id = id;
    }

    /// Fails the next `worksite_locations` call with a transport error.
    pub fn fail_next_load(&self, msg: &str) {
        self.lock().fail_next_load = Some(msg.to_string());
    }

    /// Fails the next create call with a transport error.
    pub fn fail_next_create(&self, msg: &str) {
        self.lock().fail_next_create = Some(msg.to_string());
    }

    /// Makes the next create call return a `status: false` ack.
    pub fn reject_next_create(&self, err: &str) {
        self.lock().reject_next_create = Some(err.to_string());
    }

    /// Fails the next delete call with a transport error.
    pub fn fail_next_delete(&self, msg: &str) {
        self.lock().fail_next_delete = Some(msg.to_string());
    }

    /// Holds create responses until the returned gate is notified.
    pub fn gate_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().create_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Holds delete responses until the returned gate is notified.
    pub fn gate_delete(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().delete_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Number of create calls issued so far.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    /// Number of delete calls issued so far.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.lock().delete_calls
    }

    /// The store's current points, across all worksites.
    #[must_use]
    pub fn points(&self) -> Vec<GeofencePoint> {
        self.lock().points.clone()
    }
}

impl WorksiteStore for MemoryStore {
    async fn worksite(&self, id: u64) -> Result<Worksite, StoreError> {
        self.lock()
            .worksites
            .get(&id)
            .copied()
            .ok_or_else(|| StoreError(format!("worksite {id} not found")))
    }

    async fn worksite_locations(&self, worksite_id: u64) -> Result<Vec<GeofencePoint>, StoreError> {
        let mut inner = self.lock();
        if let Some(msg) = inner.fail_next_load.take() {
            return Err(StoreError(msg));
        }
        Ok(inner
            .points
            .iter()
            .filter(|p| p.worksite_id == worksite_id)
            .cloned()
            .collect())
    }

    async fn create_worksite_location(
        &self,
        worksite_id: u64,
        draft: &GeofenceDraft,
    ) -> Result<CreateAck, StoreError> {
        let gate = {
            let mut inner = self.lock();
            inner.create_calls += 1;
            inner.create_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut inner = self.lock();
        if let Some(msg) = inner.fail_next_create.take() {
            return Err(StoreError(msg));
        }
        if let Some(err) = inner.reject_next_create.take() {
            return Ok(CreateAck {
                status: false,
                err: Some(err),
                ..CreateAck::default()
            });
        }

        let id = inner.next_id;
        inner.next_id += 1;
        inner.points.push(GeofencePoint {
            id: Some(id),
            worksite_id,
            name: draft.name.clone(),
            latitude: draft.center.latitude,
            longitude: draft.center.longitude,
            radius_meters: draft.radius_meters,
        });
        Ok(CreateAck {
            status: true,
            id: Some(id),
            msg: Some("Worksite clock-in point created.".to_string()),
            err: None,
        })
    }

    async fn delete_worksite_location(&self, id: u64) -> Result<(), StoreError> {
        let gate = {
            let mut inner = self.lock();
            inner.delete_calls += 1;
            inner.delete_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut inner = self.lock();
        if let Some(msg) = inner.fail_next_delete.take() {
            return Err(StoreError(msg));
        }
        inner.points.retain(|p| p.id != Some(id));
        Ok(())
    }
}

// ==================== Location doubles ====================

/// A [`LocationProvider`] resolving immediately with a fixed reading.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationProvider(pub GeolocationReading);

impl LocationProvider for StaticLocationProvider {
    async fn current_position(
        &self,
        _options: &AcquireOptions,
    ) -> Result<GeolocationReading, LocationError> {
        Ok(self.0)
    }
}

/// A [`LocationProvider`] failing immediately with a fixed error.
#[derive(Debug, Clone)]
pub struct FailingLocationProvider(pub LocationError);

impl LocationProvider for FailingLocationProvider {
    async fn current_position(
        &self,
        _options: &AcquireOptions,
    ) -> Result<GeolocationReading, LocationError> {
        Err(self.0.clone())
    }
}

/// A [`LocationProvider`] that never resolves; pair with a paused clock to
/// exercise the acquisition timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnresponsiveLocationProvider;

impl LocationProvider for UnresponsiveLocationProvider {
    async fn current_position(
        &self,
        _options: &AcquireOptions,
    ) -> Result<GeolocationReading, LocationError> {
        std::future::pending().await
    }
}

/// A [`ProgressIndicator`] counting present/dismiss calls.
#[derive(Debug, Clone, Default)]
pub struct CountingIndicator {
    presented: Arc<AtomicUsize>,
    dismissed: Arc<AtomicUsize>,
}

impl CountingIndicator {
    /// Creates a zeroed indicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Times the indicator was presented.
    #[must_use]
    pub fn presented(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }

    /// Times the indicator was dismissed.
    #[must_use]
    pub fn dismissed(&self) -> usize {
        self.dismissed.load(Ordering::SeqCst)
    }
}

impl ProgressIndicator for CountingIndicator {
    fn present(&self) {
        self.presented.fetch_add(1, Ordering::SeqCst);
    }

    fn dismiss(&self) {
        self.dismissed.fetch_add(1, Ordering::SeqCst);
    }
}

// ==================== Render double ====================

#[derive(Debug, Default)]
struct RenderLog {
    next_handle: u64,
    marker_adds: usize,
    circle_adds: usize,
    marker_removes: usize,
    circle_removes: usize,
    bindings: Vec<(u64, String)>,
    live_markers: Vec<u64>,
    live_circles: Vec<u64>,
}

/// A [`RenderProvider`] recording every primitive operation.
///
/// Handles are plain integers; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderProvider {
    log: Arc<Mutex<RenderLog>>,
}

impl RecordingRenderProvider {
    /// Creates an empty recording provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RenderLog> {
        self.log.lock().unwrap()
    }

    /// Total markers added.
    #[must_use]
    pub fn marker_adds(&self) -> usize {
        self.lock().marker_adds
    }

    /// Total circles added.
    #[must_use]
    pub fn circle_adds(&self) -> usize {
        self.lock().circle_adds
    }

    /// Total markers removed.
    #[must_use]
    pub fn marker_removes(&self) -> usize {
        self.lock().marker_removes
    }

    /// Total circles removed.
    #[must_use]
    pub fn circle_removes(&self) -> usize {
        self.lock().circle_removes
    }

    /// Total click bindings attached.
    #[must_use]
    pub fn bind_calls(&self) -> usize {
        self.lock().bindings.len()
    }

    /// Messages bound to marker clicks, in binding order.
    #[must_use]
    pub fn bound_messages(&self) -> Vec<String> {
        self.lock().bindings.iter().map(|(_, m)| m.clone()).collect()
    }

    /// Handles of markers currently on the map.
    #[must_use]
    pub fn live_markers(&self) -> Vec<u64> {
        self.lock().live_markers.clone()
    }

    /// Handles of circles currently on the map.
    #[must_use]
    pub fn live_circles(&self) -> Vec<u64> {
        self.lock().live_circles.clone()
    }
}

impl RenderProvider for RecordingRenderProvider {
    type MarkerHandle = u64;
    type CircleHandle = u64;

    async fn add_marker(&self, _spec: &MarkerSpec) -> u64 {
        let mut log = self.lock();
        log.next_handle += 1;
        let handle = log.next_handle;
        log.marker_adds += 1;
        log.live_markers.push(handle);
        handle
    }

    fn add_circle(&self, _spec: &CircleSpec) -> u64 {
        let mut log = self.lock();
        log.next_handle += 1;
        let handle = log.next_handle;
        log.circle_adds += 1;
        log.live_circles.push(handle);
        handle
    }

    fn remove_marker(&self, handle: u64) {
        let mut log = self.lock();
        log.marker_removes += 1;
        log.live_markers.retain(|h| *h != handle);
    }

    fn remove_circle(&self, handle: u64) {
        let mut log = self.lock();
        log.circle_removes += 1;
        log.live_circles.retain(|h| *h != handle);
    }

    fn bind_marker_click(&self, handle: &u64, message: &str) {
        self.lock().bindings.push((*handle, message.to_string()));
    }
}
