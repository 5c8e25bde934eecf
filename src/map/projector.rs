//! Minimal-delta synchronization of registry contents onto a map surface.
//!
//! The projector owns every render primitive handle it creates; handles are
//! indexed by [`PointKey`] and never exposed to the registry. `sync` computes
//! a set difference by key against the currently rendered set and applies
//! only the delta, so re-syncing an unchanged snapshot issues zero provider
//! calls.

use std::future::Future;

use tracing::debug;

use super::types::{CircleSpec, MarkerSpec};
use crate::location::GeolocationReading;
use crate::worksite::{PointKey, RegistryEntry};

/// Map widget abstraction exposing primitive add/remove operations.
///
/// Marker creation is asynchronous on the underlying widget; circle and
/// removal operations are synchronous. Handles are opaque to callers and
/// owned exclusively by the [`MapSyncProjector`].
pub trait RenderProvider: Send + Sync {
    /// Opaque marker reference.
    type MarkerHandle: Send;
    /// Opaque circle reference.
    type CircleHandle: Send;

    /// Adds a marker; resolves to its handle.
    fn add_marker(&self, spec: &MarkerSpec) -> impl Future<Output = Self::MarkerHandle> + Send;

    /// Adds a circle.
    fn add_circle(&self, spec: &CircleSpec) -> Self::CircleHandle;

    /// Removes a marker.
    fn remove_marker(&self, handle: Self::MarkerHandle);

    /// Removes a circle.
    fn remove_circle(&self, handle: Self::CircleHandle);

    /// Binds a click handler that surfaces `message` for the marker.
    fn bind_marker_click(&self, handle: &Self::MarkerHandle, message: &str);
}

struct RenderedPoint<P: RenderProvider> {
    key: PointKey,
    marker: P::MarkerHandle,
    circle: P::CircleHandle,
}

/// Keeps markers and circles in one-to-one correspondence with the
/// registry's entries for the active worksite.
///
/// `&mut self` receivers serialize `sync` per projector; callers pass the
/// registry's current snapshot, so consecutive calls coalesce naturally to
/// the most recent state.
pub struct MapSyncProjector<P: RenderProvider> {
    provider: P,
    rendered: Vec<RenderedPoint<P>>,
    preview: Option<P::MarkerHandle>,
}

impl<P: RenderProvider> MapSyncProjector<P> {
    /// Creates a projector with nothing rendered.
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            rendered: Vec::new(),
            preview: None,
        }
    }

    /// Applies the minimal delta between the rendered set and `entries`.
    ///
    /// Primitives whose key left the snapshot are removed, new keys get a
    /// circle and a marker (click binding attached exactly once, at add
    /// time), unchanged keys are untouched. Idempotent: syncing the same
    /// snapshot twice issues zero provider calls the second time.
    pub async fn sync(&mut self, entries: &[RegistryEntry]) {
        let mut kept: Vec<Option<RenderedPoint<P>>> = Vec::with_capacity(self.rendered.len());
        let mut removed = 0_usize;

        for rendered in self.rendered.drain(..) {
            if entries.iter().any(|e| e.key == rendered.key) {
                kept.push(Some(rendered));
            } else {
                self.provider.remove_marker(rendered.marker);
                self.provider.remove_circle(rendered.circle);
                removed += 1;
            }
        }

        let mut added = 0_usize;
        let mut next: Vec<RenderedPoint<P>> = Vec::with_capacity(entries.len());
        for entry in entries {
            let existing = kept
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|r| r.key == entry.key))
                .and_then(Option::take);

            if let Some(rendered) = existing {
                next.push(rendered);
                continue;
            }

            let circle = self.provider.add_circle(&CircleSpec::zone(&entry.point));
            let spec = MarkerSpec::for_point(&entry.point);
            let marker = self.provider.add_marker(&spec).await;
            let message = format!("{}: {}", spec.title, spec.snippet);
            self.provider.bind_marker_click(&marker, &message);
            next.push(RenderedPoint {
                key: entry.key,
                marker,
                circle,
            });
            added += 1;
        }

        self.rendered = next;
        if added > 0 || removed > 0 {
            debug!(added, removed, total = self.rendered.len(), "map sync applied");
        }
    }

    /// Removes all tracked primitives, including any preview marker.
    ///
    /// Used when switching worksite context.
    pub fn clear(&mut self) {
        for rendered in self.rendered.drain(..) {
            self.provider.remove_marker(rendered.marker);
            self.provider.remove_circle(rendered.circle);
        }
        self.clear_preview();
    }

    /// Draws the transient preview marker at a freshly acquired position.
    ///
    /// At most one preview exists; a prior preview is removed first.
    pub async fn set_preview(&mut self, reading: &GeolocationReading) {
        self.clear_preview();
        let marker = self.provider.add_marker(&MarkerSpec::preview(reading)).await;
        self.preview = Some(marker);
    }

    /// Discards the preview marker, if present.
    ///
    /// Called on capture cancellation and after a confirmed create.
    pub fn clear_preview(&mut self) {
        if let Some(marker) = self.preview.take() {
            self.provider.remove_marker(marker);
        }
    }

    /// Keys currently rendered, in render order.
    #[must_use]
    pub fn rendered_keys(&self) -> Vec<PointKey> {
        self.rendered.iter().map(|r| r.key).collect()
    }

    /// Whether a preview marker is currently drawn.
    #[must_use]
    pub const fn has_preview(&self) -> bool {
        self.preview.is_some()
    }
}
