//! Map render synchronization.
//!
//! [`MapSyncProjector`] keeps the map widget's markers and circles in
//! one-to-one correspondence with the registry's entries, applying minimal
//! deltas keyed by [`PointKey`](crate::worksite::PointKey). The widget is
//! abstracted behind [`RenderProvider`], which only exposes primitive
//! add/remove operations and a per-marker click binding.

pub mod projector;
pub mod types;

pub use projector::{MapSyncProjector, RenderProvider};
pub use types::{
    CircleSpec, MarkerSpec, POINT_MARKER_SNIPPET, PREVIEW_MARKER_SNIPPET, PREVIEW_MARKER_TITLE,
    ZONE_FILL_COLOR, ZONE_STROKE_COLOR, ZONE_STROKE_WIDTH,
};
