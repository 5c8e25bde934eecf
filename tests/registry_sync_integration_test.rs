//! Integration tests for the registry + projector pipeline.
//!
//! Exercises the optimistic create/delete discipline end to end against the
//! in-memory store double, and the invariant that confirmed registry
//! contents stay bijective with the rendered primitive set.

use siteclock_core::map::MapSyncProjector;
use siteclock_core::testing::{MemoryStore, RecordingRenderProvider};
use siteclock_core::worksite::{
    GeofenceDraft, GeofenceRegistry, PointKey, RegistryError, Worksite,
};
use siteclock_core::geo::Coordinate;

fn store_with_site() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_worksite(Worksite {
        id: 1,
        client_id: 10,
        latitude: 40.0,
        longitude: -74.0,
    });
    store
}

fn draft(name: &str) -> GeofenceDraft {
    GeofenceDraft::new(name, Coordinate::new(40.0, -74.0).unwrap())
}

#[tokio::test]
async fn confirmed_create_renders_one_marker_and_one_circle() {
    let store = store_with_site();
    store.set_next_id(42);
    let render = RecordingRenderProvider::new();

    let registry = GeofenceRegistry::new(store);
    let mut projector = MapSyncProjector::new(render.clone());

    registry.load(1).await.unwrap();
    projector.sync(&registry.entries().await).await;

    let point = registry.create(draft("Main gate")).await.unwrap();
    projector.sync(&registry.entries().await).await;

    assert_eq!(point.id, Some(42));
    let entries = registry.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, PointKey::Confirmed(42));

    assert_eq!(render.live_markers().len(), 1);
    assert_eq!(render.live_circles().len(), 1);
}

#[tokio::test]
async fn create_then_delete_returns_map_to_pre_create_state() {
    let store = store_with_site();
    store.seed_point(1, "North gate", 40.0, -74.0, 5.0);
    let render = RecordingRenderProvider::new();

    let registry = GeofenceRegistry::new(store);
    let mut projector = MapSyncProjector::new(render.clone());

    registry.load(1).await.unwrap();
    projector.sync(&registry.entries().await).await;
    let before_entries = registry.entries().await;
    let before_keys = projector.rendered_keys();

    let point = registry.create(draft("Main gate")).await.unwrap();
    projector.sync(&registry.entries().await).await;

    registry.delete(point.id.unwrap()).await.unwrap();
    projector.sync(&registry.entries().await).await;

    assert_eq!(registry.entries().await, before_entries);
    assert_eq!(projector.rendered_keys(), before_keys);
}

#[tokio::test]
async fn failed_create_leaves_no_phantom_primitive() {
    let store = store_with_site();
    store.reject_next_create("duplicate name");
    let render = RecordingRenderProvider::new();

    let registry = GeofenceRegistry::new(store);
    let mut projector = MapSyncProjector::new(render.clone());

    registry.load(1).await.unwrap();
    let err = registry.create(draft("Main gate")).await.unwrap_err();
    assert!(matches!(err, RegistryError::CreateFailed(_)));

    projector.sync(&registry.entries().await).await;
    assert!(render.live_markers().is_empty());
    assert!(render.live_circles().is_empty());
}

#[tokio::test]
async fn registry_and_rendered_set_stay_bijective_across_mutations() {
    let store = store_with_site();
    store.seed_point(1, "North gate", 40.0, -74.0, 5.0);
    store.seed_point(1, "South gate", 40.001, -74.0, 5.0);
    let render = RecordingRenderProvider::new();

    let registry = GeofenceRegistry::new(store);
    let mut projector = MapSyncProjector::new(render.clone());

    registry.load(1).await.unwrap();
    projector.sync(&registry.entries().await).await;

    let created = registry.create(draft("Extra gate")).await.unwrap();
    projector.sync(&registry.entries().await).await;
    assert_eq!(render.live_markers().len(), 3);

    registry.delete(created.id.unwrap()).await.unwrap();
    projector.sync(&registry.entries().await).await;

    let keys = projector.rendered_keys();
    let registry_keys: Vec<PointKey> = registry.entries().await.iter().map(|e| e.key).collect();
    assert_eq!(keys, registry_keys);
    assert_eq!(render.live_markers().len(), render.live_circles().len());
}

#[tokio::test]
async fn worksite_switch_clears_and_redraws() {
    let store = store_with_site();
    store.insert_worksite(Worksite {
        id: 2,
        client_id: 10,
        latitude: 41.0,
        longitude: -73.0,
    });
    store.seed_point(1, "North gate", 40.0, -74.0, 5.0);
    store.seed_point(1, "South gate", 40.001, -74.0, 5.0);
    let depot = store.seed_point(2, "Depot door", 41.0, -73.0, 8.0);
    let render = RecordingRenderProvider::new();

    let registry = GeofenceRegistry::new(store);
    let mut projector = MapSyncProjector::new(render.clone());

    registry.load(1).await.unwrap();
    projector.sync(&registry.entries().await).await;
    assert_eq!(render.live_markers().len(), 2);

    projector.clear();
    registry.load(2).await.unwrap();
    projector.sync(&registry.entries().await).await;

    assert_eq!(projector.rendered_keys(), vec![PointKey::Confirmed(depot)]);
    assert_eq!(render.live_markers().len(), 1);
}
