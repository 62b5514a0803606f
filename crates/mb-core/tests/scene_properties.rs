//! Integration tests: scene store invariants and end-to-end board scenarios.
//!
//! Exercises the store through its public API only, the way the editor
//! and the browser bridge drive it.

use mb_core::candidate::{ImageCandidate, ingest_images};
use mb_core::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn image(store: &mut SceneStore, x: f32, y: f32) -> ItemId {
    store.add(NewItem::image("https://cdn.test/photo.jpg").at(Point::new(x, y)))
}

// ─── Identity ───────────────────────────────────────────────────────────

#[test]
fn ids_stay_unique_across_add_duplicate_remove() {
    let mut store = SceneStore::default();
    let mut seen = HashSet::new();
    for i in 0..20 {
        let id = image(&mut store, i as f32, 0.0);
        assert!(seen.insert(id));
        let dup = store.duplicate(id).unwrap();
        assert!(seen.insert(dup));
        if i % 3 == 0 {
            store.remove(id);
        }
    }
    let text = store.add_text(&TextStyle::default());
    assert!(seen.insert(text));
    let live: HashSet<ItemId> = store.ids().into_iter().collect();
    assert_eq!(live.len(), store.len());
}

// ─── Z-order ────────────────────────────────────────────────────────────

#[test]
fn selected_item_is_strictly_on_top() {
    let mut store = SceneStore::default();
    let ids: Vec<ItemId> = (0..5).map(|i| image(&mut store, i as f32, 0.0)).collect();
    for &id in ids.iter().rev() {
        store.select(Some(id));
        let z = store.get(id).unwrap().z_index;
        assert!(
            store.iter().filter(|item| item.id != id).all(|item| item.z_index < z),
            "{id:?} not strictly above the rest"
        );
    }
}

#[test]
fn duplicate_lands_on_top() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 0.0, 0.0);
    let _b = image(&mut store, 0.0, 0.0);
    let dup = store.duplicate(a).unwrap();
    assert_eq!(store.max_z(), Some(store.get(dup).unwrap().z_index));
}

// ─── Geometry ───────────────────────────────────────────────────────────

#[test]
fn resize_never_goes_below_floor() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 0.0, 0.0);
    for handle in [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::Ne,
        ResizeHandle::Nw,
        ResizeHandle::Se,
        ResizeHandle::Sw,
    ] {
        for delta in [-10_000.0, -151.0, 0.0, 37.5, 10_000.0] {
            let size = store.resize(a, handle, Vector::new(delta, -delta)).unwrap();
            assert!(size.width >= 50.0 && size.height >= 50.0, "{handle:?} {delta}");
        }
    }
}

#[test]
fn resize_keeps_center() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 400.0, 300.0);
    store.resize(a, ResizeHandle::Se, Vector::new(50.0, 50.0)).unwrap();
    assert_eq!(store.get(a).unwrap().position, Point::new(400.0, 300.0));
}

#[test]
fn rotation_stays_in_range() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 0.0, 0.0);
    for delta in [90.0, 90.0, 90.0, 90.0, -45.0, 720.0, -1e-6, f32::INFINITY] {
        let r = store.rotate(a, delta).unwrap();
        assert!((0.0..360.0).contains(&r), "{r} after {delta}");
    }
    assert_eq!(store.get(a).unwrap().rotation, 0.0);
}

#[test]
fn four_quarter_turns_return_to_zero() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 0.0, 0.0);
    for _ in 0..4 {
        store.rotate(a, 90.0).unwrap();
    }
    assert_eq!(store.get(a).unwrap().rotation, 0.0);
}

// ─── Failure semantics ──────────────────────────────────────────────────

#[test]
fn removing_missing_id_changes_nothing() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 0.0, 0.0);
    let before: Vec<SceneItem> = store.iter().cloned().collect();
    let ghost = ItemId::intern("image_ghost");
    assert!(store.remove(ghost).is_none());
    let after: Vec<SceneItem> = store.iter().cloned().collect();
    assert_eq!(before, after);
    assert!(store.contains(a));
}

#[test]
fn stale_ids_report_not_found() {
    let mut store = SceneStore::default();
    let ghost = ItemId::intern("text_ghost");
    assert_eq!(store.duplicate(ghost), Err(SceneError::NotFound(ghost)));
    assert_eq!(store.move_to(ghost, Point::default()), Err(SceneError::NotFound(ghost)));
    assert_eq!(store.rotate(ghost, 90.0), Err(SceneError::NotFound(ghost)));
    assert_eq!(store.set_text(ghost, "x"), Err(SceneError::NotFound(ghost)));
    assert_eq!(store.commit_text(ghost), Err(SceneError::NotFound(ghost)));
    assert_eq!(
        store.resize(ghost, ResizeHandle::Se, Vector::default()),
        Err(SceneError::NotFound(ghost))
    );
    assert_eq!(store.select(Some(ghost)), None);
}

// ─── Text lifecycle ─────────────────────────────────────────────────────

#[test]
fn abandoned_add_text_is_removed() {
    let mut store = SceneStore::default();
    let keep = image(&mut store, 0.0, 0.0);
    let t = store.add_text(&TextStyle::default());
    store.select(Some(t));
    assert_eq!(store.commit_text(t), Ok(TextCommit::Discarded));
    assert_eq!(store.ids(), vec![keep]);
    assert_eq!(store.selected(), None);
}

#[test]
fn typed_text_is_kept_and_committed() {
    let mut store = SceneStore::default();
    let t = store.add_text(&TextStyle::default());
    store.set_text(t, "Moodboard").unwrap();
    assert_eq!(store.commit_text(t), Ok(TextCommit::Kept));
    assert!(store.get(t).unwrap().text().unwrap().committed);
}

// ─── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn drag_then_resize_scenario() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 100.0, 100.0);
    store.select(Some(a));
    store.move_to(a, Point::new(260.0, 180.0)).unwrap();
    let size = store.resize(a, ResizeHandle::Se, Vector::new(40.0, -20.0)).unwrap();
    let item = store.get(a).unwrap();
    assert_eq!(item.position, Point::new(260.0, 180.0));
    assert_eq!(size, Size::new(240.0, 180.0));
}

#[test]
fn grid_arrange_scenario() {
    let mut store = SceneStore::default();
    let ids: Vec<ItemId> = (0..5).map(|i| image(&mut store, 999.0, i as f32)).collect();
    store.resize(ids[1], ResizeHandle::Se, Vector::new(300.0, 0.0)).unwrap();
    store.arrange_grid(660.0);

    let positions: Vec<Point> = ids.iter().map(|id| store.get(*id).unwrap().position).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(120.0, 300.0),
            Point::new(340.0, 300.0),
            Point::new(560.0, 300.0),
            Point::new(120.0, 480.0),
            Point::new(340.0, 480.0),
        ]
    );
    // Only positions move.
    assert_eq!(store.get(ids[1]).unwrap().size, Size::new(500.0, 200.0));
}

#[test]
fn duplicate_offset_scenario() {
    let mut store = SceneStore::default();
    let a = image(&mut store, 300.0, 250.0);
    store.rotate(a, 90.0).unwrap();
    let dup = store.duplicate(a).unwrap();
    let original = store.get(a).unwrap().clone();
    let copy = store.get(dup).unwrap();
    assert_eq!(copy.position, Point::new(320.0, 270.0));
    assert_eq!(copy.size, original.size);
    assert_eq!(copy.rotation, 90.0);
    assert_eq!(copy.kind, original.kind);
    assert_ne!(copy.id, original.id);
}

#[test]
fn search_results_land_on_the_board() {
    let batch: Vec<ImageCandidate> = serde_json::from_str(
        r#"["https://cdn.test/a.jpg",
            {"image": "https://cdn.test/b.jpg", "title": "B"},
            {"title": "no source"},
            {"url": "https://cdn.test/c.svg"}]"#,
    )
    .unwrap();
    let mut store = SceneStore::default();
    let added = ingest_images(&mut store, &batch);
    assert_eq!(added.len(), 3);
    let titles: Vec<Option<String>> = added
        .iter()
        .map(|id| match &store.get(*id).unwrap().kind {
            ItemKind::Image { title, .. } => title.clone(),
            ItemKind::Text(_) => None,
        })
        .collect();
    assert_eq!(titles, vec![None, Some("B".to_string()), None]);
    assert!(added.iter().all(|id| store.get(*id).unwrap().size == Size::new(200.0, 200.0)));
}

#[test]
fn custom_config_drives_defaults() {
    let config = BoardConfig::from_json(r#"{"minItemSize": 80, "duplicateOffset": {"dx": 5, "dy": 5}}"#)
        .unwrap();
    let mut store = SceneStore::new(config);
    let a = image(&mut store, 0.0, 0.0);
    let size = store.resize(a, ResizeHandle::Nw, Vector::new(500.0, 500.0)).unwrap();
    assert_eq!(size, Size::new(80.0, 80.0));
    let dup = store.duplicate(a).unwrap();
    assert_eq!(store.get(dup).unwrap().position, Point::new(5.0, 5.0));
}
