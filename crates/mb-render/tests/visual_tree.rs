//! Integration tests: scene store → visual tree (mb-core ↔ mb-render).

use mb_core::ItemId;
use mb_core::model::*;
use mb_core::store::SceneStore;
use mb_render::view::{NodeContent, ViewState, render_scene};
use mb_render::{Background, BackgroundStyle};
use pretty_assertions::assert_eq;

fn board() -> (SceneStore, ItemId, ItemId) {
    let mut store = SceneStore::default();
    let img = store.add(
        NewItem::image("https://cdn.test/a.jpg")
            .with_title("Sunset")
            .at(Point::new(300.0, 250.0)),
    );
    let txt = store.add(NewItem::Text {
        text: "Warm tones".into(),
        style: TextStyle::default(),
        position: Some(Point::new(500.0, 100.0)),
        size: None,
    });
    (store, img, txt)
}

// ─── Ordering ───────────────────────────────────────────────────────────

#[test]
fn nodes_are_in_ascending_z() {
    let (mut store, img, txt) = board();
    let tree = render_scene(&store, &ViewState::default());
    let ids: Vec<ItemId> = tree.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![img, txt]);

    store.select(Some(img));
    let tree = render_scene(&store, &ViewState::default());
    let ids: Vec<ItemId> = tree.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![txt, img]);
    assert!(tree.nodes.windows(2).all(|w| w[0].z_index < w[1].z_index));
}

// ─── Geometry ───────────────────────────────────────────────────────────

#[test]
fn zoom_scales_positions_and_sizes() {
    let (store, _, _) = board();
    let view = ViewState {
        zoom: 1.5,
        ..ViewState::default()
    };
    let tree = render_scene(&store, &view);
    let node = &tree.nodes[0];
    assert_eq!((node.left, node.top), (450.0, 375.0));
    assert_eq!((node.width, node.height), (300.0, 300.0));
    assert_eq!((tree.width, tree.height), (1800.0, 1200.0));
    match &tree.nodes[1].content {
        NodeContent::Text { font_size, .. } => assert_eq!(*font_size, 27.0),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn rotation_is_in_the_transform() {
    let (mut store, img, _) = board();
    store.rotate(img, 270.0).unwrap();
    let tree = render_scene(&store, &ViewState::default());
    let node = tree.nodes.iter().find(|n| n.id == img).unwrap();
    assert_eq!(node.transform, "translate(-50%, -50%) rotate(270deg)");
}

// ─── Selection chrome ───────────────────────────────────────────────────

#[test]
fn selected_image_gets_four_corners() {
    let (mut store, img, _) = board();
    store.select(Some(img));
    let tree = render_scene(&store, &ViewState::default());
    let node = tree.nodes.iter().find(|n| n.id == img).unwrap();
    assert!(node.selected);
    assert_eq!(node.handles.as_slice(), &ResizeHandle::CORNERS);
    assert!(!node.editable);
    assert!(tree.nodes.iter().filter(|n| n.id != img).all(|n| n.handles.is_empty()));
}

#[test]
fn selected_text_gets_one_handle_and_edit_affordance() {
    let (mut store, _, txt) = board();
    store.select(Some(txt));
    let tree = render_scene(&store, &ViewState::default());
    let node = tree.nodes.iter().find(|n| n.id == txt).unwrap();
    assert_eq!(node.handles.as_slice(), &[ResizeHandle::Se]);
    assert!(node.editable);

    let editing = ViewState {
        editing: Some(txt),
        ..ViewState::default()
    };
    let tree = render_scene(&store, &editing);
    let node = tree.nodes.iter().find(|n| n.id == txt).unwrap();
    assert!(node.handles.is_empty());
    assert!(!node.editable);
}

// ─── Serialization ──────────────────────────────────────────────────────

#[test]
fn serializes_for_the_browser() {
    let (store, img, _) = board();
    let view = ViewState {
        background: BackgroundStyle {
            pattern: Background::Solid,
            ..BackgroundStyle::default()
        },
        ..ViewState::default()
    };
    let json = serde_json::to_value(render_scene(&store, &view)).unwrap();
    assert_eq!(json["background"], serde_json::json!({ "backgroundColor": "#121212" }));
    let first = &json["nodes"][0];
    assert_eq!(first["id"], img.as_str());
    assert_eq!(first["zIndex"], 0);
    assert_eq!(first["content"]["type"], "image");
    assert_eq!(first["content"]["alt"], "Sunset");
    assert_eq!(json["nodes"][1]["content"]["fontColor"], "#ffffff");
    assert_eq!(json["nodes"][1]["content"]["fontWeight"], 400);
}
