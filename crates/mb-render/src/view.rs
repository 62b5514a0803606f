//! Scene store → visual tree.
//!
//! The renderer is a pure function of the store and a `ViewState`: it
//! holds no state of its own and never mutates the scene. The browser
//! layer applies the resulting tree to absolutely-positioned elements;
//! native callers can flatten it with [`crate::svg::render_svg`].

use crate::background::{BackgroundCss, BackgroundStyle};
use mb_core::id::ItemId;
use mb_core::model::*;
use mb_core::store::SceneStore;
use serde::Serialize;
use smallvec::{SmallVec, smallvec};

/// Shown in place of an empty text block.
pub const TEXT_PLACEHOLDER: &str = "Double-click to edit text";

/// Theme-dependent colors for selection chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasTheme {
    pub selection: &'static str,
    pub handle_fill: &'static str,
    pub handle_border: &'static str,
    pub placeholder_text: &'static str,
}

impl CanvasTheme {
    pub fn dark() -> Self {
        Self {
            selection: "#3b82f6",
            handle_fill: "#ffffff",
            handle_border: "#3b82f6",
            placeholder_text: "rgba(255, 255, 255, 0.4)",
        }
    }

    pub fn light() -> Self {
        Self {
            selection: "#2563eb",
            handle_fill: "#ffffff",
            handle_border: "#2563eb",
            placeholder_text: "rgba(0, 0, 0, 0.4)",
        }
    }
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Everything about presentation that isn't scene data.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    /// Text item currently in edit mode, if any.
    pub editing: Option<ItemId>,
    pub background: BackgroundStyle,
    pub theme: CanvasTheme,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            editing: None,
            background: BackgroundStyle::default(),
            theme: CanvasTheme::default(),
        }
    }
}

// ─── Visual tree ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualTree {
    /// Canvas extent in screen pixels.
    pub width: f32,
    pub height: f32,
    pub zoom: f32,
    pub background: BackgroundCss,
    pub theme: CanvasTheme,
    /// Paint order: first is bottom-most.
    pub nodes: Vec<VisualNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    pub id: ItemId,
    /// Screen-space center (`left`/`top` of the element before the
    /// centering translate).
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub z_index: i64,
    pub transform: String,
    pub selected: bool,
    pub handles: SmallVec<[ResizeHandle; 4]>,
    /// Show the "edit text" affordance.
    pub editable: bool,
    pub content: NodeContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeContent {
    #[serde(rename_all = "camelCase")]
    Image { src: String, alt: String },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        placeholder: bool,
        editing: bool,
        font_size: f32,
        font_color: String,
        font_family: String,
        font_weight: u16,
    },
}

/// Resize handles drawn for an item when it is selected.
pub fn handles_for(item: &SceneItem) -> SmallVec<[ResizeHandle; 4]> {
    match item.kind {
        ItemKind::Image { .. } => SmallVec::from_buf(ResizeHandle::CORNERS),
        ItemKind::Text(_) => smallvec![ResizeHandle::Se],
    }
}

/// CSS transform keeping `position` the visual center of the element.
pub fn center_transform(rotation: f32) -> String {
    format!("translate(-50%, -50%) rotate({rotation}deg)")
}

/// Build the visual tree for the current scene.
#[must_use]
pub fn render_scene(store: &SceneStore, view: &ViewState) -> VisualTree {
    let zoom = view.zoom;
    let selected = store.selected();
    let canvas = store.config().canvas_size;

    let nodes = store
        .iter_by_z()
        .into_iter()
        .map(|item| {
            let is_selected = selected == Some(item.id);
            let editing = view.editing == Some(item.id) && item.is_text();
            let handles = if is_selected && !editing {
                handles_for(item)
            } else {
                SmallVec::new()
            };
            VisualNode {
                id: item.id,
                left: item.position.x * zoom,
                top: item.position.y * zoom,
                width: item.size.width * zoom,
                height: item.size.height * zoom,
                rotation: item.rotation,
                z_index: item.z_index,
                transform: center_transform(item.rotation),
                selected: is_selected,
                editable: is_selected && item.is_text() && !editing,
                handles,
                content: node_content(item, zoom, editing),
            }
        })
        .collect::<Vec<_>>();

    log::trace!("render {} nodes at zoom {zoom}", nodes.len());

    VisualTree {
        width: canvas.width * zoom,
        height: canvas.height * zoom,
        zoom,
        background: view.background.to_css(zoom),
        theme: view.theme.clone(),
        nodes,
    }
}

fn node_content(item: &SceneItem, zoom: f32, editing: bool) -> NodeContent {
    match &item.kind {
        ItemKind::Image { source, title } => NodeContent::Image {
            src: source.clone(),
            alt: title.clone().unwrap_or_else(|| "Moodboard item".into()),
        },
        ItemKind::Text(content) => {
            // While editing, the raw draft is shown even if empty.
            let placeholder = !editing && content.text.is_empty();
            NodeContent::Text {
                text: if placeholder {
                    TEXT_PLACEHOLDER.into()
                } else {
                    content.text.clone()
                },
                placeholder,
                editing,
                font_size: content.style.font_size * zoom,
                font_color: content.style.font_color.to_hex(),
                font_family: content.style.font_family.clone(),
                font_weight: content.style.font_weight,
            }
        }
    }
}
