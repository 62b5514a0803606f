//! WASM bridge for the moodboard: exposes the Rust canvas engine to JS.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM; this
//! side owns the scene. Every call either mutates through the controller
//! or returns JSON the page applies to its elements. Errors cross the
//! boundary as strings; nothing here panics on bad input.

mod pixels;

use mb_core::candidate::{AssetFormat, ImageCandidate, SearchQuery, SearchResponse, group_by_category};
use mb_core::config::BoardConfig;
use mb_core::error::SceneError;
use mb_core::id::ItemId;
use mb_core::model::{NewItem, Point};
use mb_core::palette::{PALETTE_FILE_NAME, Palette};
use mb_core::store::TextCommit;
use mb_editor::controller::Controller;
use mb_editor::export::{ExportGuard, RasterOptions, export_file_name, today};
use mb_editor::input::Modifiers;
use mb_editor::shortcuts::ShortcutAction;
use mb_render::background::{Background, BackgroundStyle};
use mb_render::hit::HitPart;
use mb_render::sample::sample_or_empty;
use mb_render::view::CanvasTheme;
use pixels::DomImage;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::HtmlImageElement;

fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("serialization failed: {e}");
        "null".to_string()
    })
}

/// The main WASM-facing canvas.
///
/// Holds the interaction controller, the working palette and the export
/// guard. All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct MoodboardCanvas {
    controller: Controller,
    palette: Palette,
    /// Shared with in-flight export futures.
    export_guard: Rc<RefCell<ExportGuard>>,
}

#[wasm_bindgen]
impl MoodboardCanvas {
    /// Create a board. `config_json` may override any `BoardConfig` field.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MoodboardCanvas, JsValue> {
        init_once();
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => BoardConfig::from_json(json).map_err(to_js)?,
            _ => BoardConfig::default(),
        };
        Ok(Self {
            controller: Controller::new(config),
            palette: Palette::new(),
            export_guard: Rc::new(RefCell::new(ExportGuard::new())),
        })
    }

    /// The visual tree as JSON.
    pub fn render_json(&self) -> String {
        to_json(&self.controller.render())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.controller.store().selected().map(|id| id.to_string())
    }

    pub fn editing_id(&self) -> Option<String> {
        self.controller.editing().map(|id| id.to_string())
    }

    pub fn item_count(&self) -> usize {
        self.controller.store().len()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Returns `{"id": "...", "part": "body" | "<handle>"}` or `null`.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> String {
        let hit = self.controller.pointer_down(Point::new(x, y));
        match hit {
            Some(hit) => hit_json(hit.id, hit.part),
            None => "null".into(),
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.controller.pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// Enter text edit mode. Returns the edited id, if a text item was hit.
    pub fn double_click(&mut self, x: f32, y: f32) -> Option<String> {
        self.controller.double_click(Point::new(x, y)).map(|id| id.to_string())
    }

    // ─── Keyboard / text ─────────────────────────────────────────────────

    /// Returns `{"handled":bool,"action":"<name>"}`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers { ctrl, shift, alt, meta };
        match self.controller.key_down(key, modifiers) {
            Some(action) => format!(r#"{{"handled":true,"action":"{}"}}"#, action_to_name(action)),
            None => r#"{"handled":false,"action":"none"}"#.to_string(),
        }
    }

    pub fn text_input(&mut self, text: &str) {
        self.controller.text_input(text);
    }

    /// Blur of the text editor. Returns `false` when the item was discarded.
    pub fn text_blur(&mut self) -> bool {
        !matches!(self.controller.end_text_edit(), Some(TextCommit::Discarded))
    }

    pub fn begin_text_edit(&mut self, id: &str) -> Result<(), JsValue> {
        let id = lookup(id)?;
        self.controller.begin_text_edit(id).map_err(to_js)
    }

    // ─── Item actions ────────────────────────────────────────────────────

    pub fn add_image(&mut self, url: &str, title: Option<String>) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            log::warn!("ignoring image without a source");
            return None;
        }
        let mut item = NewItem::image(url);
        if let Some(title) = title {
            item = item.with_title(title);
        }
        self.controller.add_item(item).map(|id| id.to_string())
    }

    /// Add one search result in any of its JSON shapes.
    pub fn add_candidate(&mut self, json: &str) -> Result<Option<String>, JsValue> {
        let candidate: ImageCandidate =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(match candidate.normalize() {
            Some(item) => self.controller.add_item(item).map(|id| id.to_string()),
            None => {
                log::warn!("candidate has no image source");
                None
            }
        })
    }

    pub fn add_text(&mut self) -> Option<String> {
        self.controller.add_text().map(|id| id.to_string())
    }

    pub fn delete_selected(&mut self) -> bool {
        self.controller.delete_selected().is_some()
    }

    pub fn duplicate_selected(&mut self) -> Option<String> {
        self.controller.duplicate_selected().map(|id| id.to_string())
    }

    pub fn rotate_selected(&mut self) -> Option<f32> {
        self.controller.rotate_selected()
    }

    pub fn arrange_grid(&mut self, container_width: f32) {
        self.controller.arrange_grid(container_width);
    }

    /// The page confirms with the user before calling this.
    pub fn clear_all(&mut self) {
        self.controller.clear_all();
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom(&self) -> f32 {
        self.controller.zoom()
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.controller.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.controller.zoom_out()
    }

    pub fn zoom_reset(&mut self) -> f32 {
        self.controller.zoom_reset()
    }

    /// `"dots" | "lines" | "cross" | "solid"`. Returns `false` for unknown names.
    pub fn set_background(&mut self, pattern: &str) -> bool {
        let Some(pattern) = Background::parse(pattern) else {
            return false;
        };
        self.controller.set_background(BackgroundStyle {
            pattern,
            ..BackgroundStyle::default()
        });
        true
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.controller
            .set_theme(if is_dark { CanvasTheme::dark() } else { CanvasTheme::light() });
    }

    /// Font family used for new text blocks.
    pub fn set_font_family(&mut self, family: &str) {
        self.controller.set_font_family(family);
    }

    // ─── Search ──────────────────────────────────────────────────────────

    /// Query pairs for `/search` as a JSON array of `[key, value]`.
    pub fn search_params(&self, query_json: &str) -> Result<String, JsValue> {
        let query: SearchQuery =
            serde_json::from_str(query_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if !query.is_sendable() {
            return Err(JsValue::from_str("empty query"));
        }
        Ok(to_json(&query.to_query_pairs()))
    }

    /// Digest a `/search` response: updates the palette and returns the
    /// grouped results for display.
    pub fn ingest_search_response(&mut self, json: &str) -> Result<String, JsValue> {
        let response = SearchResponse::from_json(json).map_err(to_js)?;
        let suggested = Palette::from_suggestions(&response.ai_suggestions, &response.color_palette);
        if !suggested.is_empty() {
            self.palette = suggested;
        }
        Ok(to_json(&search_digest(&response, &self.palette)))
    }

    // ─── Typography ──────────────────────────────────────────────────────

    /// Typography pick on the image under the pointer. Returns how many
    /// presets were new, or `undefined` when no image was hit.
    pub fn extract_typography(&mut self, x: f32, y: f32) -> Option<usize> {
        self.controller.extract_typography(Point::new(x, y))
    }

    /// Collected presets: `[{"name","family","weight","size"}]`.
    pub fn typography_json(&self) -> String {
        to_json(self.controller.typography())
    }

    /// Use the preset at `index` for new text blocks.
    pub fn apply_typography(&mut self, index: usize) -> bool {
        self.controller.apply_typography(index)
    }

    // ─── Palette ─────────────────────────────────────────────────────────

    /// Sample an `<img>` and merge its colors into the palette.
    /// Returns the sampled colors as JSON (empty when pixels are blocked).
    pub fn extract_colors(&mut self, img: &HtmlImageElement) -> String {
        let colors = match DomImage::capture(img) {
            Ok(source) => sample_or_empty(&source),
            Err(e) => {
                log::warn!("color sampling unavailable: {e}");
                Vec::new()
            }
        };
        self.palette.merge(&colors);
        to_json(&colors)
    }

    pub fn palette_json(&self) -> String {
        to_json(&self.palette)
    }

    pub fn palette_css(&self) -> String {
        self.palette.to_css_variables()
    }

    pub fn palette_file_name(&self) -> String {
        PALETTE_FILE_NAME.to_string()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    pub fn export_in_progress(&self) -> bool {
        self.export_guard.borrow().is_pending()
    }

    /// Snapshot the board.
    ///
    /// `rasterize(options)` must return a Promise of a PNG data URL
    /// (e.g. html2canvas over the board element). Resolves to
    /// `{"fileName": "...", "href": "data:..."}`; rejects with the error
    /// message when busy or when rasterization fails.
    pub fn export_png(&self, rasterize: js_sys::Function) -> js_sys::Promise {
        let guard = Rc::clone(&self.export_guard);
        let file_name = export_file_name(today(), "png");
        let options = to_json(&RasterOptions::default());

        future_to_promise(async move {
            guard.borrow_mut().begin().map_err(to_js)?;
            let result = run_rasterizer(&rasterize, &options).await;
            guard.borrow_mut().finish();

            let href = result.map_err(|e| {
                log::error!("export failed: {e}");
                to_js(SceneError::ExportFailed(e))
            })?;
            log::debug!("exported {file_name}");
            Ok(JsValue::from_str(&to_json(&ExportLink { file_name, href })))
        })
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Resolve an id echoed back by the page. Unknown strings are reported
/// as-is and never interned.
fn resolve_id(id: &str) -> Result<ItemId, String> {
    ItemId::lookup(id).ok_or_else(|| format!("item {id} not found"))
}

fn lookup(id: &str) -> Result<ItemId, JsValue> {
    resolve_id(id).map_err(|e| JsValue::from_str(&e))
}

fn hit_json(id: ItemId, part: HitPart) -> String {
    let part = match part {
        HitPart::Body => "body",
        HitPart::Handle(handle) => handle.as_str(),
    };
    format!(r#"{{"id":{},"part":"{part}"}}"#, to_json(&id))
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Delete => "delete",
        ShortcutAction::Duplicate => "duplicate",
        ShortcutAction::Rotate => "rotate",
        ShortcutAction::AddText => "addText",
        ShortcutAction::ArrangeGrid => "arrangeGrid",
        ShortcutAction::ZoomIn => "zoomIn",
        ShortcutAction::ZoomOut => "zoomOut",
        ShortcutAction::ZoomReset => "zoomReset",
        ShortcutAction::Deselect => "deselect",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportLink {
    file_name: String,
    href: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidateView<'a> {
    source: &'a str,
    title: Option<&'a str>,
    format: AssetFormat,
    /// Original JSON of the candidate, handed back to `add_candidate`.
    raw: &'a ImageCandidate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryView<'a> {
    category: String,
    images: Vec<CandidateView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchDigest<'a> {
    groups: Vec<CategoryView<'a>>,
    suggestions: &'a str,
    related_terms: &'a [String],
    palette: &'a Palette,
}

fn search_digest<'a>(response: &'a SearchResponse, palette: &'a Palette) -> SearchDigest<'a> {
    let groups = group_by_category(&response.images)
        .into_iter()
        .map(|(category, members)| CategoryView {
            category,
            images: members
                .into_iter()
                .filter_map(|c| {
                    Some(CandidateView {
                        source: c.source()?,
                        title: c.title(),
                        format: c.format(),
                        raw: c,
                    })
                })
                .collect(),
        })
        .filter(|group| !group.images.is_empty())
        .collect();
    SearchDigest {
        groups,
        suggestions: &response.ai_suggestions,
        related_terms: &response.related_terms,
        palette,
    }
}

async fn run_rasterizer(rasterize: &js_sys::Function, options: &str) -> Result<String, String> {
    let describe = |e: JsValue| e.as_string().unwrap_or_else(|| format!("{e:?}"));
    let options = js_sys::JSON::parse(options).map_err(describe)?;
    let value = rasterize.call1(&JsValue::NULL, &options).map_err(describe)?;
    let promise: js_sys::Promise = value
        .dyn_into()
        .map_err(|_| "rasterizer did not return a Promise".to_string())?;
    let url = JsFuture::from(promise).await.map_err(describe)?;
    url.as_string()
        .filter(|s| s.starts_with("data:"))
        .ok_or_else(|| "rasterizer produced no data URL".to_string())
}

// ─── Panic hook / logging for WASM debugging ─────────────────────────────

fn init_once() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Moodboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            let _ = console_log::init_with_level(log::Level::Debug);
        });
    }
}
