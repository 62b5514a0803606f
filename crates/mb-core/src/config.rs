//! Board configuration.
//!
//! Every geometric constant the store and controller rely on lives here so
//! the browser layer can override them with a single JSON blob. Missing
//! fields fall back to `Default`.

use crate::error::{SceneError, SceneResult};
use crate::model::{Point, Size, TextStyle, Vector};
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Logical canvas extent in canvas-space units.
    pub canvas_size: Size,

    /// Floor applied to both axes on every resize. Default: **50**.
    pub min_item_size: f32,

    /// Placeholder size for new images, regardless of natural dimensions.
    pub image_size: Size,

    /// Initial box for new text blocks.
    pub text_size: Size,

    /// Offset applied to duplicates so they are visually distinguishable.
    pub duplicate_offset: Vector,

    /// Where items without an explicit position land.
    pub spawn_point: Point,

    /// Cascade step per existing item so repeated adds don't stack exactly.
    pub spawn_step: Vector,

    /// Number of cascade steps before wrapping back to the spawn point.
    pub spawn_cascade: u32,

    /// Grid auto-arrange: center of the first cell.
    pub grid_origin: Point,

    /// Grid auto-arrange: fixed cell footprint.
    pub grid_cell: Size,

    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,

    /// Screen-space hit slop around resize handles, in pixels.
    pub handle_slop_px: f32,

    /// Degrees applied by the rotate affordance.
    pub rotate_step: f32,

    /// Typography for newly added text blocks.
    pub text_defaults: TextStyle,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(1200.0, 800.0),
            min_item_size: 50.0,
            image_size: Size::new(200.0, 200.0),
            text_size: Size::new(200.0, 60.0),
            duplicate_offset: Vector::new(20.0, 20.0),
            spawn_point: Point::new(300.0, 250.0),
            spawn_step: Vector::new(20.0, 20.0),
            spawn_cascade: 10,
            grid_origin: Point::new(120.0, 300.0),
            grid_cell: Size::new(220.0, 180.0),
            min_zoom: 0.5,
            max_zoom: 2.0,
            zoom_step: 0.1,
            handle_slop_px: 8.0,
            rotate_step: 90.0,
            text_defaults: TextStyle::default(),
        }
    }
}

impl BoardConfig {
    /// Decode a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    /// `InvalidConfig` when the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let config: BoardConfig =
            serde_json::from_str(json).map_err(|e| SceneError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check range constraints the store relies on.
    ///
    /// # Errors
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> SceneResult<()> {
        let invalid = |msg: &str| Err(SceneError::InvalidConfig(msg.to_string()));
        if !positive(self.min_item_size) {
            return invalid("minItemSize must be positive");
        }
        if !(positive(self.grid_cell.width) && positive(self.grid_cell.height)) {
            return invalid("gridCell must be positive");
        }
        if !positive(self.min_zoom) || self.min_zoom > self.max_zoom {
            return invalid("zoom range must satisfy 0 < minZoom <= maxZoom");
        }
        if !positive(self.zoom_step) {
            return invalid("zoomStep must be positive");
        }
        if self.image_size.width < self.min_item_size || self.image_size.height < self.min_item_size {
            return invalid("imageSize must respect minItemSize");
        }
        Ok(())
    }

    /// Clamp a zoom level into the configured range, rounded to two decimals
    /// so repeated steps don't accumulate float drift.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        let rounded = (zoom * 100.0).round() / 100.0;
        rounded.clamp(self.min_zoom, self.max_zoom)
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
