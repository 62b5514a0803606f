//! `PixelSource` over a DOM `<img>`.
//!
//! The image is drawn once into an offscreen canvas at natural size; each
//! sample is a 1×1 `getImageData` read. Cross-origin images without CORS
//! headers taint the canvas and every read throws `SecurityError`, which
//! surfaces as `ExtractionUnavailable`.

use mb_core::error::{SceneError, SceneResult};
use mb_core::model::Color;
use mb_render::sample::PixelSource;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub struct DomImage {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

fn unavailable(context: &str, err: JsValue) -> SceneError {
    let detail = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    SceneError::ExtractionUnavailable(format!("{context}: {detail}"))
}

impl DomImage {
    /// Draw `img` into a scratch canvas.
    ///
    /// # Errors
    /// `ExtractionUnavailable` if there is no document or 2D context.
    pub fn capture(img: &HtmlImageElement) -> SceneResult<Self> {
        let width = img.natural_width();
        let height = img.natural_height();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SceneError::ExtractionUnavailable("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| unavailable("create canvas", e))?
            .dyn_into()
            .map_err(|_| SceneError::ExtractionUnavailable("not a canvas element".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| unavailable("get context", e))?
            .ok_or_else(|| SceneError::ExtractionUnavailable("2d context unavailable".into()))?
            .dyn_into()
            .map_err(|_| SceneError::ExtractionUnavailable("unexpected context type".into()))?;
        ctx.draw_image_with_html_image_element(img, 0.0, 0.0)
            .map_err(|e| unavailable("draw image", e))?;

        Ok(Self { ctx, width, height })
    }
}

impl PixelSource for DomImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> SceneResult<Color> {
        let data = self
            .ctx
            .get_image_data(f64::from(x), f64::from(y), 1.0, 1.0)
            .map_err(|e| unavailable("read pixels", e))?
            .data();
        match data.0.as_slice() {
            [r, g, b, a, ..] => Ok(Color::rgba(*r, *g, *b, *a)),
            _ => Err(SceneError::ExtractionUnavailable("empty pixel read".into())),
        }
    }
}
