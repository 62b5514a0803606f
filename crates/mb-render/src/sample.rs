//! Dominant-color sampling from image pixels.
//!
//! Five fixed points are read (the quarter points and the center) at the
//! image's natural resolution. This is a cheap sampler, not a quantizer.

use image::RgbaImage;
use mb_core::error::{SceneError, SceneResult};
use mb_core::model::Color;

/// Sample locations as fractions of natural width/height, in output order.
pub const SAMPLE_POINTS: [(f32, f32); 5] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75), (0.5, 0.5)];

/// Read access to decoded pixels.
///
/// Implementations return `ExtractionUnavailable` when pixels exist but
/// can't be read (e.g. a cross-origin image in the browser).
pub trait PixelSource {
    /// Natural `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn pixel(&self, x: u32, y: u32) -> SceneResult<Color>;
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> SceneResult<Color> {
        let px = self
            .get_pixel_checked(x, y)
            .ok_or_else(|| SceneError::ExtractionUnavailable(format!("pixel ({x}, {y}) out of bounds")))?;
        let [r, g, b, a] = px.0;
        Ok(Color::rgba(r, g, b, a))
    }
}

/// Pixel coordinate of a fractional sample point, clamped into the image.
fn sample_coord(fraction: f32, extent: u32) -> u32 {
    let v = (extent as f32 * fraction).floor() as u32;
    v.min(extent.saturating_sub(1))
}

/// Distinct `#rrggbb` colors at the sample points, in sample order.
/// Alpha is ignored.
///
/// # Errors
/// Whatever the source reports for a blocked read.
pub fn sample_colors<S: PixelSource + ?Sized>(source: &S) -> SceneResult<Vec<String>> {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 {
        return Ok(Vec::new());
    }
    let mut out: Vec<String> = Vec::with_capacity(SAMPLE_POINTS.len());
    for (fx, fy) in SAMPLE_POINTS {
        let c = source.pixel(sample_coord(fx, w), sample_coord(fy, h))?;
        let hex = Color::rgb(c.r, c.g, c.b).to_hex();
        if !out.contains(&hex) {
            out.push(hex);
        }
    }
    Ok(out)
}

/// `sample_colors`, with blocked reads degraded to "no colors".
/// The scene is never touched either way.
pub fn sample_or_empty<S: PixelSource + ?Sized>(source: &S) -> Vec<String> {
    sample_colors(source).unwrap_or_else(|e| {
        log::warn!("color sampling failed: {e}");
        Vec::new()
    })
}
