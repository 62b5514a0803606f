//! Export adapter: raster snapshots of the board and palette downloads.
//!
//! Rasterization itself is an injected capability (`Rasterizer`). In the
//! browser it is a JS function over the live DOM; natively it is the SVG
//! flattener. This module owns what surrounds it: file naming, options,
//! re-entrancy and error mapping.

use mb_core::error::{SceneError, SceneResult};
use mb_core::palette::{PALETTE_FILE_NAME, PALETTE_MIME, Palette};
use mb_render::svg::render_svg;
use mb_render::view::VisualTree;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// File name stem for board snapshots.
pub const EXPORT_PREFIX: &str = "design-canvas";

// ─── Options ─────────────────────────────────────────────────────────────

/// Options handed to the rasterizer (html2canvas-compatible names).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterOptions {
    pub background_color: String,
    /// Cross-origin images may taint the output instead of aborting it.
    pub allow_taint: bool,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            background_color: "#121212".into(),
            allow_taint: true,
            use_cors: true,
        }
    }
}

// ─── Dates ───────────────────────────────────────────────────────────────

/// Today's UTC date (the browser clock under `wasmbind`).
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `design-canvas-YYYY-MM-DD.<extension>`.
pub fn export_file_name(date: NaiveDate, extension: &str) -> String {
    format!("{EXPORT_PREFIX}-{}.{extension}", date.format("%Y-%m-%d"))
}

// ─── Artifacts ───────────────────────────────────────────────────────────

/// A finished download: name, MIME type and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// The palette as a `:root` CSS custom-property sheet.
pub fn palette_artifact(palette: &Palette) -> ExportArtifact {
    ExportArtifact {
        file_name: PALETTE_FILE_NAME.into(),
        mime: PALETTE_MIME,
        bytes: palette.to_css_variables().into_bytes(),
    }
}

// ─── Rasterizer ──────────────────────────────────────────────────────────

/// Produces encoded image bytes for the board region.
pub trait Rasterizer {
    fn mime(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    /// Encode the tree. Errors are free-form; the export path wraps them.
    fn rasterize(&mut self, tree: &VisualTree, options: &RasterOptions) -> Result<Vec<u8>, String>;
}

/// Native rasterizer that flattens to SVG.
#[derive(Debug, Default)]
pub struct SvgRasterizer;

impl Rasterizer for SvgRasterizer {
    fn mime(&self) -> &'static str {
        "image/svg+xml"
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn rasterize(&mut self, tree: &VisualTree, _options: &RasterOptions) -> Result<Vec<u8>, String> {
        Ok(render_svg(tree).into_bytes())
    }
}

// ─── Guard ───────────────────────────────────────────────────────────────

/// Prevents overlapping exports of the same region.
#[derive(Debug, Default)]
pub struct ExportGuard {
    pending: bool,
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Claim the export slot.
    ///
    /// # Errors
    /// `ExportInProgress` while a previous export hasn't finished.
    pub fn begin(&mut self) -> SceneResult<()> {
        if self.pending {
            return Err(SceneError::ExportInProgress);
        }
        self.pending = true;
        Ok(())
    }

    /// Release the slot, whatever the outcome of the export.
    pub fn finish(&mut self) {
        self.pending = false;
    }
}

/// Run a synchronous export through the guard.
///
/// Failures are logged and surfaced as `ExportFailed`; nothing is offered
/// for download and the scene is untouched.
///
/// # Errors
/// `ExportInProgress` if the guard is held, `ExportFailed` if the
/// rasterizer fails or returns no data.
pub fn export_raster<R: Rasterizer + ?Sized>(
    guard: &mut ExportGuard,
    rasterizer: &mut R,
    tree: &VisualTree,
    options: &RasterOptions,
    date: NaiveDate,
) -> SceneResult<ExportArtifact> {
    guard.begin()?;
    let result = rasterizer.rasterize(tree, options);
    guard.finish();

    let bytes = result
        .and_then(|bytes| {
            if bytes.is_empty() {
                Err("rasterizer produced no data".to_string())
            } else {
                Ok(bytes)
            }
        })
        .map_err(|e| {
            log::error!("export failed: {e}");
            SceneError::ExportFailed(e)
        })?;

    log::debug!("exported {} bytes as {}", bytes.len(), rasterizer.mime());
    Ok(ExportArtifact {
        file_name: export_file_name(date, rasterizer.extension()),
        mime: rasterizer.mime(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::store::SceneStore;
    use mb_render::view::{ViewState, render_scene};
    use pretty_assertions::assert_eq;

    struct Failing;

    impl Rasterizer for Failing {
        fn mime(&self) -> &'static str {
            "image/png"
        }

        fn extension(&self) -> &'static str {
            "png"
        }

        fn rasterize(&mut self, _tree: &VisualTree, _options: &RasterOptions) -> Result<Vec<u8>, String> {
            Err("tainted canvas".into())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn empty_tree() -> VisualTree {
        render_scene(&SceneStore::default(), &ViewState::default())
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(export_file_name(date(2024, 3, 7), "png"), "design-canvas-2024-03-07.png");
    }

    #[test]
    fn today_names_a_file() {
        let name = export_file_name(today(), "png");
        assert!(name.starts_with("design-canvas-20"), "{name}");
        assert_eq!(name.len(), "design-canvas-YYYY-MM-DD.png".len());
    }

    #[test]
    fn options_serialize_with_html2canvas_names() {
        let json = serde_json::to_string(&RasterOptions::default()).unwrap();
        assert_eq!(json, r##"{"backgroundColor":"#121212","allowTaint":true,"useCORS":true}"##);
    }

    #[test]
    fn guard_rejects_overlap() {
        let mut guard = ExportGuard::new();
        guard.begin().unwrap();
        assert_eq!(guard.begin(), Err(SceneError::ExportInProgress));
        guard.finish();
        assert!(guard.begin().is_ok());
    }

    #[test]
    fn failed_export_releases_guard() {
        let mut guard = ExportGuard::new();
        let err = export_raster(
            &mut guard,
            &mut Failing,
            &empty_tree(),
            &RasterOptions::default(),
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err, SceneError::ExportFailed("tainted canvas".into()));
        assert!(!guard.is_pending());
    }

    #[test]
    fn svg_export_names_file() {
        let mut guard = ExportGuard::new();
        let artifact = export_raster(
            &mut guard,
            &mut SvgRasterizer,
            &empty_tree(),
            &RasterOptions::default(),
            date(2024, 5, 1),
        )
        .unwrap();
        assert_eq!(artifact.file_name, "design-canvas-2024-05-01.svg");
        assert_eq!(artifact.mime, "image/svg+xml");
        assert!(artifact.bytes.starts_with(b"<svg"));
    }

    #[test]
    fn palette_download() {
        let palette: Palette = vec!["#ff0000".to_string()].into_iter().collect();
        let artifact = palette_artifact(&palette);
        assert_eq!(artifact.file_name, "color-palette.css");
        assert_eq!(artifact.mime, "text/css");
        assert_eq!(
            String::from_utf8(artifact.bytes).unwrap(),
            ":root {\n  --color-1: #ff0000;\n}"
        );
    }
}
