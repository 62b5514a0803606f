pub mod background;
pub mod hit;
pub mod sample;
pub mod svg;
pub mod view;

pub use background::{Background, BackgroundCss, BackgroundStyle};
pub use hit::{Hit, HitPart, hit_test};
pub use sample::{PixelSource, sample_colors, sample_or_empty};
pub use svg::render_svg;
pub use view::{CanvasTheme, NodeContent, ViewState, VisualNode, VisualTree, handles_for, render_scene};
