pub mod commands;
pub mod controller;
pub mod export;
pub mod input;
pub mod shortcuts;

pub use commands::{CommandOutcome, SceneCommand};
pub use controller::{Controller, Gesture};
pub use export::{ExportArtifact, ExportGuard, RasterOptions, Rasterizer, export_file_name, today};
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
