pub mod candidate;
pub mod config;
pub mod error;
pub mod id;
pub mod layout;
pub mod model;
pub mod palette;
pub mod store;
pub mod typography;

pub use candidate::{ImageCandidate, SearchQuery, SearchResponse, group_by_category, ingest_images};
pub use config::BoardConfig;
pub use error::{SceneError, SceneResult};
pub use id::ItemId;
pub use layout::{GridSpec, grid_position};
pub use model::*;
pub use palette::{Palette, extract_hex_codes};
pub use store::{SceneStore, TextCommit};
pub use typography::{TypographyPreset, TypographySet, standard_presets};
