//! Typography presets collected from the board.
//!
//! Picking typography from an item yields the standard heading/subheading/body
//! ramp. There is no glyph recognition; the presets are fixed and only the
//! collection (deduplicated, in pick order) is stateful.

use crate::model::{Color, TextStyle};
use serde::{Deserialize, Serialize};

/// Family used by the standard preset ramp.
pub const PRESET_FAMILY: &str = "Inter";

/// A named text style offered in the typography panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyPreset {
    pub name: String,
    pub family: String,
    pub weight: u16,
    /// Size in CSS pixels.
    pub size: f32,
}

impl TypographyPreset {
    pub fn new(name: impl Into<String>, family: impl Into<String>, weight: u16, size: f32) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            weight,
            size,
        }
    }

    /// `"Inter, 700, 24px"` as shown under the preset name.
    pub fn describe(&self) -> String {
        format!("{}, {}, {}px", self.family, self.weight, self.size)
    }

    /// Text style for new text blocks; the color is kept from the caller.
    pub fn to_text_style(&self, font_color: Color) -> TextStyle {
        TextStyle {
            font_size: self.size,
            font_color,
            font_family: self.family.clone(),
            font_weight: self.weight,
        }
    }
}

/// The heading/subheading/body ramp produced by a typography pick.
pub fn standard_presets() -> [TypographyPreset; 3] {
    [
        TypographyPreset::new("Heading", PRESET_FAMILY, 700, 24.0),
        TypographyPreset::new("Subheading", PRESET_FAMILY, 600, 18.0),
        TypographyPreset::new("Body Text", PRESET_FAMILY, 400, 16.0),
    ]
}

/// Collected presets, distinct and in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypographySet(Vec<TypographyPreset>);

impl TypographySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presets(&self) -> &[TypographyPreset] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&TypographyPreset> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append presets not already collected. Returns how many were added.
    pub fn merge<I>(&mut self, presets: I) -> usize
    where
        I: IntoIterator<Item = TypographyPreset>,
    {
        let before = self.0.len();
        for preset in presets {
            if !self.0.contains(&preset) {
                self.0.push(preset);
            }
        }
        self.0.len() - before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
