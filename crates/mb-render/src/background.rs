//! Decorative canvas backgrounds emitted as CSS.
//!
//! Purely cosmetic: nothing here affects hit testing or layout.

use mb_core::model::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Dots,
    #[default]
    Lines,
    Cross,
    Solid,
}

impl Background {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dots" => Some(Self::Dots),
            "lines" | "grid" => Some(Self::Lines),
            "cross" => Some(Self::Cross),
            "solid" | "none" => Some(Self::Solid),
            _ => None,
        }
    }
}

/// Pattern, tile size and colors of the board background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundStyle {
    pub pattern: Background,
    /// Tile edge in canvas units (scaled by zoom on output).
    pub tile: f32,
    pub base: Color,
    pub ink: Color,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            pattern: Background::Lines,
            tile: 20.0,
            base: Color::rgb(18, 18, 18),
            ink: Color::rgba(255, 255, 255, 13),
        }
    }
}

/// CSS `background-*` declarations, ready for `element.style`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundCss {
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
}

impl BackgroundStyle {
    pub fn to_css(&self, zoom: f32) -> BackgroundCss {
        let ink = self.ink.to_css();
        let tile = self.tile * zoom;
        let lines = format!(
            "linear-gradient({ink} 1px, transparent 1px), linear-gradient(90deg, {ink} 1px, transparent 1px)"
        );
        let dots = |radius: f32| {
            let c = tile / 2.0;
            format!("radial-gradient(circle at {c}px {c}px, {ink} {radius}px, transparent {radius}px)")
        };

        let image = match self.pattern {
            Background::Solid => None,
            Background::Lines => Some(lines),
            Background::Dots => Some(dots(1.0)),
            Background::Cross => Some(format!("{}, {lines}", dots(2.0))),
        };

        BackgroundCss {
            background_color: self.base.to_css(),
            background_size: image.as_ref().map(|_| format!("{tile}px {tile}px")),
            background_image: image,
        }
    }
}
