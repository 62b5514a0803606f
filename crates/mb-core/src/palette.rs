//! Color palettes: hex-code extraction from suggestion text, merging of
//! sampled colors, and CSS custom-property export.

use serde::{Deserialize, Serialize};
use winnow::prelude::*;
use winnow::token::take_while;

/// File name offered for the palette download.
pub const PALETTE_FILE_NAME: &str = "color-palette.css";
pub const PALETTE_MIME: &str = "text/css";

/// An ordered list of distinct colors (lowercase hex strings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, color: &str) -> bool {
        self.0.iter().any(|c| c.eq_ignore_ascii_case(color))
    }

    /// Append colors not already present, keeping their order.
    /// Returns how many were added.
    pub fn merge<I, S>(&mut self, colors: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.0.len();
        for color in colors {
            let color = color.as_ref().trim();
            if !color.is_empty() && !self.contains(color) {
                self.0.push(color.to_ascii_lowercase());
            }
        }
        self.0.len() - before
    }

    /// Colors mentioned in `text`; falls back to `fallback` when there are none.
    pub fn from_suggestions(text: &str, fallback: &[String]) -> Self {
        let mut palette = Self::new();
        palette.merge(extract_hex_codes(text));
        if palette.is_empty() {
            palette.merge(fallback);
        }
        palette
    }

    /// `:root { --color-1: …; }` with one-based indices.
    pub fn to_css_variables(&self) -> String {
        let mut css = String::from(":root {\n");
        for (i, color) in self.0.iter().enumerate() {
            css.push_str(&format!("  --color-{}: {color};\n", i + 1));
        }
        css.push('}');
        css
    }
}

impl FromIterator<String> for Palette {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut palette = Self::new();
        palette.merge(iter);
        palette
    }
}

// ─── Hex extraction ──────────────────────────────────────────────────────

/// `#` followed by six hex digits, or by three when six aren't there.
/// Trailing hex digits past the sixth are left in the input.
fn hex_code<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    let start = *input;
    '#'.parse_next(input)?;
    let digits = take_while(3..=6, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    let len = if digits.len() == 6 { 6 } else { 3 };
    // Back up over a 4- or 5-digit run: only its first three digits count.
    *input = &start[1 + len..];
    Ok(&start[..1 + len])
}

/// Every `#rgb` / `#rrggbb` token in `text`, in order of appearance.
/// Duplicates are kept; `Palette::merge` collapses them.
pub fn extract_hex_codes(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('#') {
        rest = &rest[pos..];
        let mut cursor = rest;
        match hex_code(&mut cursor) {
            Ok(code) => {
                out.push(code.to_string());
                rest = cursor;
            }
            Err(_) => rest = &rest[1..],
        }
    }
    out
}
