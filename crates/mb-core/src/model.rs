//! Scene item model for moodboard documents.
//!
//! A moodboard is a flat set of placed items (images and text blocks).
//! Every item is anchored at its **center**: `position` is the visual center
//! in unscaled canvas-space, `size` extends half in each direction, and
//! rotation is applied around that same center. Paint order is decided by
//! `z_index`, not by insertion order.

use crate::id::ItemId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in canvas-space (unscaled, pre-zoom).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    pub fn offset(self, delta: Vector) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// Delta from `origin` to `self`.
    pub fn delta_from(self, origin: Point) -> Vector {
        Vector::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A displacement in canvas-space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Divide both components (screen delta → canvas delta at a zoom level).
    pub fn scaled_down(self, factor: f32) -> Self {
        Self::new(self.dx / factor, self.dy / factor)
    }
}

/// Width × height in canvas-space units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp each axis independently to `min`.
    pub fn at_least(self, min: f32) -> Self {
        Self::new(self.width.max(min), self.height.max(min))
    }
}

/// Axis-aligned rectangle (top-left + extent) used for pre-rotation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Non-finite input collapses to 0 so a bad delta can never poison the
/// stored rotation.
pub fn normalize_rotation(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs,
    // and `-0.0 == 0.0` folds negative zero away.
    if r >= 360.0 || r == 0.0 { 0.0 } else { r }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color. Serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS `rgba()` form, used for background tiles.
    pub fn to_css(&self) -> String {
        if self.a == 0xFF {
            self.to_hex()
        } else {
            let alpha = f32::from(self.a) / 255.0;
            format!("rgba({}, {}, {}, {alpha:.2})", self.r, self.g, self.b)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color {s:?}")))
    }
}

// ─── Resize handles ──────────────────────────────────────────────────────

/// Which corner/edge handle drives a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    /// The four corner handles drawn for a selected image.
    pub const CORNERS: [ResizeHandle; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    /// Horizontal sign: `+1` for east components, `-1` for west, `0` otherwise.
    pub fn horizontal(self) -> f32 {
        match self {
            Self::E | Self::Ne | Self::Se => 1.0,
            Self::W | Self::Nw | Self::Sw => -1.0,
            Self::N | Self::S => 0.0,
        }
    }

    /// Vertical sign: `+1` for south components, `-1` for north, `0` otherwise.
    pub fn vertical(self) -> f32 {
        match self {
            Self::S | Self::Se | Self::Sw => 1.0,
            Self::N | Self::Ne | Self::Nw => -1.0,
            Self::E | Self::W => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "n" => Some(Self::N),
            "s" => Some(Self::S),
            "e" => Some(Self::E),
            "w" => Some(Self::W),
            "ne" => Some(Self::Ne),
            "nw" => Some(Self::Nw),
            "se" => Some(Self::Se),
            "sw" => Some(Self::Sw),
            _ => None,
        }
    }

    /// Apply a pointer delta to a gesture-start size.
    /// East/south components grow with positive deltas, west/north shrink.
    pub fn apply(self, start: Size, delta: Vector, min: f32) -> Size {
        Size::new(
            start.width + self.horizontal() * delta.dx,
            start.height + self.vertical() * delta.dy,
        )
        .at_least(min)
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

/// Typography of a text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f32,
    pub font_color: Color,
    pub font_family: String,
    /// CSS numeric weight (400 regular, 700 bold).
    pub font_weight: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            font_color: Color::WHITE,
            font_family: "sans-serif".into(),
            font_weight: 400,
        }
    }
}

/// Content of a text item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    pub style: TextStyle,
    /// Set once non-empty content has been committed. A text item that was
    /// never committed is an in-progress "add text" gesture.
    pub committed: bool,
}

impl TextContent {
    /// Whether the content counts as empty for the abandoned-text rule.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ─── Scene items ─────────────────────────────────────────────────────────

/// The item kinds on the moodboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemKind {
    /// A placed image referenced by URL.
    Image {
        source: String,
        title: Option<String>,
    },
    /// An editable text block.
    Text(TextContent),
}

/// A single placed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItem {
    pub id: ItemId,
    /// Visual center in canvas-space.
    pub position: Point,
    pub size: Size,
    /// Degrees, always in `[0, 360)`.
    pub rotation: f32,
    pub z_index: i64,
    pub kind: ItemKind,
}

impl SceneItem {
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ItemKind::Text(_))
    }

    pub fn text(&self) -> Option<&TextContent> {
        match &self.kind {
            ItemKind::Text(content) => Some(content),
            ItemKind::Image { .. } => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            ItemKind::Text(content) => Some(content),
            ItemKind::Image { .. } => None,
        }
    }

    /// Prefix used when generating IDs for this kind.
    pub fn id_prefix(kind: &ItemKind) -> &'static str {
        match kind {
            ItemKind::Image { .. } => "image",
            ItemKind::Text(_) => "text",
        }
    }

    /// Axis-aligned bounds before rotation.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.position.x - self.size.width / 2.0,
            y: self.position.y - self.size.height / 2.0,
            width: self.size.width,
            height: self.size.height,
        }
    }
}

/// An add request. Missing geometry is filled in by the store from config.
#[derive(Debug, Clone, PartialEq)]
pub enum NewItem {
    Image {
        source: String,
        title: Option<String>,
        position: Option<Point>,
        size: Option<Size>,
    },
    Text {
        text: String,
        style: TextStyle,
        position: Option<Point>,
        size: Option<Size>,
    },
}

impl NewItem {
    /// Image at the default spawn point and placeholder size.
    pub fn image(source: impl Into<String>) -> Self {
        Self::Image {
            source: source.into(),
            title: None,
            position: None,
            size: None,
        }
    }

    /// Place the new item at an explicit center.
    #[must_use]
    pub fn at(mut self, point: Point) -> Self {
        match &mut self {
            Self::Image { position, .. } | Self::Text { position, .. } => *position = Some(point),
        }
        self
    }

    #[must_use]
    pub fn with_title(mut self, new_title: impl Into<String>) -> Self {
        if let Self::Image { title, .. } = &mut self {
            *title = Some(new_title.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6c5ce7");

        let short = Color::from_hex("fff").unwrap();
        assert_eq!(short, Color::WHITE);

        let translucent = Color::from_hex("#FF000080").unwrap();
        assert_eq!(translucent.a, 0x80);
        assert_eq!(translucent.to_hex(), "#ff000080");
    }

    #[test]
    fn color_rejects_garbage() {
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn color_css_alpha() {
        let c = Color::rgba(255, 255, 255, 13);
        assert_eq!(c.to_css(), "rgba(255, 255, 255, 0.05)");
    }

    #[test]
    fn rotation_normalizes_into_range() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(450.0), 90.0);
        assert_eq!(normalize_rotation(-0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!(normalize_rotation(f32::NAN), 0.0);
        let tiny = normalize_rotation(-1e-6);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn handle_signs() {
        assert_eq!(ResizeHandle::Se.horizontal(), 1.0);
        assert_eq!(ResizeHandle::Se.vertical(), 1.0);
        assert_eq!(ResizeHandle::Nw.horizontal(), -1.0);
        assert_eq!(ResizeHandle::N.horizontal(), 0.0);
        assert_eq!(ResizeHandle::parse("sw"), Some(ResizeHandle::Sw));
        assert_eq!(ResizeHandle::parse("x"), None);
    }

    #[test]
    fn handle_apply_clamps_each_axis() {
        let start = Size::new(200.0, 200.0);
        let s = ResizeHandle::Nw.apply(start, Vector::new(400.0, -30.0), 50.0);
        assert_eq!(s, Size::new(50.0, 230.0));
    }

    #[test]
    fn bounds_are_center_anchored() {
        let item = SceneItem {
            id: ItemId::generate("image"),
            position: Point::new(100.0, 100.0),
            size: Size::new(200.0, 100.0),
            rotation: 0.0,
            z_index: 0,
            kind: ItemKind::Image {
                source: "a.png".into(),
                title: None,
            },
        };
        let b = item.bounds();
        assert_eq!((b.x, b.y), (0.0, 50.0));
        assert_eq!(b.center(), item.position);
    }
}
