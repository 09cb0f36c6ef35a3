//! Core value types shared by the naming engine, manifests and exporters.

use serde::{Deserialize, Serialize};

/// Kind of a scene node, as reported by the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Page,
    Frame,
    Group,
    Section,
    Component,
    Instance,
    Text,
    Vector,
    Rectangle,
    Ellipse,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Whether nodes of this kind carry a child list.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Page
                | NodeKind::Frame
                | NodeKind::Group
                | NodeKind::Section
                | NodeKind::Component
                | NodeKind::Instance
        )
    }
}

/// An RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// An RGBA color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert to 8-bit channels, rounding half up and clamping to [0, 1].
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        )
    }

    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Convert a [0, 1] channel to 0..=255 with round-half-up.
pub fn channel_to_u8(value: f64) -> u8 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    // f64::round rounds half away from zero, which is half up for non-negative input.
    (clamped * 255.0).round() as u8
}

/// Paint type of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Other,
}

/// A fill paint descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default)]
    pub color: Rgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Paint {
    /// A fully opaque solid paint.
    pub fn solid(color: Rgb) -> Self {
        Self {
            kind: PaintKind::Solid,
            color,
            opacity: None,
        }
    }

    /// Set the paint opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// The paint as RGBA, with a missing opacity meaning opaque.
    pub fn rgba(&self) -> Rgba {
        Rgba::new(
            self.color.r,
            self.color.g,
            self.color.b,
            self.opacity.unwrap_or(1.0),
        )
    }
}

/// Returns the color of the first solid paint in a fill list.
pub fn first_solid(fills: &[Paint]) -> Option<Rgba> {
    fills
        .iter()
        .find(|p| p.kind == PaintKind::Solid)
        .map(Paint::rgba)
}

/// Format requested from the host export capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    Pdf,
    Svg,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Svg => write!(f, "SVG"),
        }
    }
}

/// Appearance theme of an asset variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
