//! Xcode asset catalog `Contents.json` models.

use assetport_core::{Rgba, Theme, VariantKey};
use serde::{Deserialize, Serialize};

/// `info` block shared by every `Contents.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XcodeInfo {
    pub version: u32,
    pub author: String,
}

impl Default for XcodeInfo {
    fn default() -> Self {
        Self {
            version: 1,
            author: "xcode".to_string(),
        }
    }
}

/// A `luminosity` appearance marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub appearance: String,
    pub value: String,
}

impl Appearance {
    pub fn luminosity(theme: Theme) -> Self {
        Self {
            appearance: "luminosity".to_string(),
            value: theme.as_str().to_string(),
        }
    }
}

/// Layout direction of an image variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageDirection {
    LeftToRight,
    RightToLeft,
}

/// `Contents.json` of an `.imageset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSetContents {
    pub images: Vec<ImageEntry>,
    #[serde(default)]
    pub info: XcodeInfo,
    #[serde(default)]
    pub properties: ImageSetProperties,
}

impl ImageSetContents {
    pub fn new(images: Vec<ImageEntry>) -> Self {
        Self {
            images,
            info: XcodeInfo::default(),
            properties: ImageSetProperties::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSetProperties {
    #[serde(rename = "preserves-vector-representation")]
    pub preserves_vector_representation: bool,
}

impl Default for ImageSetProperties {
    fn default() -> Self {
        Self {
            preserves_vector_representation: true,
        }
    }
}

/// One file of an image set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub idiom: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appearances: Vec<Appearance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(
        rename = "language-direction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub language_direction: Option<LanguageDirection>,
}

impl ImageEntry {
    /// A universal image with no qualifiers.
    pub fn universal(filename: impl Into<String>) -> Self {
        Self {
            idiom: "universal".to_string(),
            filename: filename.into(),
            appearances: Vec::new(),
            locale: None,
            language_direction: None,
        }
    }

    /// Mark the image for a theme; light is the implicit default.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.appearances.clear();
        if theme == Theme::Dark {
            self.appearances.push(Appearance::luminosity(Theme::Dark));
        }
        self
    }

    /// Image entry for an icon variant.
    ///
    /// RTL layers are pinned right-to-left. When the group has any RTL layer,
    /// every other layer is pinned left-to-right so Xcode does not mirror it.
    pub fn for_variant(filename: impl Into<String>, key: &VariantKey, group_has_rtl: bool) -> Self {
        let mut entry = Self::universal(filename).with_theme(key.theme);
        entry.locale = key.locale.clone();
        entry.language_direction = if key.rtl {
            Some(LanguageDirection::RightToLeft)
        } else if group_has_rtl {
            Some(LanguageDirection::LeftToRight)
        } else {
            None
        };
        entry
    }
}

/// Encoding of RGB components in a color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorEncoding {
    /// `"0.500"`
    #[default]
    Decimal,
    /// `"0x80"`
    Hex,
}

/// `Contents.json` of a `.colorset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSetContents {
    #[serde(default)]
    pub info: XcodeInfo,
    pub colors: Vec<ColorEntry>,
}

impl ColorSetContents {
    /// A light/dark pair.
    ///
    /// With `explicit_light` the light entry carries a `luminosity: light`
    /// appearance, otherwise it relies on the implicit default.
    pub fn new(light: Rgba, dark: Rgba, encoding: ColorEncoding, explicit_light: bool) -> Self {
        let light_appearances = if explicit_light {
            vec![Appearance::luminosity(Theme::Light)]
        } else {
            Vec::new()
        };
        Self {
            info: XcodeInfo::default(),
            colors: vec![
                ColorEntry {
                    idiom: "universal".to_string(),
                    appearances: light_appearances,
                    color: XcodeColor::srgb(light, encoding),
                },
                ColorEntry {
                    idiom: "universal".to_string(),
                    appearances: vec![Appearance::luminosity(Theme::Dark)],
                    color: XcodeColor::srgb(dark, encoding),
                },
            ],
        }
    }

    /// Color of the entry for a theme. Entries without a luminosity
    /// appearance count as light.
    pub fn color_for(&self, theme: Theme) -> Option<Rgba> {
        self.colors
            .iter()
            .find(|entry| entry.theme() == theme)
            .and_then(|entry| entry.color.rgba())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub idiom: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appearances: Vec<Appearance>,
    pub color: XcodeColor,
}

impl ColorEntry {
    pub fn theme(&self) -> Theme {
        let dark = self
            .appearances
            .iter()
            .any(|a| a.appearance == "luminosity" && a.value == "dark");
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XcodeColor {
    #[serde(rename = "color-space")]
    pub color_space: String,
    pub components: ColorComponents,
}

impl XcodeColor {
    pub fn srgb(color: Rgba, encoding: ColorEncoding) -> Self {
        Self {
            color_space: "srgb".to_string(),
            components: ColorComponents::encode(color, encoding),
        }
    }

    /// Decode the components back to RGBA.
    pub fn rgba(&self) -> Option<Rgba> {
        self.components.decode()
    }
}

/// Color components, stored as strings the way Xcode writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorComponents {
    pub red: String,
    pub green: String,
    pub blue: String,
    pub alpha: String,
}

impl ColorComponents {
    /// Encode RGB per `encoding`; alpha is always a 3-decimal fraction.
    pub fn encode(color: Rgba, encoding: ColorEncoding) -> Self {
        let channel = |v: f64| match encoding {
            ColorEncoding::Decimal => decimal(v),
            ColorEncoding::Hex => format!("0x{:02X}", assetport_core::channel_to_u8(v)),
        };
        Self {
            red: channel(color.r),
            green: channel(color.g),
            blue: channel(color.b),
            alpha: decimal(color.a),
        }
    }

    /// Decode either encoding (and plain 0-255 integers) back to RGBA.
    pub fn decode(&self) -> Option<Rgba> {
        Some(Rgba::new(
            decode_channel(&self.red)?,
            decode_channel(&self.green)?,
            decode_channel(&self.blue)?,
            self.alpha.trim().parse().ok()?,
        ))
    }
}

fn decimal(value: f64) -> String {
    format!("{:.3}", value.clamp(0.0, 1.0))
}

fn decode_channel(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).ok().map(|v| v as f64 / 255.0);
    }
    if text.contains('.') {
        return text.parse().ok();
    }
    text.parse::<u8>().ok().map(|v| v as f64 / 255.0)
}
