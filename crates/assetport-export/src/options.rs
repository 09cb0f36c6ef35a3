//! Export configuration.

use assetport_core::{Result, FOLDER_MARKER};
use assetport_manifest::{ColorEncoding, JsonStyle};
use serde::{Deserialize, Serialize};

/// Options shared by every export command.
///
/// Missing keys fall back to their defaults, so a partial JSON document is a
/// valid configuration:
///
/// ```json
/// { "color-encoding": "hex", "json-style": "standard" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportOptions {
    /// Glyph marking a layer as an output folder.
    pub folder_marker: String,
    /// Substring identifying the frame that holds icon instances.
    pub icons_frame: String,
    /// Catalog folder for color sets.
    pub colors_folder: String,
    /// Catalog folder for icon image sets.
    pub icons_folder: String,
    /// Layout of `Contents.json` files.
    pub json_style: JsonStyle,
    /// Encoding of color-set RGB components.
    pub color_encoding: ColorEncoding,
    /// Write `luminosity: light` on the light color entry.
    pub explicit_light_appearance: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            folder_marker: FOLDER_MARKER.to_string(),
            icons_frame: "Icons".to_string(),
            colors_folder: "Colors".to_string(),
            icons_folder: "Icons".to_string(),
            json_style: JsonStyle::default(),
            color_encoding: ColorEncoding::default(),
            explicit_light_appearance: true,
        }
    }
}

impl ExportOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the manifest JSON style.
    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }

    /// Set the color-set component encoding.
    pub fn with_color_encoding(mut self, encoding: ColorEncoding) -> Self {
        self.color_encoding = encoding;
        self
    }

    /// Set the folder marker glyph.
    pub fn with_folder_marker(mut self, marker: impl Into<String>) -> Self {
        self.folder_marker = marker.into();
        self
    }

    /// Leave the light color entry without an appearance.
    pub fn implicit_light_appearance(mut self) -> Self {
        self.explicit_light_appearance = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::new();
        assert_eq!(options.folder_marker, "📁");
        assert_eq!(options.json_style, JsonStyle::SpaceBeforeColon);
        assert_eq!(options.color_encoding, ColorEncoding::Decimal);
        assert!(options.explicit_light_appearance);
    }

    #[test]
    fn test_partial_json() {
        let options =
            ExportOptions::from_json(r#"{"color-encoding": "hex", "json-style": "standard"}"#).unwrap();
        assert_eq!(options.color_encoding, ColorEncoding::Hex);
        assert_eq!(options.json_style, JsonStyle::Standard);
        assert_eq!(options.icons_frame, "Icons");
    }

    #[test]
    fn test_invalid_json() {
        assert!(ExportOptions::from_json(r#"{"color-encoding": "octal"}"#).is_err());
    }
}
