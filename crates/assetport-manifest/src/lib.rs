//! Manifest builders for platform asset bundles.
//!
//! Supported manifests:
//! - Xcode `Contents.json` for image sets and color sets
//! - Android `colors.xml` and resource-qualifier folders

pub mod android;
pub mod json;
pub mod xcode;

use assetport_core::ManifestError;
use serde::Serialize;

pub use android::{colors_xml, hex_color, ColorResource, Qualifiers};
pub use json::{to_manifest_json, JsonStyle};
pub use xcode::{
    Appearance, ColorEncoding, ColorSetContents, ImageEntry, ImageSetContents, LanguageDirection,
};

/// A generated manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path relative to the bundle root.
    pub path: String,
    /// Serialized file content.
    pub data: String,
}

impl ManifestEntry {
    /// `Contents.json` inside an asset-set directory (`dir` ends with `/`).
    pub fn contents_json<T: Serialize>(
        dir: &str,
        value: &T,
        style: JsonStyle,
    ) -> Result<Self, ManifestError> {
        Ok(Self {
            path: format!("{}Contents.json", dir),
            data: to_manifest_json(value, style)?,
        })
    }
}
