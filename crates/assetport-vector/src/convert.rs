//! SVG to VectorDrawable transcoding.
//!
//! Input is the SVG the design tool exports for a single layer, so a pattern
//! scan over `<path>` elements is enough. Only `d`, `fill`, `stroke`,
//! `stroke-width` and `opacity` survive; groups, transforms, gradients and
//! clip paths are dropped.

use std::sync::OnceLock;

use assetport_core::ConvertError;
use regex::Regex;

use crate::viewbox::ViewBox;

const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";
const DEFAULT_FILL: &str = "#000000";

/// Target size and direction of a drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorOptions {
    /// Width in dp.
    pub width: f64,
    /// Height in dp.
    pub height: f64,
    /// Emit `android:autoMirrored="true"`.
    pub is_rtl: bool,
}

impl VectorOptions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            is_rtl: false,
        }
    }

    pub fn mirrored(mut self, is_rtl: bool) -> Self {
        self.is_rtl = is_rtl;
        self
    }
}

/// A `<path>` element reduced to the supported attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathElement {
    pub path_data: String,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
    pub opacity: Option<String>,
}

impl PathElement {
    /// Fill color to emit; `none` suppresses it, absence means black.
    pub fn fill_color(&self) -> Option<&str> {
        match self.fill.as_deref() {
            None => Some(DEFAULT_FILL),
            Some("none") => None,
            Some(fill) => Some(fill),
        }
    }

    pub fn stroke_color(&self) -> Option<&str> {
        self.stroke.as_deref().filter(|s| *s != "none")
    }

    /// Alpha to emit; full opacity is the implicit default.
    pub fn fill_alpha(&self) -> Option<&str> {
        let opacity = self.opacity.as_deref()?;
        match opacity.trim().parse::<f64>() {
            Ok(value) if value == 1.0 => None,
            _ => Some(opacity),
        }
    }
}

fn viewbox_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:^|\s)viewBox\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid viewBox regex")
    })
}

fn path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<path\b([^>]*)>").expect("valid path regex"))
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:^|\s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("valid attribute regex")
    })
}

/// Extract the `viewBox` text, if present.
pub fn find_viewbox(svg: &str) -> Option<&str> {
    let caps = viewbox_regex().captures(svg)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Scan every `<path>` element in source order.
///
/// Elements without a `d` attribute are skipped.
pub fn extract_paths(svg: &str) -> Vec<PathElement> {
    let mut paths = Vec::new();
    for caps in path_regex().captures_iter(svg) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let mut element = PathElement::default();
        let mut has_data = false;

        for attr in attribute_regex().captures_iter(attrs) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .map_or(String::new(), |m| m.as_str().to_string());
            match &attr[1] {
                "d" => {
                    element.path_data = value;
                    has_data = true;
                }
                "fill" => element.fill = Some(value),
                "stroke" => element.stroke = Some(value),
                "stroke-width" => element.stroke_width = Some(value),
                "opacity" => element.opacity = Some(value),
                _ => {}
            }
        }

        if has_data {
            paths.push(element);
        } else {
            tracing::debug!(element = %caps.get(0).map_or("", |m| m.as_str()), "skipping <path> without d");
        }
    }
    paths
}

/// Convert an SVG document to VectorDrawable XML.
pub fn convert(svg: &str, options: &VectorOptions) -> Result<String, ConvertError> {
    check_dimension("width", options.width)?;
    check_dimension("height", options.height)?;

    let viewbox = match find_viewbox(svg) {
        Some(text) => ViewBox::parse(text)?,
        None => ViewBox::from_size(options.width, options.height),
    };

    let mut xml = String::new();
    xml.push_str(&format!("<vector xmlns:android=\"{}\"\n", ANDROID_NS));
    xml.push_str(&format!("    android:width=\"{}dp\"\n", options.width));
    xml.push_str(&format!("    android:height=\"{}dp\"\n", options.height));
    xml.push_str(&format!("    android:viewportWidth=\"{}\"\n", viewbox.width));
    xml.push_str(&format!("    android:viewportHeight=\"{}\"", viewbox.height));
    if options.is_rtl {
        xml.push_str("\n    android:autoMirrored=\"true\"");
    }
    xml.push_str(">\n");

    for path in extract_paths(svg) {
        write_path(&mut xml, &path);
    }

    xml.push_str("</vector>\n");
    Ok(xml)
}

fn write_path(xml: &mut String, path: &PathElement) {
    let mut attrs = vec![format!("android:pathData=\"{}\"", path.path_data)];
    if let Some(fill) = path.fill_color() {
        attrs.push(format!("android:fillColor=\"{}\"", fill));
    }
    if let Some(stroke) = path.stroke_color() {
        attrs.push(format!("android:strokeColor=\"{}\"", stroke));
    }
    if let Some(width) = &path.stroke_width {
        attrs.push(format!("android:strokeWidth=\"{}\"", width));
    }
    if let Some(alpha) = path.fill_alpha() {
        attrs.push(format!("android:fillAlpha=\"{}\"", alpha));
    }

    xml.push_str("    <path\n");
    xml.push_str(
        &attrs
            .iter()
            .map(|a| format!("        {}", a))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    xml.push_str("/>\n");
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), ConvertError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConvertError::InvalidDimension { name, value })
    }
}
