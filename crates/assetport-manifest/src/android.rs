//! Android resource files and qualifiers.

use assetport_core::{Rgba, Theme};

/// XML declaration used by every generated resource file.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// `#RRGGBB`, or `#AARRGGBB` when the color is not fully opaque.
pub fn hex_color(color: Rgba) -> String {
    let (r, g, b, a) = color.to_rgba8();
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
    }
}

/// A named color resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorResource {
    pub name: String,
    pub color: Rgba,
}

impl ColorResource {
    pub fn new(name: impl Into<String>, color: Rgba) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Render a `colors.xml` document.
pub fn colors_xml(colors: &[ColorResource]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_HEADER);
    xml.push('\n');
    xml.push_str("<resources>\n");
    for resource in colors {
        xml.push_str(&format!(
            "    <color name=\"{}\">{}</color>\n",
            escape_xml(&resource.name),
            hex_color(resource.color)
        ));
    }
    xml.push_str("</resources>\n");
    xml
}

/// Resource qualifiers of one asset variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Qualifiers {
    pub locale: Option<String>,
    pub night: bool,
}

impl Qualifiers {
    pub fn new(theme: Theme, locale: Option<&str>) -> Self {
        Self {
            locale: locale.map(str::to_string),
            night: theme == Theme::Dark,
        }
    }

    /// Folder for drawables: `drawable[-<locale>][-night]`.
    pub fn drawable_folder(&self) -> String {
        self.folder("drawable")
    }

    /// Folder for values: `values[-<locale>][-night]`.
    pub fn values_folder(&self) -> String {
        self.folder("values")
    }

    fn folder(&self, base: &str) -> String {
        let mut folder = base.to_string();
        if let Some(locale) = &self.locale {
            folder.push('-');
            folder.push_str(locale);
        }
        if self.night {
            folder.push_str("-night");
        }
        folder
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
