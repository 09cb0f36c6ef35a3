//! Color swatch export.
//!
//! A swatch is a `color-preview` layer holding a `$title` text layer and two
//! filled layers named `light` and `dark`.

use assetport_core::{
    first_solid, folder_path, resource_name, AssetError, NodeId, Result, Rgba, Scene, Theme,
};
use assetport_manifest::{colors_xml, ColorResource, ColorSetContents, ManifestEntry, Qualifiers};
use indexmap::IndexMap;

use crate::bundle::{AssetBundle, Content};
use crate::options::ExportOptions;
use crate::{ExportTarget, Outcome};

pub const PREVIEW_LAYER: &str = "color-preview";
pub const TITLE_LAYER: &str = "$title";
pub const LIGHT_LAYER: &str = "light";
pub const DARK_LAYER: &str = "dark";

const NO_SWATCHES: &str = "Nothing to export: no color previews found on the page.";

/// A named light/dark color pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSwatch {
    pub name: String,
    pub light: Rgba,
    pub dark: Rgba,
    /// Folder path of the preview layer, `""` or ending with `/`.
    pub folder: String,
    pub source: NodeId,
}

impl ColorSwatch {
    pub fn color(&self, theme: Theme) -> Rgba {
        match theme {
            Theme::Light => self.light,
            Theme::Dark => self.dark,
        }
    }
}

/// Collect every swatch on a page in layer order.
///
/// A swatch missing its title or a themed layer, or a themed layer without a
/// solid fill, fails the whole collection. So do duplicate names; the error
/// lists each of them.
pub fn collect_swatches(scene: &Scene, page: NodeId, options: &ExportOptions) -> Result<Vec<ColorSwatch>> {
    let mut swatches = Vec::new();
    for preview in scene.find_all(page, |node| node.name == PREVIEW_LAYER && node.is_container()) {
        swatches.push(read_swatch(scene, preview, options)?);
    }

    let duplicates = duplicate_names(swatches.iter().map(|swatch| swatch.name.as_str()));
    if !duplicates.is_empty() {
        return Err(AssetError::DuplicateNames { names: duplicates });
    }
    Ok(swatches)
}

fn read_swatch(scene: &Scene, preview: NodeId, options: &ExportOptions) -> Result<ColorSwatch> {
    let name = scene
        .find_one(preview, |node| node.name == TITLE_LAYER)
        .and_then(|title| scene.node(title).characters.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AssetError::missing_child(PREVIEW_LAYER, TITLE_LAYER))?
        .to_string();

    let light = read_fill(scene, preview, &name, LIGHT_LAYER)?;
    let dark = read_fill(scene, preview, &name, DARK_LAYER)?;

    Ok(ColorSwatch {
        folder: folder_path(scene, preview, &options.folder_marker),
        name,
        light,
        dark,
        source: preview,
    })
}

fn read_fill(scene: &Scene, preview: NodeId, swatch: &str, layer: &str) -> Result<Rgba> {
    let node = scene
        .find_one(preview, |node| node.name == layer && !node.fills.is_empty())
        .ok_or_else(|| AssetError::missing_child(swatch, layer))?;
    first_solid(&scene.node(node).fills).ok_or_else(|| AssetError::MissingFill {
        node: format!("{}/{}", swatch, layer),
    })
}

/// Names occurring more than once, each listed once, in first-seen order.
pub fn duplicate_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Export swatches as Xcode color sets.
#[tracing::instrument(skip_all, fields(command = "export-colors-to-xcode"))]
pub fn export_colors_xcode(scene: &Scene, target: &ExportTarget, options: &ExportOptions) -> Result<Outcome> {
    let page = target.page_name(scene)?;
    let swatches = collect_swatches(scene, target.page, options)?;
    if swatches.is_empty() {
        return Ok(Outcome::NothingToExport(NO_SWATCHES.to_string()));
    }
    tracing::info!(swatches = swatches.len(), "exporting color sets");

    let mut bundle = AssetBundle::new(format!("{}.xcassets", page));
    for swatch in &swatches {
        let dir = format!(
            "{}/{}/{}{}.colorset/",
            page, options.colors_folder, swatch.folder, swatch.name
        );
        let contents = ColorSetContents::new(
            swatch.light,
            swatch.dark,
            options.color_encoding,
            options.explicit_light_appearance,
        );
        bundle.push_manifest(ManifestEntry::contents_json(&dir, &contents, options.json_style)?)?;
    }
    Ok(Outcome::Completed(bundle))
}

/// Export swatches as Android `colors.xml` resources, one file per theme.
#[tracing::instrument(skip_all, fields(command = "export-colors-to-android"))]
pub fn export_colors_android(scene: &Scene, target: &ExportTarget, options: &ExportOptions) -> Result<Outcome> {
    let page = target.page_name(scene)?;
    let swatches = collect_swatches(scene, target.page, options)?;
    if swatches.is_empty() {
        return Ok(Outcome::NothingToExport(NO_SWATCHES.to_string()));
    }

    let names: Vec<String> = swatches.iter().map(|swatch| resource_name(&swatch.name)).collect();
    let duplicates = duplicate_names(names.iter().map(String::as_str));
    if !duplicates.is_empty() {
        return Err(AssetError::DuplicateNames { names: duplicates });
    }
    tracing::info!(swatches = swatches.len(), "exporting color resources");

    let mut bundle = AssetBundle::new(format!("{}-android", page));
    for theme in [Theme::Light, Theme::Dark] {
        let resources: Vec<ColorResource> = swatches
            .iter()
            .zip(&names)
            .map(|(swatch, name)| ColorResource::new(name, swatch.color(theme)))
            .collect();
        let folder = Qualifiers::new(theme, None).values_folder();
        bundle.insert(
            format!("res/{}/colors.xml", folder),
            Content::Text(colors_xml(&resources)),
        )?;
    }
    Ok(Outcome::Completed(bundle))
}
