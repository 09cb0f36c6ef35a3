//! Icon export.
//!
//! Icons live in a frame whose name contains the configured marker
//! (`Icons` by default). Each icon is an `icon` instance with a `$icon-name`
//! text layer and a `$icon-group` frame; the group's children are the
//! variant layers (`$light`, `$dark`, `$rtl-light`, `$rtl-dark`,
//! `$<locale>-<theme>`).

use assetport_core::{
    folder_path, parse_role, resource_name, AssetError, NodeExporter, NodeId, NodeKind, Result,
    Role, Scene, Theme, VariantKey,
};
use assetport_manifest::{ImageEntry, ImageSetContents, ManifestEntry, Qualifiers};
use assetport_vector::{convert, VectorOptions};
use indexmap::IndexMap;

use crate::batch::{export_batch, ExportJob};
use crate::bundle::{ensure_unique_paths, AssetBundle, Content};
use crate::options::ExportOptions;
use crate::{ExportTarget, Outcome};

pub const ICON_LAYER: &str = "icon";
pub const NAME_LAYER: &str = "$icon-name";
pub const GROUP_LAYER: &str = "$icon-group";

const NO_ICONS: &str = "Nothing to export: no icons found on the page.";

/// One visible variant layer of an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconVariant {
    pub role: Role,
    pub key: VariantKey,
    pub node: NodeId,
}

/// An icon and its variant layers in export order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconGroup {
    pub name: String,
    pub node: NodeId,
    /// Folder path of the icon instance, `""` or ending with `/`.
    pub folder: String,
    pub variants: Vec<IconVariant>,
}

impl IconGroup {
    /// Whether any variant is an RTL layer.
    pub fn has_rtl(&self) -> bool {
        self.variants.iter().any(|variant| variant.key.rtl)
    }

    /// Whether an RTL layer exists for a theme.
    pub fn has_rtl_for(&self, theme: Theme) -> bool {
        self.variants
            .iter()
            .any(|variant| variant.key.rtl && variant.key.theme == theme)
    }

    pub fn variant(&self, key: &VariantKey) -> Option<&IconVariant> {
        self.variants.iter().find(|variant| &variant.key == key)
    }

    /// `<name>-<role stem>.pdf`.
    pub fn pdf_name(&self, variant: &IconVariant) -> String {
        let stem = variant.role.stem().unwrap_or_default();
        format!("{}-{}.pdf", self.name, stem)
    }
}

/// First frame on the page whose name contains the icons marker.
pub fn find_icons_frame(scene: &Scene, page: NodeId, options: &ExportOptions) -> Option<NodeId> {
    scene.find_one(page, |node| {
        node.kind == NodeKind::Frame && node.name.contains(options.icons_frame.as_str())
    })
}

/// Collect every icon in the frame in layer order.
pub fn collect_icon_groups(scene: &Scene, frame: NodeId, options: &ExportOptions) -> Result<Vec<IconGroup>> {
    scene
        .find_all(frame, |node| node.name == ICON_LAYER && node.kind == NodeKind::Instance)
        .into_iter()
        .map(|icon| read_group(scene, icon, options))
        .collect()
}

fn read_group(scene: &Scene, icon: NodeId, options: &ExportOptions) -> Result<IconGroup> {
    let name = scene
        .find_one(icon, |node| node.name == NAME_LAYER)
        .and_then(|node| scene.node(node).characters.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AssetError::missing_child(ICON_LAYER, NAME_LAYER))?
        .to_string();

    let group = scene
        .find_one(icon, |node| node.name == GROUP_LAYER && node.is_container())
        .ok_or_else(|| AssetError::missing_child(&name, GROUP_LAYER))?;

    Ok(IconGroup {
        variants: derive_variants(scene, group, &name),
        folder: folder_path(scene, icon, &options.folder_marker),
        name,
        node: icon,
    })
}

fn derive_variants(scene: &Scene, group: NodeId, icon: &str) -> Vec<IconVariant> {
    let mut variants: IndexMap<VariantKey, IconVariant> = IndexMap::new();

    for &child in scene.children(group).unwrap_or_default() {
        let node = scene.node(child);
        let role = parse_role(&node.name);
        let Some(key) = role.key() else {
            continue;
        };
        if !node.visible {
            tracing::debug!(icon, layer = %node.name, "skipping hidden variant layer");
            continue;
        }
        if variants.contains_key(&key) {
            tracing::warn!(icon, layer = %node.name, "duplicate variant layer ignored");
            continue;
        }
        variants.insert(key.clone(), IconVariant { role, key, node: child });
    }

    let mut variants: Vec<IconVariant> = variants.into_values().collect();
    // Stable, so localized layers keep their child order.
    variants.sort_by_key(|variant| variant.role.rank());
    variants
}

fn icon_groups(scene: &Scene, target: &ExportTarget, options: &ExportOptions) -> Result<Vec<IconGroup>> {
    match find_icons_frame(scene, target.page, options) {
        Some(frame) => collect_icon_groups(scene, frame, options),
        None => {
            tracing::debug!(marker = %options.icons_frame, "no icons frame on page");
            Ok(Vec::new())
        }
    }
}

/// Export icons as Xcode image sets of PDFs.
#[tracing::instrument(skip_all, fields(command = "export-icons-to-xcode"))]
pub async fn export_icons_xcode<E: NodeExporter>(
    scene: &Scene,
    exporter: &E,
    target: &ExportTarget,
    options: &ExportOptions,
) -> Result<Outcome> {
    let page = target.page_name(scene)?;
    let groups = icon_groups(scene, target, options)?;
    if groups.is_empty() {
        return Ok(Outcome::NothingToExport(NO_ICONS.to_string()));
    }

    let mut manifests = Vec::with_capacity(groups.len());
    let mut files = Vec::new();
    for group in &groups {
        let dir = format!(
            "{}/{}/{}{}.imageset/",
            page, options.icons_folder, group.folder, group.name
        );
        let has_rtl = group.has_rtl();
        let mut images = Vec::with_capacity(group.variants.len());
        for variant in &group.variants {
            let filename = group.pdf_name(variant);
            images.push(ImageEntry::for_variant(&filename, &variant.key, has_rtl));
            files.push((format!("{}{}", dir, filename), variant.node));
        }
        manifests.push(ManifestEntry::contents_json(
            &dir,
            &ImageSetContents::new(images),
            options.json_style,
        )?);
    }

    ensure_unique_paths(
        manifests
            .iter()
            .map(|manifest| manifest.path.clone())
            .chain(files.iter().map(|(path, _)| path.clone())),
    )?;
    tracing::info!(icons = groups.len(), files = files.len(), "exporting icon image sets");

    let jobs: Vec<ExportJob> = files.iter().map(|&(_, node)| ExportJob::pdf(node)).collect();
    let payloads = export_batch(exporter, &jobs).await?;

    let mut bundle = AssetBundle::new(format!("{}.xcassets", page));
    for manifest in manifests {
        bundle.push_manifest(manifest)?;
    }
    for ((path, _), bytes) in files.into_iter().zip(payloads) {
        bundle.insert(path, Content::Binary(bytes))?;
    }
    Ok(Outcome::Completed(bundle))
}

/// A drawable to write for one icon variant.
#[derive(Debug, Clone)]
struct Drawable {
    path: String,
    node: NodeId,
    options: VectorOptions,
}

/// Export icons as Android vector drawables.
///
/// RTL layers are not written: the default layer of the same theme is
/// flagged `autoMirrored` instead.
#[tracing::instrument(skip_all, fields(command = "export-icons-to-android"))]
pub async fn export_icons_android<E: NodeExporter>(
    scene: &Scene,
    exporter: &E,
    target: &ExportTarget,
    options: &ExportOptions,
) -> Result<Outcome> {
    let page = target.page_name(scene)?;
    let groups = icon_groups(scene, target, options)?;

    let mut drawables = Vec::new();
    for group in &groups {
        let file = format!("{}.xml", resource_name(&group.name));
        for variant in &group.variants {
            if variant.key.rtl {
                if group.variant(&VariantKey::themed(variant.key.theme)).is_none() {
                    tracing::debug!(icon = %group.name, layer = ?variant.role, "rtl layer without a default layer");
                }
                continue;
            }
            let node = scene.node(variant.node);
            let is_rtl = variant.key.locale.is_none() && group.has_rtl_for(variant.key.theme);
            let qualifiers = Qualifiers::new(variant.key.theme, variant.key.locale.as_deref());
            drawables.push(Drawable {
                path: format!("res/{}/{}", qualifiers.drawable_folder(), file),
                node: variant.node,
                options: VectorOptions::new(node.width, node.height).mirrored(is_rtl),
            });
        }
    }

    if drawables.is_empty() {
        return Ok(Outcome::NothingToExport(NO_ICONS.to_string()));
    }
    ensure_unique_paths(drawables.iter().map(|drawable| drawable.path.clone()))?;
    tracing::info!(icons = groups.len(), drawables = drawables.len(), "exporting vector drawables");

    let jobs: Vec<ExportJob> = drawables.iter().map(|drawable| ExportJob::svg(drawable.node)).collect();
    let payloads = export_batch(exporter, &jobs).await?;

    let mut bundle = AssetBundle::new(format!("{}-android", page));
    for (drawable, bytes) in drawables.into_iter().zip(payloads) {
        let svg = String::from_utf8(bytes).map_err(|_| AssetError::InvalidSvg {
            node: scene.node(drawable.node).name.clone(),
        })?;
        let xml = convert(&svg, &drawable.options)?;
        bundle.insert(drawable.path, Content::Text(xml))?;
    }
    Ok(Outcome::Completed(bundle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetport_core::SceneNode;

    const SVG: &str = r#"<svg viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#;

    fn add_icon(scene: &mut Scene, parent: NodeId, name: &str, layers: &[&str]) -> NodeId {
        let icon = scene.add_child(parent, SceneNode::new(ICON_LAYER, NodeKind::Instance));
        scene.add_child(icon, SceneNode::text(NAME_LAYER, name));
        let group = scene.add_child(icon, SceneNode::new(GROUP_LAYER, NodeKind::Frame));
        for layer in layers {
            scene.add_child(
                group,
                SceneNode::new(*layer, NodeKind::Vector)
                    .with_size(24.0, 24.0)
                    .with_svg(SVG)
                    .with_pdf(layer.as_bytes().to_vec()),
            );
        }
        icon
    }

    fn icon_page(layers: &[&str]) -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let page = scene.add_root(SceneNode::new("App", NodeKind::Page));
        let frame = scene.add_child(page, SceneNode::new("Icons", NodeKind::Frame));
        add_icon(&mut scene, frame, "arrow", layers);
        (scene, page)
    }

    #[test]
    fn test_variant_order_and_roles() {
        let (scene, page) = icon_page(&["$ru-light", "$rtl-light", "$dark", "notes", "$light"]);
        let frame = find_icons_frame(&scene, page, &ExportOptions::new()).unwrap();
        let groups = collect_icon_groups(&scene, frame, &ExportOptions::new()).unwrap();
        let roles: Vec<&Role> = groups[0].variants.iter().map(|v| &v.role).collect();
        assert_eq!(
            roles,
            vec![
                &Role::Light,
                &Role::Dark,
                &Role::RtlLight,
                &Role::Localized {
                    locale: "ru".into(),
                    theme: Theme::Light
                },
            ]
        );
        assert!(groups[0].has_rtl());
        assert!(!groups[0].has_rtl_for(Theme::Dark));
    }

    #[test]
    fn test_hidden_and_duplicate_layers() {
        let mut scene = Scene::new();
        let page = scene.add_root(SceneNode::new("App", NodeKind::Page));
        let frame = scene.add_child(page, SceneNode::new("Icons", NodeKind::Frame));
        let icon = add_icon(&mut scene, frame, "star", &["$light"]);
        let group = scene.find_one(icon, |n| n.name == GROUP_LAYER).unwrap();
        scene.add_child(group, SceneNode::new("$rtl-light", NodeKind::Vector).hidden());
        scene.add_child(group, SceneNode::new("$light", NodeKind::Vector));

        let groups = collect_icon_groups(&scene, frame, &ExportOptions::new()).unwrap();
        assert_eq!(groups[0].variants.len(), 1);
        assert!(!groups[0].has_rtl());
        assert_eq!(scene.node(groups[0].variants[0].node).payload.pdf.as_deref(), Some(&b"$light"[..]));
    }

    #[test]
    fn test_missing_group_is_validation_error() {
        let mut scene = Scene::new();
        let page = scene.add_root(SceneNode::new("App", NodeKind::Page));
        let frame = scene.add_child(page, SceneNode::new("Icons", NodeKind::Frame));
        let icon = scene.add_child(frame, SceneNode::new(ICON_LAYER, NodeKind::Instance));
        scene.add_child(icon, SceneNode::text(NAME_LAYER, "lonely"));

        let err = collect_icon_groups(&scene, frame, &ExportOptions::new()).unwrap_err();
        assert!(matches!(err, AssetError::MissingChild { ref child, .. } if child == GROUP_LAYER));
    }

    #[test]
    fn test_xcode_manifest_directions() {
        let (scene, page) = icon_page(&["$light", "$dark", "$rtl-light"]);
        let options = ExportOptions::new().with_json_style(assetport_manifest::JsonStyle::Standard);
        let outcome =
            pollster::block_on(export_icons_xcode(&scene, &scene, &ExportTarget::new(page), &options)).unwrap();
        let Outcome::Completed(bundle) = outcome else {
            panic!("expected a bundle");
        };
        let manifest = bundle
            .get("App/Icons/arrow.imageset/Contents.json")
            .and_then(Content::as_text)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(manifest).unwrap();
        let images = value["images"].as_array().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0]["filename"], "arrow-light.pdf");
        assert_eq!(images[0]["language-direction"], "left-to-right");
        assert_eq!(images[1]["language-direction"], "left-to-right");
        assert_eq!(images[1]["appearances"][0]["value"], "dark");
        assert_eq!(images[2]["filename"], "arrow-rtl-light.pdf");
        assert_eq!(images[2]["language-direction"], "right-to-left");
        assert_eq!(
            bundle.get("App/Icons/arrow.imageset/arrow-dark.pdf").map(Content::as_bytes),
            Some(&b"$dark"[..])
        );
    }

    #[test]
    fn test_android_drawables() {
        let (scene, page) = icon_page(&["$light", "$dark", "$rtl-light", "$fr-dark"]);
        let outcome = pollster::block_on(export_icons_android(
            &scene,
            &scene,
            &ExportTarget::new(page),
            &ExportOptions::new(),
        ))
        .unwrap();
        let Outcome::Completed(bundle) = outcome else {
            panic!("expected a bundle");
        };
        assert_eq!(bundle.output_name(), "App-android");
        let paths: Vec<&str> = bundle.paths().collect();
        assert_eq!(
            paths,
            vec![
                "res/drawable/arrow.xml",
                "res/drawable-night/arrow.xml",
                "res/drawable-fr-night/arrow.xml",
            ]
        );
        let light = bundle.get("res/drawable/arrow.xml").and_then(Content::as_text).unwrap();
        let dark = bundle.get("res/drawable-night/arrow.xml").and_then(Content::as_text).unwrap();
        assert!(light.contains(r#"android:autoMirrored="true""#));
        assert!(!dark.contains("autoMirrored"));
    }

    #[test]
    fn test_android_without_icons() {
        let mut scene = Scene::new();
        let page = scene.add_root(SceneNode::new("App", NodeKind::Page));
        scene.add_child(page, SceneNode::new("Icons", NodeKind::Frame));
        let outcome = pollster::block_on(export_icons_android(
            &scene,
            &scene,
            &ExportTarget::new(page),
            &ExportOptions::new(),
        ))
        .unwrap();
        assert_eq!(outcome, Outcome::NothingToExport(NO_ICONS.to_string()));
    }
}
