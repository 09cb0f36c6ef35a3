//! Frame export to an Xcode asset catalog.
//!
//! The selected frame becomes the catalog root. Every container below it
//! that is not an instance becomes a path segment; every leaf becomes one
//! PDF inside an image set named after the leaf.

use assetport_core::{
    split_qualifier, AssetError, NodeExporter, NodeId, NodeKind, Result, Scene, Theme,
};
use assetport_manifest::{ImageEntry, ImageSetContents, JsonStyle, ManifestEntry};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::batch::{export_batch, ExportJob};
use crate::bundle::{ensure_unique_paths, AssetBundle, Content};
use crate::options::ExportOptions;
use crate::{ExportTarget, Outcome};

/// Suffix of the catalog root directory.
pub const CATALOG_SUFFIX: &str = ".xcassets";

pub(crate) const SELECT_FRAME: &str = "Please select a frame to export.";

/// Path segments from the bundle root to a file.
pub type PathComponents = SmallVec<[String; 6]>;

/// One exportable file of a frame export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub path_components: PathComponents,
    /// Every segment but the last, each followed by `/`.
    pub dir: String,
    /// The last segment.
    pub file: String,
    pub source: NodeId,
    /// Variant qualifier folded into the filename.
    pub qualifier: Option<String>,
}

impl AssetEntry {
    fn new(path_components: PathComponents, source: NodeId, qualifier: Option<String>) -> Self {
        let (file, dirs) = match path_components.split_last() {
            Some((file, dirs)) => (file.clone(), dirs),
            None => (String::new(), &[][..]),
        };
        let dir = dirs.iter().map(|segment| format!("{}/", segment)).collect();
        Self {
            path_components,
            dir,
            file,
            source,
            qualifier,
        }
    }

    /// Full path relative to the bundle root.
    pub fn path(&self) -> String {
        format!("{}{}", self.dir, self.file)
    }

    /// Theme implied by the qualifier; only `dark` changes the default.
    pub fn theme(&self) -> Theme {
        match self.qualifier.as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Walk a frame and derive one asset entry per leaf, in layer order.
pub fn collect_frame_assets(scene: &Scene, root: NodeId) -> Vec<AssetEntry> {
    let mut assets = Vec::new();
    visit(scene, root, &PathComponents::new(), &mut assets);
    assets
}

fn visit(scene: &Scene, id: NodeId, parents: &PathComponents, assets: &mut Vec<AssetEntry>) {
    let node = scene.node(id);

    if let Some(children) = scene.children(id) {
        if node.kind != NodeKind::Instance {
            let mut segments = parents.clone();
            segments.push(node.name.clone());
            for &child in children {
                visit(scene, child, &segments, assets);
            }
            return;
        }
    }

    let mut segments = parents.clone();
    if let Some(first) = segments.first_mut() {
        first.push_str(CATALOG_SUFFIX);
    }

    let leaf = split_qualifier(&node.name);
    match &leaf.qualifier {
        Some(qualifier) => {
            segments.push(format!("{}.imageset", leaf.base));
            segments.push(format!("{}-{}.pdf", leaf.base, qualifier));
        }
        None => {
            segments.push(format!("{}.imageset", node.name));
            segments.push(format!("{}.pdf", node.name));
        }
    }

    assets.push(AssetEntry::new(segments, id, leaf.qualifier));
}

/// One image-set `Contents.json` per distinct directory, in first-seen order.
pub fn image_set_manifests(assets: &[AssetEntry], style: JsonStyle) -> Result<Vec<ManifestEntry>> {
    let mut groups: IndexMap<&str, Vec<ImageEntry>> = IndexMap::new();
    for asset in assets {
        groups
            .entry(asset.dir.as_str())
            .or_default()
            .push(ImageEntry::universal(&asset.file).with_theme(asset.theme()));
    }

    let mut manifests = Vec::with_capacity(groups.len());
    for (dir, images) in groups {
        manifests.push(ManifestEntry::contents_json(
            dir,
            &ImageSetContents::new(images),
            style,
        )?);
    }
    Ok(manifests)
}

fn selected_frame(scene: &Scene, target: &ExportTarget) -> Result<NodeId> {
    match target.selection.first() {
        Some(&id) if scene.get(id).is_some_and(|node| node.kind == NodeKind::Frame) => Ok(id),
        _ => Err(AssetError::InvalidSelection {
            reason: SELECT_FRAME.to_string(),
        }),
    }
}

/// Export the selected frame as an asset catalog of PDFs.
#[tracing::instrument(skip_all, fields(command = "export-to-xcode"))]
pub async fn export_frames<E: NodeExporter>(
    scene: &Scene,
    exporter: &E,
    target: &ExportTarget,
    options: &ExportOptions,
) -> Result<Outcome> {
    let root = selected_frame(scene, target)?;
    let assets = collect_frame_assets(scene, root);
    if assets.is_empty() {
        return Ok(Outcome::NothingToExport(format!(
            "Nothing to export: frame \"{}\" has no layers.",
            scene.node(root).name
        )));
    }

    let manifests = image_set_manifests(&assets, options.json_style)?;
    ensure_unique_paths(
        manifests
            .iter()
            .map(|manifest| manifest.path.clone())
            .chain(assets.iter().map(AssetEntry::path)),
    )?;
    tracing::info!(assets = assets.len(), image_sets = manifests.len(), "exporting frame");

    let jobs: Vec<ExportJob> = assets.iter().map(|asset| ExportJob::pdf(asset.source)).collect();
    let payloads = export_batch(exporter, &jobs).await?;

    let mut bundle = AssetBundle::new(format!("{}{}", scene.node(root).name, CATALOG_SUFFIX));
    for manifest in manifests {
        bundle.push_manifest(manifest)?;
    }
    for (asset, bytes) in assets.iter().zip(payloads) {
        bundle.insert(asset.path(), Content::Binary(bytes))?;
    }
    Ok(Outcome::Completed(bundle))
}
