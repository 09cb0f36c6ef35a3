//! Export orchestration for assetport.
//!
//! Each command reads the scene snapshot, derives the output paths and
//! manifests, fetches node payloads from the host in one concurrent batch
//! and returns an [`AssetBundle`]. Nothing is written to disk here; the
//! caller packages the bundle.
//!
//! ```ignore
//! let scene = Scene::from_json(&snapshot)?;
//! let target = ExportTarget::first_page(&scene).expect("a page");
//! let result = pollster::block_on(run(
//!     Command::ExportIconsToXcode,
//!     &scene,
//!     &scene,
//!     &target,
//!     &ExportOptions::default(),
//! ));
//! println!("{}", closing_message(&result));
//! ```

pub mod batch;
pub mod bundle;
pub mod colors;
pub mod frames;
pub mod icons;
pub mod options;

use std::fmt;
use std::str::FromStr;

use assetport_core::{AssetError, NodeExporter, NodeId, NodeKind, Result, Scene};

pub use batch::{export_batch, ExportJob};
pub use bundle::{AssetBundle, Content};
pub use colors::{collect_swatches, export_colors_android, export_colors_xcode, ColorSwatch};
pub use frames::{collect_frame_assets, export_frames, image_set_manifests, AssetEntry};
pub use icons::{
    collect_icon_groups, export_icons_android, export_icons_xcode, find_icons_frame, IconGroup,
    IconVariant,
};
pub use options::ExportOptions;

/// Closing message of a successful run.
pub const SUCCESS_MESSAGE: &str = "Successfully completed. Click Save to get the result.";
/// Closing message when the host export capability fails.
pub const EXPORT_FAILED_MESSAGE: &str = "Error exporting layers.";

/// An export command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ExportToXcode,
    ExportColorsToXcode,
    ExportColorsToAndroid,
    ExportIconsToXcode,
    ExportIconsToAndroid,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::ExportToXcode,
        Command::ExportColorsToXcode,
        Command::ExportColorsToAndroid,
        Command::ExportIconsToXcode,
        Command::ExportIconsToAndroid,
    ];

    /// Command identifier.
    pub fn id(self) -> &'static str {
        match self {
            Command::ExportToXcode => "export-to-xcode",
            Command::ExportColorsToXcode => "export-colors-to-xcode",
            Command::ExportColorsToAndroid => "export-colors-to-android",
            Command::ExportIconsToXcode => "export-icons-to-xcode",
            Command::ExportIconsToAndroid => "export-icons-to-android",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Command {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self> {
        Command::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| AssetError::UnknownCommand(s.to_string()))
    }
}

/// The page being exported and the current selection on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub page: NodeId,
    pub selection: Vec<NodeId>,
}

impl ExportTarget {
    pub fn new(page: NodeId) -> Self {
        Self {
            page,
            selection: Vec::new(),
        }
    }

    pub fn with_selection(mut self, selection: Vec<NodeId>) -> Self {
        self.selection = selection;
        self
    }

    /// Target the first page of a scene, searching roots depth-first.
    pub fn first_page(scene: &Scene) -> Option<Self> {
        scene.roots().iter().find_map(|&root| {
            if scene.node(root).kind == NodeKind::Page {
                Some(root)
            } else {
                scene.find_one(root, |node| node.kind == NodeKind::Page)
            }
        })
        .map(Self::new)
    }

    /// Name of the target page.
    pub fn page_name<'a>(&self, scene: &'a Scene) -> Result<&'a str> {
        match scene.get(self.page) {
            Some(node) if node.kind == NodeKind::Page => Ok(node.name.as_str()),
            _ => Err(AssetError::InvalidSelection {
                reason: "Please open a page to export.".to_string(),
            }),
        }
    }
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(AssetBundle),
    /// Nothing matched; carries the message for the user.
    NothingToExport(String),
}

impl Outcome {
    pub fn bundle(&self) -> Option<&AssetBundle> {
        match self {
            Outcome::Completed(bundle) => Some(bundle),
            Outcome::NothingToExport(_) => None,
        }
    }
}

/// Run one export command.
#[tracing::instrument(skip(scene, exporter, target, options))]
pub async fn run<E: NodeExporter>(
    command: Command,
    scene: &Scene,
    exporter: &E,
    target: &ExportTarget,
    options: &ExportOptions,
) -> Result<Outcome> {
    let result = match command {
        Command::ExportToXcode => export_frames(scene, exporter, target, options).await,
        Command::ExportColorsToXcode => export_colors_xcode(scene, target, options),
        Command::ExportColorsToAndroid => export_colors_android(scene, target, options),
        Command::ExportIconsToXcode => export_icons_xcode(scene, exporter, target, options).await,
        Command::ExportIconsToAndroid => export_icons_android(scene, exporter, target, options).await,
    };

    match &result {
        Ok(Outcome::Completed(bundle)) => {
            tracing::info!(entries = bundle.len(), output = bundle.output_name(), "export completed")
        }
        Ok(Outcome::NothingToExport(message)) => tracing::info!(%message, "nothing to export"),
        Err(err) if err.is_validation() => tracing::warn!(error = %err, "export rejected"),
        Err(err) => tracing::error!(error = %err, "export failed"),
    }
    result
}

/// The single message shown to the user when a run ends.
pub fn closing_message(result: &Result<Outcome>) -> String {
    match result {
        Ok(Outcome::Completed(_)) => SUCCESS_MESSAGE.to_string(),
        Ok(Outcome::NothingToExport(message)) => message.clone(),
        Err(err) if err.is_validation() => err.to_string(),
        Err(_) => EXPORT_FAILED_MESSAGE.to_string(),
    }
}
