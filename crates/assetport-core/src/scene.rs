//! Read-only scene snapshot.
//!
//! The design document is captured as an arena of nodes addressed by
//! [`NodeId`]. Exporters only ever read the snapshot; the single capability
//! that reaches back into the host is [`NodeExporter`].

use serde::{Deserialize, Serialize};

use crate::errors::{AssetError, Result};
use crate::types::{ExportFormat, NodeKind, Paint};

/// Index of a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// A node in the scene snapshot.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Author-assigned layer name.
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// Child node ids in layer order.
    pub children: Vec<NodeId>,
    pub visible: bool,
    pub fills: Vec<Paint>,
    /// Text content of TEXT nodes.
    pub characters: Option<String>,
    pub width: f64,
    pub height: f64,
    /// Recorded export output, used when the snapshot replays exports.
    pub payload: ExportPayload,
}

/// Recorded export output of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

impl SceneNode {
    /// Create a visible node with no fills.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            visible: true,
            fills: Vec::new(),
            characters: None,
            width: 0.0,
            height: 0.0,
            payload: ExportPayload::default(),
        }
    }

    /// Create a TEXT node with content.
    pub fn text(name: impl Into<String>, characters: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Text).with_characters(characters)
    }

    pub fn with_characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_svg(mut self, svg: impl Into<String>) -> Self {
        self.payload.svg = Some(svg.into());
        self
    }

    pub fn with_pdf(mut self, pdf: impl Into<Vec<u8>>) -> Self {
        self.payload.pdf = Some(pdf.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Whether this node carries a child list: it has children, or its
    /// kind is one that can hold them.
    pub fn is_container(&self) -> bool {
        !self.children.is_empty() || self.kind.is_container()
    }
}

/// A nested node description, as dumped by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(flatten)]
    pub payload: ExportPayload,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

fn default_visible() -> bool {
    true
}

/// Arena of scene nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a nested snapshot.
    pub fn from_snapshot(root: NodeSnapshot) -> Self {
        let mut scene = Self::new();
        scene.insert_snapshot(None, root);
        scene
    }

    /// Decode a nested JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: NodeSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(root))
    }

    fn insert_snapshot(&mut self, parent: Option<NodeId>, snapshot: NodeSnapshot) -> NodeId {
        let NodeSnapshot {
            name,
            kind,
            visible,
            fills,
            characters,
            width,
            height,
            payload,
            children,
        } = snapshot;
        let node = SceneNode {
            name,
            kind,
            parent: None,
            children: Vec::new(),
            visible,
            fills,
            characters,
            width,
            height,
            payload,
        };
        let id = match parent {
            Some(parent) => self.add_child(parent, node),
            None => self.add_root(node),
        };
        for child in children {
            self.insert_snapshot(Some(id), child);
        }
        id
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root node ids.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Add a root node and return its id.
    pub fn add_root(&mut self, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = None;
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    /// Add a child node to a parent and return its id.
    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Get a node by id. Ids handed out by this scene are always valid.
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    /// Children of a container node, `None` for leaves.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        let node = self.node(id);
        node.is_container().then_some(node.children.as_slice())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.parent(id),
        }
    }

    /// Descendants in depth-first pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = self.node(id).children.iter().rev().copied().collect();
        Descendants { scene: self, stack }
    }

    /// All descendants matching a predicate.
    pub fn find_all<F>(&self, id: NodeId, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&SceneNode) -> bool,
    {
        self.descendants(id)
            .filter(|&d| predicate(self.node(d)))
            .collect()
    }

    /// First descendant matching a predicate.
    pub fn find_one<F>(&self, id: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(&SceneNode) -> bool,
    {
        self.descendants(id).find(|&d| predicate(self.node(d)))
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.scene.parent(current);
        Some(current)
    }
}

/// Depth-first iterator over the descendants of a node.
pub struct Descendants<'a> {
    scene: &'a Scene,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Push children in reverse order so they're visited in layer order
        for &child in self.scene.node(id).children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// The host's export capability.
///
/// Calls for distinct nodes are independent and may be awaited concurrently.
#[allow(async_fn_in_trait)]
pub trait NodeExporter {
    /// Export a node as encoded bytes in the requested format.
    async fn export(&self, node: NodeId, format: ExportFormat) -> Result<Vec<u8>>;
}

impl NodeExporter for Scene {
    async fn export(&self, node: NodeId, format: ExportFormat) -> Result<Vec<u8>> {
        let scene_node = self
            .get(node)
            .ok_or_else(|| AssetError::export(format!("#{}", node.0), format, "unknown node"))?;
        let payload = match format {
            ExportFormat::Pdf => scene_node.payload.pdf.clone(),
            ExportFormat::Svg => scene_node.payload.svg.clone().map(String::into_bytes),
        };
        payload.ok_or_else(|| {
            AssetError::export(&scene_node.name, format, "no recorded export in snapshot")
        })
    }
}
