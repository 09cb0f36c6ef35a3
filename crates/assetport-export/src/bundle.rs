//! Output bundle handed to the packaging layer.

use assetport_core::{AssetError, Result};
use assetport_manifest::ManifestEntry;
use indexmap::{IndexMap, IndexSet};

/// Payload of one bundle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }
}

/// Ordered set of `{path, content}` entries with unique paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBundle {
    output_name: String,
    entries: IndexMap<String, Content>,
}

impl AssetBundle {
    /// Create an empty bundle; `output_name` names the archive.
    pub fn new(output_name: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Add an entry. Paths are POSIX-style and relative to the bundle root.
    pub fn insert(&mut self, path: impl Into<String>, content: Content) -> Result<()> {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return Err(AssetError::DuplicatePath { path });
        }
        self.entries.insert(path, content);
        Ok(())
    }

    /// Add a generated manifest as a text entry.
    pub fn push_manifest(&mut self, manifest: ManifestEntry) -> Result<()> {
        self.insert(manifest.path, Content::Text(manifest.data))
    }

    pub fn get(&self, path: &str) -> Option<&Content> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Content)> {
        self.entries.iter().map(|(path, content)| (path.as_str(), content))
    }
}

/// Fail on the first path that occurs twice.
pub fn ensure_unique_paths<I, S>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = IndexSet::new();
    for path in paths {
        let path = path.into();
        if !seen.insert(path.clone()) {
            return Err(AssetError::DuplicatePath { path });
        }
    }
    Ok(())
}
