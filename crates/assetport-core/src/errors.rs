//! Error types for assetport.

use crate::types::ExportFormat;
use thiserror::Error;

/// Result type for export runs.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Top-level error for an export run.
///
/// Every variant aborts the whole run; no partial bundle is delivered.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The current selection cannot be exported by the requested command.
    #[error("{reason}")]
    InvalidSelection { reason: String },

    /// A node required by a naming convention is missing.
    #[error("'{parent}' has no '{child}' layer")]
    MissingChild { parent: String, child: String },

    /// A swatch layer carries no solid fill.
    #[error("'{node}' has no solid fill")]
    MissingFill { node: String },

    /// Two or more assets resolve to the same name.
    #[error("Duplicate color names: {}", .names.join(", "))]
    DuplicateNames { names: Vec<String> },

    /// Two bundle entries resolve to the same path.
    #[error("Duplicate output path: {path}")]
    DuplicatePath { path: String },

    /// The host export capability rejected a node.
    #[error("Failed to export '{node}' as {format}: {reason}")]
    Export {
        node: String,
        format: ExportFormat,
        reason: String,
    },

    /// An SVG export was not valid UTF-8 text.
    #[error("SVG export of '{node}' is not valid UTF-8")]
    InvalidSvg { node: String },

    /// Unknown command identifier.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Scene snapshot or options could not be decoded.
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl AssetError {
    /// Create an export failure for a node.
    pub fn export(node: impl Into<String>, format: ExportFormat, reason: impl Into<String>) -> Self {
        Self::Export {
            node: node.into(),
            format,
            reason: reason.into(),
        }
    }

    /// Create a missing-child validation error.
    pub fn missing_child(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::MissingChild {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// Validation errors describe the document; everything else is a failure
    /// of the export machinery.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection { .. }
                | Self::MissingChild { .. }
                | Self::MissingFill { .. }
                | Self::DuplicateNames { .. }
                | Self::DuplicatePath { .. }
                | Self::UnknownCommand(_)
        )
    }
}

/// Errors while serializing manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors while converting SVG to VectorDrawable.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid viewBox '{value}': expected four numbers")]
    InvalidViewBox { value: String },

    #[error("invalid dimension {name}: {value}")]
    InvalidDimension { name: &'static str, value: f64 },
}
