//! Core types for assetport.
//!
//! This crate provides the foundation used across the other assetport crates:
//! - A read-only scene snapshot and the host export capability
//! - Layer-name conventions (variant dots, role tags, folder markers)
//! - Color and paint types
//! - Error types

pub mod errors;
pub mod naming;
pub mod scene;
pub mod types;

pub use errors::*;
pub use naming::{
    folder_path, parse_role, resource_name, split_qualifier, LeafName, Role, VariantKey,
    FOLDER_MARKER,
};
pub use scene::{ExportPayload, NodeExporter, NodeId, NodeSnapshot, Scene, SceneNode};
pub use types::*;
