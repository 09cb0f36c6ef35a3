//! SVG to Android VectorDrawable conversion.
//!
//! A pure string-to-string transform over the restricted SVG a design tool
//! exports for one layer:
//!
//! ```ignore
//! use assetport_vector::{convert, VectorOptions};
//!
//! let xml = convert(&svg, &VectorOptions::new(24.0, 24.0).mirrored(true))?;
//! ```

pub mod convert;
pub mod viewbox;

pub use convert::{convert, extract_paths, find_viewbox, PathElement, VectorOptions};
pub use viewbox::ViewBox;
