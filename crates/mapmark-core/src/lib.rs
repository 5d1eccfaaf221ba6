#![forbid(unsafe_code)]

//! Marker model for the map-annotation editor (headless).
//!
//! - [`model`]: typed marker styles (label, icon, layout) and placed markers
//! - [`validate`]: per-kind structural validators for externally sourced data
//! - [`collection`]: the ordered set of markers on the map
//! - [`merge`]: drag-end intersection detection and layout merging
//! - [`export`]: the clipboard JSON document, both directions

pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod geom;
pub mod map;
pub mod merge;
pub mod model;
pub mod validate;

pub use collection::MarkerCollection;
pub use config::EditorConfig;
pub use error::{Error, Result};
pub use export::{ExportDocument, ExportMarker, ImportOptions, MapView, export_json, import_json};
pub use map::MapEngine;
pub use merge::{MergePolicy, MergeProposal, MergeSettings};
pub use model::{
    Color, Direction, IconName, IconShape, IconStyle, ItemId, LabelShape, LabelStyle, LatLng,
    LayoutItem, LayoutStyle, MarkerId, MarkerKind, MarkerStyle, PlacedMarker,
};
pub use validate::validate;

#[cfg(test)]
mod tests;
