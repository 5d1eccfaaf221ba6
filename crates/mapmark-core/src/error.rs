use crate::model::{MarkerId, MarkerKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown marker kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Invalid {kind} style: {message}")]
    InvalidStyle { kind: MarkerKind, message: String },

    #[error("No marker with id {id}")]
    UnknownMarker { id: MarkerId },

    #[error("A marker with id {id} already exists")]
    DuplicateMarker { id: MarkerId },

    #[error("Marker {id} cannot be merged with itself")]
    MergeWithSelf { id: MarkerId },

    #[error("Invalid export document: {message}")]
    InvalidExport { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
