#![forbid(unsafe_code)]

//! HTML rendering for map markers.
//!
//! Every renderer is a pure function of its input: the same style always produces the same
//! markup, so previews can be recomputed on each keystroke.

pub mod codec;
pub mod html;
mod json;
pub mod registry;

use mapmark_core::{MarkerKind, MarkerStyle};

pub use codec::{decode, decode_style, encode};
pub use registry::{RenderFn, StyleEntry, StyleRegistry};

/// Substituted for any marker that cannot be rendered.
pub const RENDER_ERROR_PLACEHOLDER: &str = "error rendering marker";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported marker kind for rendering: {kind}")]
    UnsupportedKind { kind: String },
    #[error("invalid {kind} style: {message}")]
    InvalidStyle { kind: MarkerKind, message: String },
    #[error("style JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(mapmark_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<mapmark_core::Error> for Error {
    fn from(err: mapmark_core::Error) -> Self {
        match err {
            mapmark_core::Error::UnknownKind { kind } => Error::UnsupportedKind { kind },
            mapmark_core::Error::InvalidStyle { kind, message } => {
                Error::InvalidStyle { kind, message }
            }
            other => Error::Model(other),
        }
    }
}

/// Renders a typed style; failures collapse into [`RENDER_ERROR_PLACEHOLDER`].
///
/// Styles that do not validate render as the placeholder too, so markup from here always
/// decodes back.
pub fn render_style(style: &MarkerStyle) -> String {
    let rendered = mapmark_core::validate::check_style(style)
        .map_err(Error::from)
        .and_then(|()| html::render_style(style));
    match rendered {
        Ok(markup) => markup,
        Err(err) => {
            tracing::warn!(kind = %style.kind(), error = %err, "marker render failed");
            RENDER_ERROR_PLACEHOLDER.to_string()
        }
    }
}
