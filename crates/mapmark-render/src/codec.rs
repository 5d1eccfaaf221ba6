//! Markup codec.
//!
//! Rendered markers carry their own model inline: `data-type` holds the kind tag and
//! `data-style` the JSON payload. [`decode`] reads that pair back from markup alone. The typed
//! [`MarkerStyle`] held by the collection stays authoritative; decoding exists for markup that
//! outlives its model (copied previews, markup pasted back into the editor).

use mapmark_core::validate;
use mapmark_core::{MarkerKind, MarkerStyle};
use serde_json::Value;

pub const KIND_ATTR: &str = "data-type";
pub const STYLE_ATTR: &str = "data-style";

/// Renders `style` with its kind and payload embedded.
pub fn encode(style: &MarkerStyle) -> String {
    crate::render_style(style)
}

/// Reads `(kind, data)` from the first element carrying a `data-type` attribute.
///
/// Malformed markup, a missing or unknown tag, or a payload that is not JSON all yield `None`.
pub fn decode(markup: &str) -> Option<(MarkerKind, Value)> {
    let doc = match roxmltree::Document::parse(markup) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::debug!(error = %err, "marker markup is not well formed");
            return None;
        }
    };
    let node = doc
        .descendants()
        .find(|n| n.is_element() && n.has_attribute(KIND_ATTR))?;

    let kind: MarkerKind = match node.attribute(KIND_ATTR)?.parse() {
        Ok(kind) => kind,
        Err(err) => {
            tracing::debug!(error = %err, "marker markup has a foreign kind tag");
            return None;
        }
    };
    let data = match serde_json::from_str(node.attribute(STYLE_ATTR)?) {
        Ok(data) => data,
        Err(err) => {
            tracing::debug!(%kind, error = %err, "marker markup carries invalid style JSON");
            return None;
        }
    };
    Some((kind, data))
}

/// [`decode`] followed by validation for the decoded kind.
pub fn decode_style(markup: &str) -> Option<MarkerStyle> {
    let (kind, data) = decode(markup)?;
    match validate::parse_data(kind, &data) {
        Ok(style) => Some(style),
        Err(err) => {
            tracing::debug!(%kind, error = %err, "decoded style failed validation");
            None
        }
    }
}
