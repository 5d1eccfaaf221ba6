use super::{InlineStyle, fmt_number, open_marker, open_marker_raw};
use crate::json::from_value_ref;
use crate::registry::StyleRegistry;
use crate::{Error, Result};
use mapmark_core::{Direction, LayoutStyle, MarkerKind};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Write as _;

fn container_style(direction: Direction, gap: f64) -> InlineStyle {
    let mut style = InlineStyle::new();
    style
        .push("display", "flex")
        .push("flex-direction", direction.as_str())
        .push("align-items", "center")
        .push("justify-content", "center")
        .push("gap", format!("{}px", fmt_number(gap)));
    style
}

pub fn render_layout(data: &LayoutStyle) -> Result<String> {
    let mut out = String::new();
    open_marker(
        &mut out,
        MarkerKind::Layout,
        data,
        &container_style(data.direction, data.gap),
        None,
    )?;
    for item in &data.items {
        out.push_str("<div>");
        out.push_str(&crate::render_style(&item.style));
        out.push_str("</div>");
    }
    out.push_str("</div>");
    Ok(out)
}

/// Like [`render_layout`], but each entry wrapper carries `data-item="<id>"` so an editor can map
/// a click on the preview back to the entry it belongs to.
pub fn render_layout_preview(data: &LayoutStyle) -> Result<String> {
    let mut out = String::new();
    open_marker(
        &mut out,
        MarkerKind::Layout,
        data,
        &container_style(data.direction, data.gap),
        None,
    )?;
    for item in &data.items {
        let _ = write!(&mut out, r#"<div data-item="{}">"#, item.id);
        out.push_str(&crate::render_style(&item.style));
        out.push_str("</div>");
    }
    out.push_str("</div>");
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct RawLayout {
    direction: Direction,
    gap: f64,
    items: Vec<Value>,
}

/// Renders layout JSON whose entries have not been validated.
///
/// The container must be well formed; each entry is rendered on its own through `registry`, so
/// a broken entry becomes a placeholder without breaking its siblings.
pub fn render_layout_value(registry: &StyleRegistry, data: &Value) -> Result<String> {
    let raw: RawLayout = from_value_ref(data)?;
    if !raw.gap.is_finite() || raw.gap < 0.0 {
        return Err(Error::InvalidStyle {
            kind: MarkerKind::Layout,
            message: format!("gap {} must be a non-negative number", raw.gap),
        });
    }

    let mut out = String::new();
    open_marker_raw(
        &mut out,
        MarkerKind::Layout,
        &data.to_string(),
        &container_style(raw.direction, raw.gap),
        None,
    );
    for item in &raw.items {
        let kind = item.get("type").and_then(Value::as_str).unwrap_or_default();
        let item_data = item.get("data").unwrap_or(&Value::Null);
        out.push_str("<div>");
        out.push_str(&registry.render(kind, item_data));
        out.push_str("</div>");
    }
    out.push_str("</div>");
    Ok(out)
}
