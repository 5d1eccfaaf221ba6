//! Structural validators, one per marker kind.
//!
//! Externally sourced data (decoded markup, imported documents, nested layout entries) is only
//! trusted after it passes the validator for its kind.

use crate::model::{
    DURATION_MAX, Direction, IconStyle, LabelStyle, LayoutItem, LayoutStyle, MarkerKind,
    MarkerStyle, SCALE_MAX,
};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

pub type ValidateFn = fn(data: &Value) -> bool;

/// Returns `true` when `data` is a well-formed payload for `kind`.
pub fn validate(kind: MarkerKind, data: &Value) -> bool {
    parse_data(kind, data).is_ok()
}

pub fn validate_label(data: &Value) -> bool {
    validate(MarkerKind::Label, data)
}

pub fn validate_icon(data: &Value) -> bool {
    validate(MarkerKind::Icon, data)
}

pub fn validate_layout(data: &Value) -> bool {
    validate(MarkerKind::Layout, data)
}

/// Parses and range-checks `data` as a payload of `kind`.
pub fn parse_data(kind: MarkerKind, data: &Value) -> Result<MarkerStyle> {
    let style = match kind {
        MarkerKind::Label => {
            MarkerStyle::Label(LabelStyle::deserialize(data).map_err(|e| invalid(kind, e))?)
        }
        MarkerKind::Icon => {
            MarkerStyle::Icon(IconStyle::deserialize(data).map_err(|e| invalid(kind, e))?)
        }
        MarkerKind::Layout => {
            MarkerStyle::Layout(LayoutStyle::deserialize(data).map_err(|e| invalid(kind, e))?)
        }
    };
    check_style(&style)?;
    Ok(style)
}

/// Same as [`parse_data`] for a kind tag given as text.
pub fn parse_tagged(kind: &str, data: &Value) -> Result<MarkerStyle> {
    parse_data(kind.parse()?, data)
}

/// Range checks that the serde shape alone cannot express. Recurses into layout entries.
pub fn check_style(style: &MarkerStyle) -> Result<()> {
    match style {
        MarkerStyle::Label(label) => {
            check_markup_text(MarkerKind::Label, "color", label.color.as_str())?;
            check_markup_text(MarkerKind::Label, "text", &label.text)?;
            check_scale(MarkerKind::Label, label.scale)
        }
        MarkerStyle::Icon(icon) => {
            check_markup_text(MarkerKind::Icon, "color", icon.color.as_str())?;
            check_markup_text(MarkerKind::Icon, "stroke", icon.stroke.as_str())?;
            check_scale(MarkerKind::Icon, icon.scale)?;
            if icon.duration > DURATION_MAX {
                return Err(Error::InvalidStyle {
                    kind: MarkerKind::Icon,
                    message: format!("duration {} is outside 0..={DURATION_MAX}", icon.duration),
                });
            }
            if icon.rotation >= 360 {
                return Err(Error::InvalidStyle {
                    kind: MarkerKind::Icon,
                    message: format!("rotation {} is outside 0..360", icon.rotation),
                });
            }
            Ok(())
        }
        MarkerStyle::Layout(layout) => {
            check_gap(layout.gap)?;
            for item in &layout.items {
                check_style(&item.style)?;
            }
            Ok(())
        }
    }
}

fn check_gap(gap: f64) -> Result<()> {
    if gap.is_finite() && gap >= 0.0 {
        return Ok(());
    }
    Err(Error::InvalidStyle {
        kind: MarkerKind::Layout,
        message: format!("gap {gap} must be a non-negative number"),
    })
}

/// Characters allowed in XML 1.0 documents. Text fields end up in rendered markup, so anything
/// else would make that markup unreadable.
pub fn is_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn check_markup_text(kind: MarkerKind, field: &str, value: &str) -> Result<()> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        None => Ok(()),
        Some(c) => Err(Error::InvalidStyle {
            kind,
            message: format!("{field} contains U+{:04X}, which markup cannot carry", c as u32),
        }),
    }
}

fn check_scale(kind: MarkerKind, scale: f64) -> Result<()> {
    if scale.is_finite() && (0.0..=SCALE_MAX).contains(&scale) {
        return Ok(());
    }
    Err(Error::InvalidStyle {
        kind,
        message: format!("scale {scale} is outside 0..={SCALE_MAX}"),
    })
}

fn invalid(kind: MarkerKind, err: serde_json::Error) -> Error {
    Error::InvalidStyle {
        kind,
        message: err.to_string(),
    }
}

/// Loads `data` as `kind`, substituting the kind default when it does not validate.
///
/// A layout whose container is well formed keeps its container fields and every valid entry; only
/// the broken entries are replaced by their kind default, and entries of unknown kind are dropped.
pub fn parse_or_default(kind: MarkerKind, data: &Value) -> MarkerStyle {
    let err = match parse_data(kind, data) {
        Ok(style) => return style,
        Err(err) => err,
    };
    if kind == MarkerKind::Layout {
        match recover_layout(data) {
            Ok(layout) => {
                tracing::debug!(error = %err, "recovered layout with defaulted entries");
                return MarkerStyle::Layout(layout);
            }
            Err(container_err) => {
                tracing::debug!(error = %container_err, "layout container is invalid");
            }
        }
    }
    tracing::debug!(%kind, error = %err, "falling back to default style");
    MarkerStyle::default_for(kind)
}

#[derive(Deserialize)]
struct LayoutContainer {
    direction: Direction,
    gap: f64,
    items: Vec<Value>,
}

fn recover_layout(data: &Value) -> Result<LayoutStyle> {
    let container =
        LayoutContainer::deserialize(data).map_err(|e| invalid(MarkerKind::Layout, e))?;
    check_gap(container.gap)?;

    let mut items = Vec::with_capacity(container.items.len());
    for (idx, entry) in container.items.iter().enumerate() {
        let tag = entry.get("type").and_then(Value::as_str).unwrap_or_default();
        let Ok(kind) = tag.parse::<MarkerKind>() else {
            tracing::debug!(idx, kind = tag, "dropping layout entry of unknown kind");
            continue;
        };
        let entry_data = entry.get("data").unwrap_or(&Value::Null);
        items.push(LayoutItem::new(parse_or_default(kind, entry_data)));
    }
    Ok(LayoutStyle {
        direction: container.direction,
        gap: container.gap,
        items,
    })
}
