//! Per-kind HTML templates.
//!
//! Each marker renders as a single root `<div>` carrying two attributes besides its visual
//! styling: `data-type` (the kind tag) and `data-style` (the JSON payload). See [`crate::codec`].

mod icon;
mod label;
mod layout;

pub use icon::{duration_css, render_icon};
pub use label::render_label;
pub use layout::{render_layout, render_layout_preview, render_layout_value};

use crate::Result;
use mapmark_core::{MarkerKind, MarkerStyle};
use serde::Serialize;
use std::fmt::Write as _;

pub fn render_style(style: &MarkerStyle) -> Result<String> {
    match style {
        MarkerStyle::Label(data) => render_label(data),
        MarkerStyle::Icon(data) => render_icon(data),
        MarkerStyle::Layout(data) => render_layout(data),
    }
}

/// Accumulates CSS declarations for an inline `style` attribute (`a:b;c:d`).
#[derive(Debug, Default)]
pub(crate) struct InlineStyle(String);

impl InlineStyle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, property: &str, value: impl std::fmt::Display) -> &mut Self {
        if !self.0.is_empty() {
            self.0.push(';');
        }
        let _ = write!(&mut self.0, "{property}:{value}");
        self
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Writes the opening tag shared by every marker root.
pub(crate) fn open_marker<T: Serialize>(
    out: &mut String,
    kind: MarkerKind,
    data: &T,
    style: &InlineStyle,
    class: Option<&str>,
) -> Result<()> {
    let data_json = serde_json::to_string(data)?;
    open_marker_raw(out, kind, &data_json, style, class);
    Ok(())
}

pub(crate) fn open_marker_raw(
    out: &mut String,
    kind: MarkerKind,
    data_json: &str,
    style: &InlineStyle,
    class: Option<&str>,
) {
    let _ = write!(
        out,
        r#"<div data-type="{}" data-style="{}" style="{}""#,
        kind.as_str(),
        escape_xml(data_json),
        escape_xml(style.as_str()),
    );
    if let Some(class) = class {
        let _ = write!(out, r#" class="{}""#, escape_xml(class));
    }
    out.push('>');
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// Compact CSS number: at most three decimals, no trailing zeros, never `-0`.
pub(crate) fn fmt_number(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0;
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}
