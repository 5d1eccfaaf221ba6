use crate::html;
use crate::{Error, RENDER_ERROR_PLACEHOLDER, Result};
use mapmark_core::validate::{self, ValidateFn};
use mapmark_core::{MarkerKind, MarkerStyle};
use serde_json::Value;
use std::collections::HashMap;

/// Renders unvalidated JSON for one kind. Layouts receive the registry to render their entries.
pub type RenderFn = fn(registry: &StyleRegistry, data: &Value) -> Result<String>;

#[derive(Debug, Clone, Copy)]
pub struct StyleEntry {
    pub render: RenderFn,
    pub validate: ValidateFn,
}

/// Maps a marker kind to its renderer and validator.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    entries: HashMap<MarkerKind, StyleEntry>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: MarkerKind, entry: StyleEntry) {
        self.entries.insert(kind, entry);
    }

    pub fn get(&self, kind: MarkerKind) -> Option<StyleEntry> {
        self.entries.get(&kind).copied()
    }

    /// Label, icon and layout.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        reg.insert(
            MarkerKind::Label,
            StyleEntry {
                render: render_label_value,
                validate: validate::validate_label,
            },
        );
        reg.insert(
            MarkerKind::Icon,
            StyleEntry {
                render: render_icon_value,
                validate: validate::validate_icon,
            },
        );
        reg.insert(
            MarkerKind::Layout,
            StyleEntry {
                render: render_layout_entry,
                validate: validate::validate_layout,
            },
        );
        reg
    }

    fn entry_for(&self, kind: &str) -> Result<StyleEntry> {
        let unsupported = || Error::UnsupportedKind {
            kind: kind.to_string(),
        };
        let kind: MarkerKind = kind.parse().map_err(|_| unsupported())?;
        self.get(kind).ok_or_else(unsupported)
    }

    pub fn try_render(&self, kind: &str, data: &Value) -> Result<String> {
        let entry = self.entry_for(kind)?;
        (entry.render)(self, data)
    }

    /// Renders `(kind, data)`; anything unrenderable becomes [`RENDER_ERROR_PLACEHOLDER`].
    pub fn render(&self, kind: &str, data: &Value) -> String {
        match self.try_render(kind, data) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::warn!(kind, error = %err, "marker render failed");
                RENDER_ERROR_PLACEHOLDER.to_string()
            }
        }
    }

    /// Renders a typed style through this registry's entry for its kind.
    pub fn render_style(&self, style: &MarkerStyle) -> String {
        self.render(style.kind().as_str(), &style.data_value())
    }

    pub fn validate(&self, kind: &str, data: &Value) -> bool {
        self.entry_for(kind)
            .map(|entry| (entry.validate)(data))
            .unwrap_or(false)
    }

    /// Reads `(kind, data)` back from markup produced by this registry.
    pub fn decode(&self, markup: &str) -> Option<(MarkerKind, Value)> {
        let (kind, data) = crate::codec::decode(markup)?;
        self.get(kind).is_some().then_some((kind, data))
    }
}

fn render_label_value(_registry: &StyleRegistry, data: &Value) -> Result<String> {
    html::render_style(&validate::parse_data(MarkerKind::Label, data)?)
}

fn render_icon_value(_registry: &StyleRegistry, data: &Value) -> Result<String> {
    html::render_style(&validate::parse_data(MarkerKind::Icon, data)?)
}

fn render_layout_entry(registry: &StyleRegistry, data: &Value) -> Result<String> {
    match validate::parse_data(MarkerKind::Layout, data) {
        Ok(style) => html::render_style(&style),
        Err(err) => {
            tracing::debug!(error = %err, "layout entries failed validation; rendering one by one");
            html::render_layout_value(registry, data)
        }
    }
}
