//! Per-kind style editors.
//!
//! Each editor owns the in-progress form state of one kind, recomputes its preview markup on
//! every change and hands the current style to an optional [`ChangeListener`].

mod icon;
mod label;
mod layout;

pub use icon::{IconEditor, IconPreset};
pub use label::{LabelEditor, LabelPreset};
pub use layout::LayoutEditor;

use mapmark_core::validate;
use mapmark_core::model::SCALE_MAX;
use mapmark_core::{MarkerKind, MarkerStyle};
use serde_json::Value;
use std::fmt;

/// Receives the editor's style after every change.
pub struct ChangeListener(Box<dyn FnMut(&MarkerStyle)>);

impl ChangeListener {
    pub fn new(f: impl FnMut(&MarkerStyle) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub(crate) fn notify(&mut self, style: &MarkerStyle) {
        (self.0)(style)
    }
}

impl fmt::Debug for ChangeListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeListener")
    }
}

pub trait StyleEditor {
    fn kind(&self) -> MarkerKind;

    /// Replaces the form with `style`, or with the kind default if `style` is of another kind.
    fn load(&mut self, style: Option<&MarkerStyle>);

    /// The form as a style value.
    fn style(&self) -> MarkerStyle;

    /// Markup of [`StyleEditor::style`], kept current.
    fn preview(&self) -> &str;

    fn set_on_change(&mut self, listener: Option<ChangeListener>);

    /// Loads untrusted JSON, falling back to the kind default when it does not validate.
    ///
    /// A layout keeps its valid entries; only the broken ones fall back.
    fn load_value(&mut self, data: &Value) {
        let style = validate::parse_or_default(self.kind(), data);
        self.load(Some(&style));
    }

    fn reset(&mut self) {
        self.load(None);
    }
}

/// Slider input for `scale`: `0..=SCALE_MAX`, NaN resets to 1.
pub(crate) fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(0.0, SCALE_MAX)
}

/// Text input: drops characters the rendered markup cannot carry.
pub(crate) fn markup_text(value: impl Into<String>) -> String {
    let mut value = value.into();
    value.retain(validate::is_xml_char);
    value
}
