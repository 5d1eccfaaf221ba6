//! The element dialog (one tab per marker kind) and the merge confirmation dialog.

use crate::editor::{IconEditor, LabelEditor, LayoutEditor, StyleEditor};
use mapmark_core::{MarkerKind, MarkerStyle, MergeProposal};
use serde_json::Value;

/// How an element dialog was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Saved(MarkerStyle),
    Deleted,
    Cancelled,
}

/// Tabbed editor for one marker or one layout entry.
///
/// All three editors live for the whole dialog, so switching tabs back and forth keeps what
/// was typed into each. Only the active tab is saved.
#[derive(Debug)]
pub struct ElementDialog {
    active: MarkerKind,
    label: LabelEditor,
    icon: IconEditor,
    layout: LayoutEditor,
}

impl ElementDialog {
    /// Opens on the tab of `style`'s kind (label when there is none).
    pub fn open(style: Option<&MarkerStyle>) -> Self {
        let mut dialog = Self {
            active: style.map(MarkerStyle::kind).unwrap_or(MarkerKind::Label),
            label: LabelEditor::new(),
            icon: IconEditor::new(),
            layout: LayoutEditor::new(),
        };
        dialog.label.load(style);
        dialog.icon.load(style);
        dialog.layout.load(style);
        dialog
    }

    /// Opens from an untrusted `(kind, data)` pair.
    ///
    /// An unknown kind opens the label tab on its default; data that fails validation loads the
    /// default of its kind, except that a layout keeps its valid entries.
    pub fn open_value(kind: &str, data: &Value) -> Self {
        let Ok(kind) = kind.parse::<MarkerKind>() else {
            tracing::debug!(kind, "element dialog opened with an unknown kind");
            return Self::open(None);
        };
        let mut dialog = Self::open(None);
        dialog.active = kind;
        dialog.editor_mut(kind).load_value(data);
        dialog
    }

    pub fn active_tab(&self) -> MarkerKind {
        self.active
    }

    pub fn set_tab(&mut self, kind: MarkerKind) {
        self.active = kind;
    }

    pub fn label(&self) -> &LabelEditor {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut LabelEditor {
        &mut self.label
    }

    pub fn icon(&self) -> &IconEditor {
        &self.icon
    }

    pub fn icon_mut(&mut self) -> &mut IconEditor {
        &mut self.icon
    }

    pub fn layout(&self) -> &LayoutEditor {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutEditor {
        &mut self.layout
    }

    pub fn editor(&self, kind: MarkerKind) -> &dyn StyleEditor {
        match kind {
            MarkerKind::Label => &self.label,
            MarkerKind::Icon => &self.icon,
            MarkerKind::Layout => &self.layout,
        }
    }

    pub fn editor_mut(&mut self, kind: MarkerKind) -> &mut dyn StyleEditor {
        match kind {
            MarkerKind::Label => &mut self.label,
            MarkerKind::Icon => &mut self.icon,
            MarkerKind::Layout => &mut self.layout,
        }
    }

    /// The active tab's style.
    pub fn current_style(&self) -> MarkerStyle {
        self.editor(self.active).style()
    }

    pub fn preview(&self) -> &str {
        self.editor(self.active).preview()
    }

    pub fn save(self) -> DialogOutcome {
        DialogOutcome::Saved(self.current_style())
    }

    pub fn delete(self) -> DialogOutcome {
        DialogOutcome::Deleted
    }

    pub fn cancel(self) -> DialogOutcome {
        DialogOutcome::Cancelled
    }
}

/// Confirmation shown after a marker was dropped onto another one.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeDialog {
    pub proposal: MergeProposal,
    pub source_preview: String,
    pub target_preview: String,
}
