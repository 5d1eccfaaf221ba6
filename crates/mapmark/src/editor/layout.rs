use super::{ChangeListener, StyleEditor};
use crate::dialog::ElementDialog;
use crate::{EditorError, Result};
use mapmark_core::{Direction, ItemId, LayoutItem, LayoutStyle, MarkerKind, MarkerStyle};

/// An entry being edited in its own nested dialog.
#[derive(Debug)]
struct NestedEdit {
    item: ItemId,
    dialog: Box<ElementDialog>,
}

/// Edits direction and gap, and opens entries in nested dialogs.
///
/// Entries are addressed by [`ItemId`], so deleting one never shifts which entry another open
/// reference points at. Reordering is not supported.
#[derive(Debug)]
pub struct LayoutEditor {
    form: LayoutStyle,
    preview: String,
    on_change: Option<ChangeListener>,
    nested: Option<NestedEdit>,
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEditor {
    pub fn new() -> Self {
        let form = LayoutStyle::default();
        let preview = render_preview(&form);
        Self {
            form,
            preview,
            on_change: None,
            nested: None,
        }
    }

    pub fn form(&self) -> &LayoutStyle {
        &self.form
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.form.items
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.form.direction = direction;
        self.changed();
    }

    pub fn set_gap(&mut self, gap: f64) {
        self.form.gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        self.changed();
    }

    pub fn push_item(&mut self, style: MarkerStyle) -> ItemId {
        let item = LayoutItem::new(style);
        let id = item.id;
        self.form.items.push(item);
        self.changed();
        id
    }

    pub fn replace_item(&mut self, id: ItemId, style: MarkerStyle) -> Result<()> {
        let item = self
            .form
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(EditorError::UnknownItem { id })?;
        item.style = style;
        self.changed();
        Ok(())
    }

    /// Removes the entry; later entries move up by one.
    pub fn remove_item(&mut self, id: ItemId) -> Result<MarkerStyle> {
        let idx = self
            .form
            .position_of(id)
            .ok_or(EditorError::UnknownItem { id })?;
        let removed = self.form.items.remove(idx);
        if self.nested.as_ref().is_some_and(|n| n.item == id) {
            self.nested = None;
        }
        self.changed();
        Ok(removed.style)
    }

    /// Opens `id` in a nested dialog, replacing any nested edit already open.
    pub fn open_item(&mut self, id: ItemId) -> Result<&mut ElementDialog> {
        let item = self.form.item(id).ok_or(EditorError::UnknownItem { id })?;
        let dialog = Box::new(ElementDialog::open(Some(&item.style)));
        let nested = self.nested.insert(NestedEdit { item: id, dialog });
        Ok(nested.dialog.as_mut())
    }

    pub fn nested_item(&self) -> Option<ItemId> {
        self.nested.as_ref().map(|n| n.item)
    }

    pub fn nested_dialog(&self) -> Option<&ElementDialog> {
        self.nested.as_ref().map(|n| n.dialog.as_ref())
    }

    pub fn nested_dialog_mut(&mut self) -> Option<&mut ElementDialog> {
        self.nested.as_mut().map(|n| n.dialog.as_mut())
    }

    /// Writes the nested dialog's style back into its entry.
    pub fn save_nested(&mut self) -> Result<ItemId> {
        let nested = self.nested.take().ok_or(EditorError::NoNestedEdit)?;
        let style = nested.dialog.current_style();
        self.replace_item(nested.item, style)?;
        Ok(nested.item)
    }

    /// Deletes the entry the nested dialog was opened for.
    pub fn delete_nested(&mut self) -> Result<MarkerStyle> {
        let nested = self.nested.take().ok_or(EditorError::NoNestedEdit)?;
        self.remove_item(nested.item)
    }

    /// Discards the nested dialog; the entry is untouched.
    pub fn close_nested(&mut self) {
        self.nested = None;
    }

    fn changed(&mut self) {
        self.preview = render_preview(&self.form);
        if let Some(listener) = self.on_change.as_mut() {
            listener.notify(&MarkerStyle::Layout(self.form.clone()));
        }
    }
}

fn render_preview(form: &LayoutStyle) -> String {
    match mapmark_render::html::render_layout_preview(form) {
        Ok(markup) => markup,
        Err(err) => {
            tracing::warn!(error = %err, "layout preview render failed");
            mapmark_render::RENDER_ERROR_PLACEHOLDER.to_string()
        }
    }
}

impl StyleEditor for LayoutEditor {
    fn kind(&self) -> MarkerKind {
        MarkerKind::Layout
    }

    fn load(&mut self, style: Option<&MarkerStyle>) {
        self.form = match style {
            Some(MarkerStyle::Layout(layout)) => layout.clone(),
            _ => LayoutStyle::default(),
        };
        self.nested = None;
        self.changed();
    }

    fn style(&self) -> MarkerStyle {
        MarkerStyle::Layout(self.form.clone())
    }

    fn preview(&self) -> &str {
        &self.preview
    }

    fn set_on_change(&mut self, listener: Option<ChangeListener>) {
        self.on_change = listener;
    }
}
