//! One editing session: the marker collection, the map it is shown on and the open dialogs.
//!
//! The collection holds each marker's [`MarkerStyle`]; the engine only ever receives markup
//! rendered from it.

use crate::dialog::{ElementDialog, MergeDialog};
use crate::{EditorError, Result};
use mapmark_core::merge;
use mapmark_core::{
    EditorConfig, ImportOptions, LatLng, MapEngine, MapView, MarkerCollection, MarkerId,
    MarkerStyle, MergeProposal, PlacedMarker,
};
use mapmark_render::StyleRegistry;

#[derive(Debug)]
pub struct Session<M: MapEngine> {
    map: M,
    config: EditorConfig,
    registry: StyleRegistry,
    markers: MarkerCollection,
    editing: Option<(MarkerId, ElementDialog)>,
    pending_merge: Option<MergeDialog>,
}

impl<M: MapEngine> Session<M> {
    /// Starts an empty session with the map moved to the configured view.
    pub fn new(mut map: M, config: EditorConfig) -> Self {
        map.set_center(config.map_center());
        map.set_zoom(config.map_zoom());
        Self {
            map,
            config,
            registry: StyleRegistry::builtin(),
            markers: MarkerCollection::new(),
            editing: None,
            pending_merge: None,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn markers(&self) -> &MarkerCollection {
        &self.markers
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    fn attach(&mut self, marker: &PlacedMarker) {
        let markup = self.registry.render_style(&marker.style);
        self.map.add_marker(
            marker.id,
            marker.position,
            self.config.marker_draggable(),
            &markup,
        );
    }

    /// Places a default marker at the current map center.
    pub fn add_marker(&mut self) -> MarkerId {
        self.place(self.map.center(), MarkerStyle::default())
    }

    pub fn place(&mut self, position: LatLng, style: MarkerStyle) -> MarkerId {
        let id = self.markers.add(position, style);
        if let Some(marker) = self.markers.get(id).cloned() {
            self.attach(&marker);
        }
        id
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Result<PlacedMarker> {
        let removed = self
            .markers
            .remove(id)
            .ok_or(mapmark_core::Error::UnknownMarker { id })?;
        self.map.remove_marker(id);
        self.forget(&[id]);
        Ok(removed)
    }

    /// Drops an open dialog or pending merge that refers to any of `ids`.
    fn forget(&mut self, ids: &[MarkerId]) {
        if self
            .editing
            .as_ref()
            .is_some_and(|(id, _)| ids.contains(id))
        {
            self.editing = None;
        }
        if self.pending_merge.as_ref().is_some_and(|m| {
            ids.contains(&m.proposal.source) || ids.contains(&m.proposal.target)
        }) {
            self.pending_merge = None;
        }
    }

    /// Opens the element dialog on `id`, replacing any dialog already open.
    pub fn on_click(&mut self, id: MarkerId) -> Result<&mut ElementDialog> {
        let marker = self
            .markers
            .get(id)
            .ok_or(mapmark_core::Error::UnknownMarker { id })?;
        let dialog = ElementDialog::open(Some(&marker.style));
        let (_, dialog) = self.editing.insert((id, dialog));
        Ok(dialog)
    }

    pub fn on_context_menu(&self, id: MarkerId) {
        tracing::info!(%id, "context menu requested");
    }

    pub fn editing(&self) -> Option<MarkerId> {
        self.editing.as_ref().map(|(id, _)| *id)
    }

    pub fn dialog(&self) -> Option<&ElementDialog> {
        self.editing.as_ref().map(|(_, dialog)| dialog)
    }

    pub fn dialog_mut(&mut self) -> Option<&mut ElementDialog> {
        self.editing.as_mut().map(|(_, dialog)| dialog)
    }

    /// Applies the dialog's active tab to its marker and closes the dialog.
    pub fn save_dialog(&mut self) -> Result<MarkerId> {
        let (id, dialog) = self.editing.take().ok_or(EditorError::NoActiveDialog)?;
        let style = dialog.current_style();
        let markup = self.registry.render_style(&style);
        self.markers.set_style(id, style)?;
        self.map.set_marker_markup(id, &markup);
        tracing::info!(%id, "marker style saved");
        Ok(id)
    }

    /// Removes the dialog's marker.
    pub fn delete_from_dialog(&mut self) -> Result<MarkerId> {
        let (id, _) = self.editing.take().ok_or(EditorError::NoActiveDialog)?;
        self.remove_marker(id)?;
        Ok(id)
    }

    /// Discards the dialog; the marker is untouched.
    pub fn close_dialog(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Syncs `id`'s position from the map and looks for a marker it was dropped onto.
    ///
    /// A hit becomes the pending merge, replacing any earlier one.
    pub fn on_drag_end(&mut self, id: MarkerId) -> Result<Option<MergeProposal>> {
        if !self.markers.contains(id) {
            return Err(mapmark_core::Error::UnknownMarker { id }.into());
        }
        if let Some(position) = self.map.position(id) {
            self.markers.set_position(id, position)?;
        }

        let boxes: Vec<_> = self
            .markers
            .ids()
            .filter_map(|id| self.map.rendered_bounds(id).map(|rect| (id, rect)))
            .collect();
        let policy = self.config.merge_settings().policy;
        let Some(proposal) = merge::detect_merge(id, &boxes, policy) else {
            return Ok(None);
        };

        let preview = |id: MarkerId| {
            self.markers
                .get(id)
                .map(|m| self.registry.render_style(&m.style))
                .unwrap_or_default()
        };
        let dialog = MergeDialog {
            proposal,
            source_preview: preview(proposal.source),
            target_preview: preview(proposal.target),
        };
        tracing::debug!(source = %proposal.source, target = %proposal.target, "merge proposed");
        self.pending_merge = Some(dialog);
        Ok(Some(proposal))
    }

    pub fn pending_merge(&self) -> Option<MergeProposal> {
        self.pending_merge.as_ref().map(|m| m.proposal)
    }

    pub fn merge_preview(&self) -> Option<&MergeDialog> {
        self.pending_merge.as_ref()
    }

    /// Replaces the pending pair with one layout marker at the target's position.
    pub fn confirm_merge(&mut self) -> Result<MarkerId> {
        let pending = self
            .pending_merge
            .take()
            .ok_or(EditorError::NoPendingMerge)?;
        let proposal = pending.proposal;
        let settings = self.config.merge_settings();
        let id = merge::apply_merge(&mut self.markers, proposal, &settings)?;

        self.map.remove_marker(proposal.source);
        self.map.remove_marker(proposal.target);
        if let Some(marker) = self.markers.get(id).cloned() {
            self.attach(&marker);
        }
        self.forget(&[proposal.source, proposal.target]);
        Ok(id)
    }

    /// Declines the merge. The drag itself is kept.
    pub fn cancel_merge(&mut self) -> Result<()> {
        self.pending_merge
            .take()
            .map(|_| ())
            .ok_or(EditorError::NoPendingMerge)
    }

    /// Removes every marker and closes any dialog.
    pub fn reset(&mut self) -> usize {
        let removed = self.markers.clear();
        for marker in &removed {
            self.map.remove_marker(marker.id);
        }
        self.editing = None;
        self.pending_merge = None;
        removed.len()
    }

    pub fn view(&self) -> MapView {
        MapView::new(self.map.center(), self.map.zoom())
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(mapmark_core::export_json(&self.markers, self.view())?)
    }

    /// Replaces the whole session with an export document.
    ///
    /// Nothing changes when the document is rejected.
    pub fn import_json(&mut self, text: &str, options: ImportOptions) -> Result<usize> {
        let (view, collection) = mapmark_core::import_json(text, options)?;
        self.reset();
        self.map.set_center(view.center());
        if !self.set_zoom(view.zoom) {
            tracing::warn!(zoom = view.zoom, "imported zoom out of range; keeping current zoom");
        }
        self.markers = collection;
        let placed: Vec<PlacedMarker> = self.markers.iter().cloned().collect();
        for marker in &placed {
            self.attach(marker);
        }
        Ok(placed.len())
    }

    /// Sets the zoom if it lies within the configured bounds; other values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let (min, max) = self.config.zoom_bounds();
        if !zoom.is_finite() || zoom < min || zoom > max {
            tracing::debug!(zoom, min, max, "zoom out of range ignored");
            return false;
        }
        self.map.set_zoom(zoom);
        true
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.map.set_center(center);
    }
}
