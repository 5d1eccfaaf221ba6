//! An in-memory [`MapEngine`] for tests and offline tooling.
//!
//! Positions are projected with a flat equirectangular scale around the view center, and every
//! marker renders as a fixed-size box centered on its projected point.

use mapmark_core::geom::{self, ScreenRect, ScreenSize};
use mapmark_core::{LatLng, MapEngine, MarkerId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMarker {
    pub position: LatLng,
    pub draggable: bool,
    pub markup: String,
}

#[derive(Debug, Clone)]
pub struct HeadlessMap {
    markers: HashMap<MarkerId, HeadlessMarker>,
    center: LatLng,
    zoom: f64,
    viewport: ScreenSize,
    marker_size: ScreenSize,
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(ScreenSize::new(1024.0, 768.0), ScreenSize::new(64.0, 32.0))
    }
}

impl HeadlessMap {
    pub fn new(viewport: ScreenSize, marker_size: ScreenSize) -> Self {
        Self {
            markers: HashMap::new(),
            center: LatLng::default(),
            zoom: 0.0,
            viewport,
            marker_size,
        }
    }

    pub fn marker(&self, id: MarkerId) -> Option<&HeadlessMarker> {
        self.markers.get(&id)
    }

    pub fn markup(&self, id: MarkerId) -> Option<&str> {
        self.markers.get(&id).map(|m| m.markup.as_str())
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Pixels per degree at the current zoom.
    fn scale(&self) -> f64 {
        256.0 * 2f64.powf(self.zoom) / 360.0
    }

    pub fn project(&self, position: LatLng) -> geom::ScreenPoint {
        let k = self.scale();
        geom::point(
            (position.lon - self.center.lon) * k + self.viewport.width / 2.0,
            (self.center.lat - position.lat) * k + self.viewport.height / 2.0,
        )
    }

    pub fn unproject(&self, p: geom::ScreenPoint) -> LatLng {
        let k = self.scale();
        LatLng::new(
            self.center.lat - (p.y - self.viewport.height / 2.0) / k,
            self.center.lon + (p.x - self.viewport.width / 2.0) / k,
        )
    }

    /// Moves a draggable marker as if the user dropped it at `position`.
    ///
    /// Returns `false` for unknown or non-draggable markers.
    pub fn drag(&mut self, id: MarkerId, position: LatLng) -> bool {
        match self.markers.get_mut(&id) {
            Some(marker) if marker.draggable => {
                marker.position = position;
                true
            }
            _ => false,
        }
    }
}

impl MapEngine for HeadlessMap {
    fn add_marker(&mut self, id: MarkerId, position: LatLng, draggable: bool, markup: &str) {
        self.markers.insert(
            id,
            HeadlessMarker {
                position,
                draggable,
                markup: markup.to_string(),
            },
        );
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn set_marker_markup(&mut self, id: MarkerId, markup: &str) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.markup = markup.to_string();
        }
    }

    fn set_position(&mut self, id: MarkerId, position: LatLng) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.position = position;
        }
    }

    fn position(&self, id: MarkerId) -> Option<LatLng> {
        self.markers.get(&id).map(|m| m.position)
    }

    fn rendered_bounds(&self, id: MarkerId) -> Option<ScreenRect> {
        let marker = self.markers.get(&id)?;
        let p = self.project(marker.position);
        Some(geom::rect(
            p.x - self.marker_size.width / 2.0,
            p.y - self.marker_size.height / 2.0,
            self.marker_size.width,
            self.marker_size.height,
        ))
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}
