//! Boundary with the map-rendering engine.
//!
//! The editor only needs to place markers, move them, swap their markup and read back their
//! rendered screen boxes; any engine exposing that is substitutable.

use crate::geom::ScreenRect;
use crate::model::{LatLng, MarkerId};

pub trait MapEngine {
    fn add_marker(&mut self, id: MarkerId, position: LatLng, draggable: bool, markup: &str);

    fn remove_marker(&mut self, id: MarkerId);

    fn set_marker_markup(&mut self, id: MarkerId, markup: &str);

    fn set_position(&mut self, id: MarkerId, position: LatLng);

    fn position(&self, id: MarkerId) -> Option<LatLng>;

    /// Screen-space box of the rendered marker, if it is attached.
    fn rendered_bounds(&self, id: MarkerId) -> Option<ScreenRect>;

    fn center(&self) -> LatLng;

    fn zoom(&self) -> f64;

    fn set_center(&mut self, center: LatLng);

    fn set_zoom(&mut self, zoom: f64);
}
