use crate::model::{LatLng, MarkerId, MarkerStyle, PlacedMarker};
use crate::{Error, Result};
use indexmap::IndexMap;

/// The markers currently on the map, in insertion order.
///
/// Order only keeps list keys stable; it is not a z-index.
#[derive(Debug, Clone, Default)]
pub struct MarkerCollection {
    markers: IndexMap<MarkerId, PlacedMarker>,
}

impl MarkerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn get(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.markers.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedMarker> {
        self.markers.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = MarkerId> + '_ {
        self.markers.keys().copied()
    }

    pub fn add(&mut self, position: LatLng, style: MarkerStyle) -> MarkerId {
        let marker = PlacedMarker::new(position, style);
        let id = marker.id;
        self.markers.insert(id, marker);
        tracing::info!(%id, "marker added");
        id
    }

    /// Adds a marker carrying the default style.
    pub fn add_default(&mut self, position: LatLng) -> MarkerId {
        self.add(position, MarkerStyle::default())
    }

    pub fn insert(&mut self, marker: PlacedMarker) -> Result<()> {
        if self.markers.contains_key(&marker.id) {
            return Err(Error::DuplicateMarker { id: marker.id });
        }
        self.markers.insert(marker.id, marker);
        Ok(())
    }

    pub fn remove(&mut self, id: MarkerId) -> Option<PlacedMarker> {
        let removed = self.markers.shift_remove(&id);
        if removed.is_some() {
            tracing::info!(%id, "marker removed");
        }
        removed
    }

    /// Removes every id in `removed` and appends `new_entry`, or changes nothing.
    ///
    /// Fails when an id is missing or when `new_entry` collides with a marker that stays.
    pub fn replace_range(
        &mut self,
        removed: &[MarkerId],
        new_entry: PlacedMarker,
    ) -> Result<Vec<PlacedMarker>> {
        if let Some(&id) = removed.iter().find(|id| !self.markers.contains_key(*id)) {
            return Err(Error::UnknownMarker { id });
        }
        if self.markers.contains_key(&new_entry.id) && !removed.contains(&new_entry.id) {
            return Err(Error::DuplicateMarker { id: new_entry.id });
        }
        let mut out = Vec::with_capacity(removed.len());
        for id in removed {
            if let Some(marker) = self.markers.shift_remove(id) {
                out.push(marker);
            }
        }
        tracing::info!(removed = out.len(), id = %new_entry.id, "markers replaced");
        self.markers.insert(new_entry.id, new_entry);
        Ok(out)
    }

    pub fn set_style(&mut self, id: MarkerId, style: MarkerStyle) -> Result<()> {
        let marker = self
            .markers
            .get_mut(&id)
            .ok_or(Error::UnknownMarker { id })?;
        marker.style = style;
        Ok(())
    }

    pub fn set_position(&mut self, id: MarkerId, position: LatLng) -> Result<()> {
        let marker = self
            .markers
            .get_mut(&id)
            .ok_or(Error::UnknownMarker { id })?;
        marker.position = position;
        Ok(())
    }

    /// Removes every marker, returning them in collection order.
    pub fn clear(&mut self) -> Vec<PlacedMarker> {
        let out: Vec<PlacedMarker> = self.markers.drain(..).map(|(_, m)| m).collect();
        tracing::info!(removed = out.len(), "collection cleared");
        out
    }
}

impl FromIterator<PlacedMarker> for MarkerCollection {
    fn from_iter<T: IntoIterator<Item = PlacedMarker>>(iter: T) -> Self {
        Self {
            markers: iter.into_iter().map(|m| (m.id, m)).collect(),
        }
    }
}
