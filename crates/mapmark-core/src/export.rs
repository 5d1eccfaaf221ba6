//! The clipboard export document and its inverse.
//!
//! ```json
//! { "map": { "center": [lon, lat], "zoom": 15 },
//!   "markers": [ { "lat": 53.5, "lon": 9.9, "type": "label", "data": { ... } } ] }
//! ```

use crate::collection::MarkerCollection;
use crate::model::{LatLng, MarkerKind, MarkerStyle, PlacedMarker};
use crate::validate;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// `[lon, lat]`.
    pub center: [f64; 2],
    pub zoom: f64,
}

impl MapView {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center: [center.lon, center.lat],
            zoom,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.center[1], self.center[0])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMarker {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

impl ExportMarker {
    pub fn from_placed(marker: &PlacedMarker) -> Self {
        Self {
            lat: marker.position.lat,
            lon: marker.position.lon,
            kind: marker.style.kind().as_str().to_string(),
            data: marker.style.data_value(),
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    pub fn style(&self) -> Result<MarkerStyle> {
        validate::parse_tagged(&self.kind, &self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub map: MapView,
    pub markers: Vec<ExportMarker>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub lenient: bool,
}

impl ImportOptions {
    /// Any invalid marker fails the import.
    pub fn strict() -> Self {
        Self { lenient: false }
    }

    /// Invalid markers get their kind's default style; markers of unknown kind are skipped.
    pub fn lenient() -> Self {
        Self { lenient: true }
    }
}

impl ExportDocument {
    pub fn from_collection(collection: &MarkerCollection, view: MapView) -> Self {
        Self {
            map: view,
            markers: collection.iter().map(ExportMarker::from_placed).collect(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every marker that fails validation, with its index.
    pub fn invalid_markers(&self) -> Vec<(usize, Error)> {
        self.markers
            .iter()
            .enumerate()
            .filter_map(|(idx, marker)| marker.style().err().map(|err| (idx, err)))
            .collect()
    }

    /// Rebuilds a collection; every marker gets a fresh id.
    pub fn to_collection(&self, options: ImportOptions) -> Result<MarkerCollection> {
        let mut out = MarkerCollection::new();
        for (idx, marker) in self.markers.iter().enumerate() {
            let style = match marker.style() {
                Ok(style) => style,
                Err(err) if !options.lenient => {
                    return Err(Error::InvalidExport {
                        message: format!("marker {idx}: {err}"),
                    });
                }
                Err(err) => match marker.kind.parse::<MarkerKind>() {
                    Ok(kind) => {
                        tracing::warn!(
                            idx,
                            error = %err,
                            "replacing invalid marker data with defaults"
                        );
                        validate::parse_or_default(kind, &marker.data)
                    }
                    Err(_) => {
                        tracing::warn!(idx, kind = %marker.kind, "skipping marker of unknown kind");
                        continue;
                    }
                },
            };
            out.insert(PlacedMarker::new(marker.position(), style))?;
        }
        Ok(out)
    }
}

pub fn export_json(collection: &MarkerCollection, view: MapView) -> Result<String> {
    ExportDocument::from_collection(collection, view).to_json()
}

pub fn import_json(text: &str, options: ImportOptions) -> Result<(MapView, MarkerCollection)> {
    let doc = ExportDocument::from_json(text)?;
    let collection = doc.to_collection(options)?;
    tracing::info!(markers = collection.len(), "export document imported");
    Ok((doc.map, collection))
}
