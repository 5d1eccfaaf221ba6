use crate::merge::{MergePolicy, MergeSettings};
use crate::model::{Direction, LatLng};
use serde_json::{Map, Value, json};

/// Editor settings as a JSON object, addressed with dotted paths (`merge.gap`).
///
/// Overrides are deep-merged onto [`EditorConfig::default`], so typed accessors always find a
/// value unless an override replaced it with one of the wrong type.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig(Value);

impl Default for EditorConfig {
    fn default() -> Self {
        Self(json!({
            "map": {
                "center": [9.993768, 53.552534],
                "zoom": 15,
                "minZoom": 0,
                "maxZoom": 20
            },
            "merge": {
                "direction": "row",
                "gap": 4,
                "policy": "first-match"
            },
            "marker": {
                "draggable": true
            }
        }))
    }
}

impl EditorConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Defaults with `overrides` merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(overrides);
        cfg
    }

    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let overrides: Value = serde_json::from_str(text)?;
        Ok(Self::with_overrides(&overrides))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // `from_value` accepts any JSON; coerce non-objects so this never panics.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// Initial map center. Stored as `[lon, lat]` like the export document.
    pub fn map_center(&self) -> LatLng {
        let pair = self
            .get("map.center")
            .and_then(Value::as_array)
            .filter(|a| a.len() == 2)
            .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)));
        match pair {
            Some((lon, lat)) => LatLng::new(lat, lon),
            None => LatLng::new(53.552534, 9.993768),
        }
    }

    pub fn map_zoom(&self) -> f64 {
        self.get_f64("map.zoom").unwrap_or(15.0)
    }

    /// Inclusive zoom range accepted by view controls.
    pub fn zoom_bounds(&self) -> (f64, f64) {
        (
            self.get_f64("map.minZoom").unwrap_or(0.0),
            self.get_f64("map.maxZoom").unwrap_or(20.0),
        )
    }

    pub fn marker_draggable(&self) -> bool {
        self.get_bool("marker.draggable").unwrap_or(true)
    }

    pub fn merge_settings(&self) -> MergeSettings {
        let defaults = MergeSettings::default();
        let direction = self
            .get_str("merge.direction")
            .and_then(|s| s.parse::<Direction>().ok())
            .unwrap_or(defaults.direction);
        let gap = self
            .get_f64("merge.gap")
            .filter(|g| g.is_finite() && *g >= 0.0)
            .unwrap_or(defaults.gap);
        let policy = self
            .get_str("merge.policy")
            .and_then(|s| s.parse::<MergePolicy>().ok())
            .unwrap_or(defaults.policy);
        MergeSettings {
            direction,
            gap,
            policy,
        }
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
