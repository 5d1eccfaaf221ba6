//! Typed marker model.
//!
//! A [`MarkerStyle`] is the single source of truth for how a marker looks. Rendered markup is
//! always derived from it and can be regenerated at any time.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Upper bound of the scale slider in the editors.
pub const SCALE_MAX: f64 = 2.0;
/// Upper bound (inclusive) of the icon animation duration step.
pub const DURATION_MAX: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Label,
    Icon,
    Layout,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 3] = [MarkerKind::Label, MarkerKind::Icon, MarkerKind::Layout];

    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::Label => "label",
            MarkerKind::Icon => "icon",
            MarkerKind::Layout => "layout",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "label" => Ok(MarkerKind::Label),
            "icon" => Ok(MarkerKind::Icon),
            "layout" => Ok(MarkerKind::Layout),
            other => Err(Error::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// A CSS color as typed by the user (`#rrggbb` from the picker, anything from the text field).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelShape {
    #[default]
    Rectangle,
    Rounded,
    Trapezoid,
    Ferry,
}

impl LabelShape {
    pub const ALL: [LabelShape; 4] = [
        LabelShape::Rectangle,
        LabelShape::Rounded,
        LabelShape::Trapezoid,
        LabelShape::Ferry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LabelShape::Rectangle => "rectangle",
            LabelShape::Rounded => "rounded",
            LabelShape::Trapezoid => "trapezoid",
            LabelShape::Ferry => "ferry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconShape {
    #[default]
    Circle,
    Rounded,
    Square,
}

impl IconShape {
    pub const ALL: [IconShape; 3] = [IconShape::Circle, IconShape::Rounded, IconShape::Square];

    pub fn as_str(self) -> &'static str {
        match self {
            IconShape::Circle => "circle",
            IconShape::Rounded => "rounded",
            IconShape::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconName {
    #[default]
    Arrow,
    Warning,
    Construction,
}

impl IconName {
    pub const ALL: [IconName; 3] = [IconName::Arrow, IconName::Warning, IconName::Construction];

    pub fn as_str(self) -> &'static str {
        match self {
            IconName::Arrow => "arrow",
            IconName::Warning => "warning",
            IconName::Construction => "construction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Row,
    Column,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Row => "row",
            Direction::Column => "column",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "row" => Ok(Direction::Row),
            "column" => Ok(Direction::Column),
            other => Err(Error::InvalidStyle {
                kind: MarkerKind::Layout,
                message: format!("unknown direction `{other}`"),
            }),
        }
    }
}

/// Transit line label (`S1`, `U3`, a bus number...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub color: Color,
    pub text: String,
    pub shape: LabelShape,
    pub scale: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Color::new("#ff0000"),
            text: "S1".to_string(),
            shape: LabelShape::Rectangle,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    pub color: Color,
    pub stroke: Color,
    pub icon: IconName,
    pub shape: IconShape,
    pub animated: bool,
    /// Animation speed step in `0..=DURATION_MAX`; higher is faster.
    pub duration: u8,
    pub scale: f64,
    /// Degrees in `0..360`.
    pub rotation: u16,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            color: Color::new("#272c34"),
            stroke: Color::new("#ffffff"),
            icon: IconName::Arrow,
            shape: IconShape::Circle,
            animated: true,
            duration: 2,
            scale: 1.0,
            rotation: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutStyle {
    pub direction: Direction,
    pub gap: f64,
    pub items: Vec<LayoutItem>,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            direction: Direction::Row,
            gap: 4.0,
            items: Vec::new(),
        }
    }
}

impl LayoutStyle {
    pub fn item(&self, id: ItemId) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

/// Session-local identity of a layout entry.
///
/// Assigned when the entry is created or loaded; never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One entry of a layout. Serializes exactly like the [`MarkerStyle`] it wraps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MarkerStyle", into = "MarkerStyle")]
pub struct LayoutItem {
    pub id: ItemId,
    pub style: MarkerStyle,
}

impl LayoutItem {
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            id: ItemId::new(),
            style,
        }
    }
}

// Item ids are identity, not value: two layouts with the same entries are equal.
impl PartialEq for LayoutItem {
    fn eq(&self, other: &Self) -> bool {
        self.style == other.style
    }
}

impl From<MarkerStyle> for LayoutItem {
    fn from(style: MarkerStyle) -> Self {
        Self::new(style)
    }
}

impl From<LayoutItem> for MarkerStyle {
    fn from(item: LayoutItem) -> Self {
        item.style
    }
}

/// Kind tag plus kind-specific data. Serialized as `{"type": <kind>, "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum MarkerStyle {
    Label(LabelStyle),
    Icon(IconStyle),
    Layout(LayoutStyle),
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle::Label(LabelStyle::default())
    }
}

impl MarkerStyle {
    pub fn kind(&self) -> MarkerKind {
        match self {
            MarkerStyle::Label(_) => MarkerKind::Label,
            MarkerStyle::Icon(_) => MarkerKind::Icon,
            MarkerStyle::Layout(_) => MarkerKind::Layout,
        }
    }

    pub fn default_for(kind: MarkerKind) -> Self {
        match kind {
            MarkerKind::Label => MarkerStyle::Label(LabelStyle::default()),
            MarkerKind::Icon => MarkerStyle::Icon(IconStyle::default()),
            MarkerKind::Layout => MarkerStyle::Layout(LayoutStyle::default()),
        }
    }

    /// The kind-specific payload as JSON (the `data` half of the wire shape).
    pub fn data_value(&self) -> Value {
        let value = match self {
            MarkerStyle::Label(data) => serde_json::to_value(data),
            MarkerStyle::Icon(data) => serde_json::to_value(data),
            MarkerStyle::Layout(data) => serde_json::to_value(data),
        };
        value.unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(Uuid);

impl MarkerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub position: LatLng,
    pub style: MarkerStyle,
}

impl PlacedMarker {
    pub fn new(position: LatLng, style: MarkerStyle) -> Self {
        Self {
            id: MarkerId::new(),
            position,
            style,
        }
    }
}
