//! Drag-end intersection detection and the merge that follows it.

use crate::collection::MarkerCollection;
use crate::geom::{self, ScreenRect};
use crate::model::{Direction, LayoutItem, LayoutStyle, MarkerId, MarkerStyle, PlacedMarker};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// How the merge target is picked when several markers are under the dragged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// First marker in collection order whose box contains the dragged box center.
    #[default]
    FirstMatch,
    /// Among the markers containing the dragged center, the one with the largest overlap area.
    LargestOverlap,
}

impl MergePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MergePolicy::FirstMatch => "first-match",
            MergePolicy::LargestOverlap => "largest-overlap",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-match" | "first" => Ok(MergePolicy::FirstMatch),
            "largest-overlap" | "largest" => Ok(MergePolicy::LargestOverlap),
            other => Err(format!("unknown merge policy `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeSettings {
    pub direction: Direction,
    pub gap: f64,
    pub policy: MergePolicy,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            direction: Direction::Row,
            gap: 4.0,
            policy: MergePolicy::FirstMatch,
        }
    }
}

/// A pending merge: `source` was dragged onto `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeProposal {
    pub source: MarkerId,
    pub target: MarkerId,
}

/// Finds the marker `dragged` was dropped onto.
///
/// `boxes` holds the rendered screen box of every marker in collection order, the dragged one
/// included.
pub fn find_merge_target(
    dragged: MarkerId,
    boxes: &[(MarkerId, ScreenRect)],
    policy: MergePolicy,
) -> Option<MarkerId> {
    let dragged_box = boxes
        .iter()
        .find_map(|(id, rect)| (*id == dragged).then_some(*rect))?;
    let center = dragged_box.center();

    let mut candidates = boxes
        .iter()
        .filter(|(id, rect)| *id != dragged && geom::contains_strict(rect, center));

    match policy {
        MergePolicy::FirstMatch => candidates.next().map(|(id, _)| *id),
        MergePolicy::LargestOverlap => {
            let mut best: Option<(MarkerId, f64)> = None;
            for (id, rect) in candidates {
                let area = geom::overlap_area(&dragged_box, rect);
                if best.is_none_or(|(_, best_area)| area > best_area) {
                    best = Some((*id, area));
                }
            }
            best.map(|(id, _)| id)
        }
    }
}

pub fn detect_merge(
    dragged: MarkerId,
    boxes: &[(MarkerId, ScreenRect)],
    policy: MergePolicy,
) -> Option<MergeProposal> {
    let target = find_merge_target(dragged, boxes, policy)?;
    Some(MergeProposal {
        source: dragged,
        target,
    })
}

/// The layout that replaces a merged pair: `[source, target]`.
pub fn merged_style(
    source: &MarkerStyle,
    target: &MarkerStyle,
    settings: &MergeSettings,
) -> MarkerStyle {
    MarkerStyle::Layout(LayoutStyle {
        direction: settings.direction,
        gap: settings.gap,
        items: vec![
            LayoutItem::new(source.clone()),
            LayoutItem::new(target.clone()),
        ],
    })
}

/// Replaces both markers of `proposal` with one layout marker at the target's position.
pub fn apply_merge(
    collection: &mut MarkerCollection,
    proposal: MergeProposal,
    settings: &MergeSettings,
) -> Result<MarkerId> {
    if proposal.source == proposal.target {
        return Err(Error::MergeWithSelf {
            id: proposal.source,
        });
    }
    let source = collection
        .get(proposal.source)
        .ok_or(Error::UnknownMarker {
            id: proposal.source,
        })?;
    let target = collection
        .get(proposal.target)
        .ok_or(Error::UnknownMarker {
            id: proposal.target,
        })?;

    let merged = PlacedMarker::new(
        target.position,
        merged_style(&source.style, &target.style, settings),
    );
    let id = merged.id;
    collection.replace_range(&[proposal.source, proposal.target], merged)?;
    tracing::info!(
        source = %proposal.source,
        target = %proposal.target,
        %id,
        "markers merged"
    );
    Ok(id)
}
