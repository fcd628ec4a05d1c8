use crate::advisor::model::ExpandedFinding;
use serde::Serialize;

/// Grid coordinates and size for one card.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Slot every card occupies while it sits in the inbox, before a user
/// positions it on the grid.
pub const DEFAULT_SLOT: GridPos = GridPos { x: 5, y: 9, w: 2, h: 2 };

/// One card descriptor, carried by both partitions of a breakpoint.
///
/// The finding payload is a copy stamped at placement time, not a live
/// reference into the collection; later collection replacement does not
/// propagate into descriptors already held by a partition.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BoardItem {
    #[serde(flatten)]
    pub pos: GridPos,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(flatten)]
    pub card: ExpandedFinding,
}

impl BoardItem {
    pub fn unplaced(card: ExpandedFinding) -> Self {
        Self {
            pos: DEFAULT_SLOT,
            is_static: false,
            card,
        }
    }

    /// The card's identifier is the finding's `i`.
    pub fn id(&self) -> &str {
        &self.card.i
    }
}
