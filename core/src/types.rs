//! Shared primitive types used across the overlay renderer.

use serde::{Deserialize, Serialize};

/// A map-block grid coordinate. One block = one building footprint cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockCoordinate {
    pub x: i32,
    pub y: i32,
}

impl BlockCoordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The visible rectangle in block space, keyed by its two opposite corners.
///
/// RULE: equality and hashing are structural. The view layer rebuilds this
/// value from pan state every frame, so two keys describing the same
/// rectangle MUST compare equal or the sample cache would miss every frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RegionKey {
    pub from: BlockCoordinate,
    pub to: BlockCoordinate,
}

impl RegionKey {
    pub fn new(from: BlockCoordinate, to: BlockCoordinate) -> Self {
        Self { from, to }
    }

    /// Corner order is not normalized at construction (the key must match
    /// whatever the view hands us), so containment sorts per axis here.
    pub fn contains(&self, coordinate: BlockCoordinate) -> bool {
        let (x_lo, x_hi) = min_max(self.from.x, self.to.x);
        let (y_lo, y_hi) = min_max(self.from.y, self.to.y);
        coordinate.x >= x_lo && coordinate.x <= x_hi && coordinate.y >= y_lo && coordinate.y <= y_hi
    }

    /// Corners sorted (min, max) per axis — the canonical iteration bounds.
    pub fn bounds(&self) -> (BlockCoordinate, BlockCoordinate) {
        let (x_lo, x_hi) = min_max(self.from.x, self.to.x);
        let (y_lo, y_hi) = min_max(self.from.y, self.to.y);
        (
            BlockCoordinate::new(x_lo, y_lo),
            BlockCoordinate::new(x_hi, y_hi),
        )
    }
}

fn min_max(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
