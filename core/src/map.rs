//! Map data model and the spatial-query seam.
//!
//! The renderer never owns map data. Buildings belong to the simulation;
//! their zot sets mutate between frames without notice, so every read here
//! takes a snapshot. `MapQuery` is the only capability the renderer
//! consumes, and it must never mutate the underlying map.

use crate::types::{BlockCoordinate, RegionKey};
use crate::zot::Zot;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Civic,
}

/// A building occupying a block. The zot set is shared with the simulation
/// and read-locked per access; the renderer only ever snapshots it.
#[derive(Debug)]
pub struct Building {
    pub id: Uuid,
    pub kind: BuildingKind,
    zots: RwLock<Vec<Zot>>,
}

impl Building {
    pub fn new(kind: BuildingKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            zots: RwLock::new(Vec::new()),
        }
    }

    pub fn with_zots(kind: BuildingKind, zots: Vec<Zot>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            zots: RwLock::new(zots),
        }
    }

    /// Snapshot of the current zot set. The set may change right after
    /// this returns; callers must treat the snapshot as point-in-time.
    pub fn zots(&self) -> Vec<Zot> {
        self.zots.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn has_zots(&self) -> bool {
        !self
            .zots
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    pub fn set_zots(&self, zots: Vec<Zot>) {
        *self.zots.write().unwrap_or_else(|e| e.into_inner()) = zots;
    }

    pub fn add_zot(&self, zot: Zot) {
        self.zots
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(zot);
    }

    pub fn clear_zots(&self) {
        self.zots
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// A grid coordinate plus the building standing on it.
#[derive(Debug, Clone)]
pub struct Location {
    pub coordinate: BlockCoordinate,
    pub building: Arc<Building>,
}

impl Location {
    pub fn new(coordinate: BlockCoordinate, building: Arc<Building>) -> Self {
        Self {
            coordinate,
            building,
        }
    }

    pub fn key(&self) -> LocationKey {
        LocationKey {
            coordinate: self.coordinate,
            building_id: self.building.id,
        }
    }
}

/// Hashable identity of a location. Keyed on building id as well as the
/// coordinate so a replaced building does not inherit its predecessor's
/// cached zot choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    pub coordinate: BlockCoordinate,
    pub building_id: Uuid,
}

/// The Spatial Query Source. Given two opposite corners, returns every
/// occupied location in the rectangle (corners inclusive, order-agnostic).
pub trait MapQuery: Send + Sync {
    fn locations_in(&self, from: BlockCoordinate, to: BlockCoordinate) -> Result<Vec<Location>>;
}

/// In-memory map: a bounded grid with sparse building placement. Backs the
/// headless runner and the integration tests.
pub struct GridMap {
    pub width: i32,
    pub height: i32,
    buildings: RwLock<HashMap<BlockCoordinate, Arc<Building>>>,
}

impl GridMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            buildings: RwLock::new(HashMap::new()),
        }
    }

    pub fn in_bounds(&self, coordinate: BlockCoordinate) -> bool {
        coordinate.x >= 0
            && coordinate.x < self.width
            && coordinate.y >= 0
            && coordinate.y < self.height
    }

    /// Place a building on its block. Placements outside the grid are
    /// rejected; the map never grows past its declared bounds.
    pub fn place_building(&self, coordinate: BlockCoordinate, building: Arc<Building>) {
        if !self.in_bounds(coordinate) {
            log::warn!(
                "ignoring building placement outside {}x{} grid at ({},{})",
                self.width,
                self.height,
                coordinate.x,
                coordinate.y,
            );
            return;
        }
        self.buildings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(coordinate, building);
    }

    pub fn building_at(&self, coordinate: BlockCoordinate) -> Option<Arc<Building>> {
        self.buildings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&coordinate)
            .cloned()
    }

    pub fn building_count(&self) -> usize {
        self.buildings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Every placed building, coordinate order. Used by the runner to
    /// mutate zot sets between frames.
    pub fn all_locations(&self) -> Vec<Location> {
        let buildings = self.buildings.read().unwrap_or_else(|e| e.into_inner());
        let mut locations: Vec<Location> = buildings
            .iter()
            .map(|(coordinate, building)| Location::new(*coordinate, Arc::clone(building)))
            .collect();
        locations.sort_by_key(|l| l.coordinate);
        locations
    }
}

impl MapQuery for GridMap {
    fn locations_in(&self, from: BlockCoordinate, to: BlockCoordinate) -> Result<Vec<Location>> {
        let region = RegionKey::new(from, to);
        let (lo, hi) = region.bounds();
        let buildings = self.buildings.read().unwrap_or_else(|e| e.into_inner());
        let mut locations = Vec::new();
        for (coordinate, building) in buildings.iter() {
            if coordinate.x >= lo.x
                && coordinate.x <= hi.x
                && coordinate.y >= lo.y
                && coordinate.y <= hi.y
            {
                locations.push(Location::new(*coordinate, Arc::clone(building)));
            }
        }
        locations.sort_by_key(|l| l.coordinate);
        Ok(locations)
    }
}
