//! Memoized cell positions.

use dashmap::DashMap;
use glam::DVec3;
use rustc_hash::FxBuildHasher;

use crate::cell::Cell;

/// Memoizes unit-sphere cell positions, keyed by cell identity.
///
/// The cache is an explicit collaborator: callers own it and pass it to
/// grid queries, so several grids or cache lifetimes can coexist. Keys carry
/// the grid frequency, which keeps grids of different frequency apart even
/// when they share one cache. Population is synchronized per key, so a
/// `&PositionCache` can be shared across threads.
///
/// There is no eviction; a cache never holds more entries than its grids
/// have cells.
#[derive(Debug, Default)]
pub struct PositionCache {
    positions: DashMap<Cell, DVec3, FxBuildHasher>,
}

impl PositionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Returns the cached position of `cell`, computing and storing it on first use.
    pub fn get_or_compute(&self, cell: Cell) -> DVec3 {
        if let Some(position) = self.positions.get(&cell) {
            return *position;
        }
        *self
            .positions
            .entry(cell)
            .or_insert_with(|| cell.compute_position())
    }

    /// Returns the cached position of `cell` without computing it.
    pub fn get(&self, cell: Cell) -> Option<DVec3> {
        self.positions.get(&cell).map(|position| *position)
    }

    /// Number of cached positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Drops every cached position.
    pub fn clear(&self) {
        self.positions.clear();
    }
}
