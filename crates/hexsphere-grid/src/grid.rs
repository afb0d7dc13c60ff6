//! The geodesic grid: construction, enumeration, and cached positions.

use glam::DVec3;
use tracing::debug;

use crate::cache::PositionCache;
use crate::cell::{Cell, Neighbors};
use crate::error::GridError;
use crate::mesh::{DEFAULT_CELL_INSET, MeshProjection, block_for_triangle, triangle_count};

/// Number of cells in a grid of the given frequency: `10·N² + 2`.
#[inline]
#[must_use]
pub fn cell_count(frequency: u32) -> u32 {
    10 * frequency * frequency + 2
}

/// An immutable geodesic grid of frequency `N`.
///
/// Holds no per-cell state: cells, adjacency and positions are all derived
/// from the frequency, so a grid is cheap to copy and safe to share between
/// threads. Memoized positions live in a caller-owned [`PositionCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeodesicGrid {
    frequency: u32,
    cell_count: u32,
}

/// Build a grid of the given frequency.
///
/// # Errors
///
/// See [`GeodesicGrid::new`].
pub fn build_grid(frequency: i64) -> Result<GeodesicGrid, GridError> {
    GeodesicGrid::new(frequency)
}

impl GeodesicGrid {
    /// Largest supported frequency: the projected mesh (six vertices per
    /// cell) must stay addressable with `u32` indices.
    pub const MAX_FREQUENCY: u32 = 8460;

    /// Build a grid whose icosahedron faces are each split into `N²` triangles.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidFrequency`] if `frequency < 1` and
    /// [`GridError::FrequencyTooLarge`] if it exceeds [`Self::MAX_FREQUENCY`].
    pub fn new(frequency: i64) -> Result<Self, GridError> {
        let frequency = Self::validate_frequency(frequency)?;
        let grid = Self {
            frequency,
            cell_count: cell_count(frequency),
        };
        debug!(
            frequency,
            cells = grid.cell_count,
            "Built geodesic grid"
        );
        Ok(grid)
    }

    pub(crate) fn validate_frequency(frequency: i64) -> Result<u32, GridError> {
        if frequency < 1 {
            return Err(GridError::InvalidFrequency(frequency));
        }
        if frequency > i64::from(Self::MAX_FREQUENCY) {
            return Err(GridError::FrequencyTooLarge {
                frequency,
                max: Self::MAX_FREQUENCY,
            });
        }
        Ok(frequency as u32)
    }

    /// Subdivision frequency `N`.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Total number of cells, `10·N² + 2`.
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    /// Every cell in index order: the twelve pentagons first, then hexagons.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + use<> {
        let frequency = self.frequency;
        (0..self.cell_count).map(move |index| Cell::new_unchecked(frequency, index))
    }

    /// The twelve pentagonal cells.
    pub fn pentagons(&self) -> impl ExactSizeIterator<Item = Cell> + use<> {
        let frequency = self.frequency;
        (0..Cell::PENTAGON_COUNT).map(move |index| Cell::new_unchecked(frequency, index))
    }

    /// The `10·N² − 10` hexagonal cells.
    pub fn hexagons(&self) -> impl ExactSizeIterator<Item = Cell> + use<> {
        let frequency = self.frequency;
        (Cell::PENTAGON_COUNT..self.cell_count)
            .map(move |index| Cell::new_unchecked(frequency, index))
    }

    /// The cell with the given index, if it exists in this grid.
    #[must_use]
    pub fn cell(&self, index: u32) -> Option<Cell> {
        (index < self.cell_count).then(|| Cell::new_unchecked(self.frequency, index))
    }

    /// Returns `true` if `cell` belongs to a grid of this frequency.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.frequency() == self.frequency
    }

    /// Neighbors of `cell`, counter-clockwise seen from outside.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> Neighbors {
        debug_assert!(self.contains(cell), "{cell} is not a cell of this grid");
        cell.neighbors()
    }

    /// Unit-sphere position of `cell`, memoized in `cache`.
    #[must_use]
    pub fn position(&self, cell: Cell, cache: &PositionCache) -> DVec3 {
        debug_assert!(self.contains(cell), "{cell} is not a cell of this grid");
        cache.get_or_compute(cell)
    }

    /// Populate `cache` with every cell of this grid.
    pub fn warm_cache(&self, cache: &PositionCache) {
        for cell in self.cells() {
            cache.get_or_compute(cell);
        }
    }

    /// Number of triangles in this grid's projected mesh.
    #[must_use]
    pub fn triangle_count(&self) -> u32 {
        triangle_count(self.cell_count)
    }

    /// Project the grid into a renderable mesh with the default cell inset.
    #[must_use]
    pub fn project_mesh(&self, cache: &PositionCache) -> MeshProjection {
        self.project_mesh_with_inset(cache, DEFAULT_CELL_INSET)
    }

    /// Project the grid into a renderable mesh.
    ///
    /// `inset` is the weight of the cell center when placing each outline
    /// vertex; larger values shrink the drawn cells and widen the gaps.
    #[must_use]
    pub fn project_mesh_with_inset(&self, cache: &PositionCache, inset: f32) -> MeshProjection {
        MeshProjection::build(self, cache, inset)
    }

    /// The cell whose mesh block contains triangle `triangle`.
    ///
    /// Returns `None` for triangle indices past the end of the mesh.
    #[must_use]
    pub fn cell_for_triangle(&self, triangle: u32) -> Option<Cell> {
        if triangle >= self.triangle_count() {
            return None;
        }
        self.cell(block_for_triangle(triangle))
    }
}
