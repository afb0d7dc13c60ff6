//! Cell identity, classification, and closed-form adjacency.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::grid::{GeodesicGrid, cell_count};
use crate::icosahedron;
use crate::rhombus::{Hemisphere, Location, Rhombus, resolve};
use crate::subdivision::lattice_position;

/// Neighbors of a cell in counter-clockwise order (5 for pentagons, 6 for hexagons).
pub type Neighbors = SmallVec<[Cell; 6]>;

/// Lattice steps around a hexagon, counter-clockwise seen from outside.
const HEX_OFFSETS: [(i64, i64); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// A single addressable cell of a geodesic grid.
///
/// Cells are plain values: the owning grid's frequency travels with the
/// index, so adjacency and position are pure functions of the cell itself.
///
/// Index layout for frequency `N`:
/// - `0`, `1`: north and south pole
/// - `2..7`: upper ring of icosahedron vertices, `7..12`: lower ring
/// - `12..10·N²+2`: hexagons, rhombus by rhombus, row-major within a rhombus
///
/// The first twelve indices are always the pentagons, whatever `N` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "CellKey", try_from = "CellKey")]
pub struct Cell {
    frequency: u32,
    index: u32,
}

/// Serialized form of a [`Cell`], validated on the way back in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct CellKey {
    frequency: u32,
    index: u32,
}

impl Cell {
    /// Number of pentagonal cells in every grid.
    pub const PENTAGON_COUNT: u32 = icosahedron::VERTEX_COUNT as u32;

    /// Look up a cell by index in the grid of the given frequency.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidFrequency`] or [`GridError::FrequencyTooLarge`]
    /// for a frequency no grid can have, and [`GridError::CellOutOfRange`] if
    /// `index` is not below `10·N²+2`.
    pub fn from_index(frequency: u32, index: u32) -> Result<Self, GridError> {
        GeodesicGrid::validate_frequency(i64::from(frequency))?;
        let count = cell_count(frequency);
        if index >= count {
            return Err(GridError::CellOutOfRange {
                frequency,
                index,
                count,
            });
        }
        Ok(Self { frequency, index })
    }

    /// Construct without validation. Caller guarantees the index is in range.
    pub(crate) fn new_unchecked(frequency: u32, index: u32) -> Self {
        debug_assert!(index < cell_count(frequency));
        Self { frequency, index }
    }

    /// Stable index of this cell within its grid.
    #[inline]
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Subdivision frequency of the grid this cell belongs to.
    #[inline]
    #[must_use]
    pub fn frequency(self) -> u32 {
        self.frequency
    }

    /// `true` for the twelve cells sitting on icosahedron vertices.
    #[inline]
    #[must_use]
    pub fn is_pentagon(self) -> bool {
        self.index < Self::PENTAGON_COUNT
    }

    /// Neighboring cells, counter-clockwise when viewed from outside the sphere.
    ///
    /// Computed from the index alone; no adjacency table is stored anywhere.
    #[must_use]
    pub fn neighbors(self) -> Neighbors {
        let n = i64::from(self.frequency);
        let mut out = Neighbors::new();
        match self.location() {
            Location::NorthPole => {
                for column in 0..5 {
                    out.push(self.sibling(resolve(Rhombus::north(column), 1, 0, n)));
                }
            }
            Location::SouthPole => {
                // Eastward is clockwise when looking up at the south pole.
                for column in (0..5).rev() {
                    out.push(self.sibling(resolve(Rhombus::south(column), n, n - 1, n)));
                }
            }
            Location::Lattice { rhombus, a, b } => {
                let (a, b) = (i64::from(a), i64::from(b));
                for (da, db) in HEX_OFFSETS {
                    let neighbor = self.sibling(resolve(rhombus, a + da, b + db, n));
                    // Around a pentagon two offsets fold onto the same cell.
                    if !out.contains(&neighbor) {
                        out.push(neighbor);
                    }
                }
            }
        }
        debug_assert_eq!(out.len(), if self.is_pentagon() { 5 } else { 6 });
        out
    }

    /// Unit-sphere position, computed from scratch.
    ///
    /// Prefer [`GeodesicGrid::position`], which memoizes through a
    /// [`PositionCache`](crate::PositionCache).
    #[must_use]
    pub fn compute_position(self) -> DVec3 {
        match self.location() {
            Location::NorthPole => icosahedron::vertex(icosahedron::NORTH_POLE),
            Location::SouthPole => icosahedron::vertex(icosahedron::SOUTH_POLE),
            Location::Lattice { rhombus, a, b } => lattice_position(rhombus, a, b, self.frequency),
        }
    }

    fn sibling(self, location: Location) -> Cell {
        Cell::new_unchecked(self.frequency, encode(location, self.frequency))
    }

    pub(crate) fn from_location(frequency: u32, location: Location) -> Cell {
        Cell::new_unchecked(frequency, encode(location, frequency))
    }

    pub(crate) fn location(self) -> Location {
        decode(self.index, self.frequency)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl From<Cell> for CellKey {
    fn from(cell: Cell) -> Self {
        Self {
            frequency: cell.frequency,
            index: cell.index,
        }
    }
}

impl TryFrom<CellKey> for Cell {
    type Error = GridError;

    fn try_from(key: CellKey) -> Result<Self, Self::Error> {
        Cell::from_index(key.frequency, key.index)
    }
}

/// Hexagons owned by each rhombus: its `N×N` points minus the left corner.
fn hexagons_per_rhombus(n: u32) -> u32 {
    n * n - 1
}

/// Row-major position of the left corner `(N, 0)` inside a rhombus.
fn corner_slot(n: u32) -> u32 {
    (n - 1) * n
}

fn encode(location: Location, n: u32) -> u32 {
    match location {
        Location::NorthPole => 0,
        Location::SouthPole => 1,
        Location::Lattice { rhombus, a, b } if a == n && b == 0 => {
            let ring = match rhombus.hemisphere {
                Hemisphere::North => icosahedron::upper(rhombus.column as usize),
                Hemisphere::South => icosahedron::lower(rhombus.column as usize),
            };
            ring as u32
        }
        Location::Lattice { rhombus, a, b } => {
            let slot = (a - 1) * n + b;
            let slot = if slot > corner_slot(n) { slot - 1 } else { slot };
            Cell::PENTAGON_COUNT + rhombus.id() as u32 * hexagons_per_rhombus(n) + slot
        }
    }
}

fn decode(index: u32, n: u32) -> Location {
    match index {
        0 => Location::NorthPole,
        1 => Location::SouthPole,
        2..=6 => Location::Lattice {
            rhombus: Rhombus::north((index - 2) as u8),
            a: n,
            b: 0,
        },
        7..=11 => Location::Lattice {
            rhombus: Rhombus::south((index - 7) as u8),
            a: n,
            b: 0,
        },
        _ => {
            let per = hexagons_per_rhombus(n);
            debug_assert!(per > 0, "frequency 1 has no hexagons");
            let hex = index - Cell::PENTAGON_COUNT;
            let slot = hex % per;
            let slot = if slot >= corner_slot(n) { slot + 1 } else { slot };
            Location::Lattice {
                rhombus: Rhombus::from_id((hex / per) as usize),
                a: slot / n + 1,
                b: slot % n,
            }
        }
    }
}
