//! Subdivision of the icosahedron faces into the geodesic lattice.
//!
//! Each face is split into `N²` small triangles whose corners are projected
//! radially onto the unit sphere. Lattice points on shared edges and corners
//! are generated by several faces but resolve to one canonical [`Cell`].

use std::collections::BTreeMap;

use glam::DVec3;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::icosahedron;
use crate::rhombus::{Rhombus, resolve};

/// A deduplicated grid point together with the icosahedron faces it lies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPoint {
    /// The canonical cell at this point.
    pub cell: Cell,
    /// Ids of the faces in [`icosahedron::FACES`] containing the point,
    /// ascending. One for face interiors, two on edges, five at corners.
    pub faces: SmallVec<[u8; 5]>,
}

/// Unit-sphere position of lattice point `(a, b)` of `rhombus` at frequency `n`.
///
/// The planar point is interpolated on whichever face of the rhombus contains
/// it, then normalized.
pub(crate) fn lattice_position(rhombus: Rhombus, a: u32, b: u32, n: u32) -> DVec3 {
    let [top, left, bottom, right] = rhombus.corners().map(icosahedron::vertex);
    let n = f64::from(n);
    let (fa, fb) = (f64::from(a), f64::from(b));

    let planar = if fa + fb <= n {
        top + (left - top) * (fa / n) + (right - top) * (fb / n)
    } else {
        bottom + (left - bottom) * ((n - fb) / n) + (right - bottom) * ((n - fa) / n)
    };
    planar.normalize()
}

/// Every lattice point of every face, resolved to its canonical cell.
///
/// Returns one entry per cell (`10·N²+2` in total), ordered by cell index.
/// `frequency` must be a valid grid frequency.
#[must_use]
pub fn grid_points(frequency: u32) -> Vec<GridPoint> {
    let n = i64::from(frequency);
    let mut points: BTreeMap<Cell, SmallVec<[u8; 5]>> = BTreeMap::new();

    for rhombus in Rhombus::ALL {
        let [upper, lower] = rhombus.faces();
        for a in 0..=n {
            for b in 0..=n {
                let cell = Cell::from_location(frequency, resolve(rhombus, a, b, n));
                let faces = points.entry(cell).or_default();
                if a + b <= n && !faces.contains(&(upper as u8)) {
                    faces.push(upper as u8);
                }
                if a + b >= n && !faces.contains(&(lower as u8)) {
                    faces.push(lower as u8);
                }
            }
        }
    }

    points
        .into_iter()
        .map(|(cell, mut faces)| {
            faces.sort_unstable();
            GridPoint { cell, faces }
        })
        .collect()
}

/// The `20·N²` small triangles of the subdivided icosahedron.
///
/// Corners are canonical cells, wound counter-clockwise seen from outside.
/// `frequency` must be a valid grid frequency.
#[must_use]
pub fn triangles(frequency: u32) -> Vec<[Cell; 3]> {
    let n = i64::from(frequency);
    let at = |rhombus: Rhombus, a: i64, b: i64| {
        Cell::from_location(frequency, resolve(rhombus, a, b, n))
    };

    let mut out = Vec::with_capacity(20 * (frequency as usize).pow(2));
    for rhombus in Rhombus::ALL {
        for a in 0..n {
            for b in 0..n {
                out.push([at(rhombus, a, b), at(rhombus, a + 1, b), at(rhombus, a, b + 1)]);
                out.push([
                    at(rhombus, a + 1, b),
                    at(rhombus, a + 1, b + 1),
                    at(rhombus, a, b + 1),
                ]);
            }
        }
    }
    out
}
