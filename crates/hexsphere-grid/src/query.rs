//! Nearest-cell lookup from a hit on the projected mesh.
//!
//! A renderer that hits triangle `t` of a [`MeshProjection`] already knows
//! which block emitted it. The lookup recovers that block's center and picks
//! whichever of the owning cell and its neighbors is closest to it, which
//! costs `O(1)` regardless of grid size.

use glam::DVec3;

use crate::cache::PositionCache;
use crate::cell::Cell;
use crate::grid::GeodesicGrid;
use crate::mesh::{DEFAULT_CELL_INSET, MeshProjection, block_outline};

impl GeodesicGrid {
    /// The cell nearest to a point hit on the projected mesh.
    ///
    /// `triangle_hint` is the index of the mesh triangle containing `point`,
    /// as reported by the renderer for a mesh built with the default inset.
    /// Without a hint there is no lookup and the result is `None`; the same
    /// goes for hints past the end of the mesh and for points that are not
    /// finite, are at the origin, or lie on the far hemisphere from the
    /// hinted block (a stale hint).
    #[must_use]
    pub fn nearest_cell(
        &self,
        point: DVec3,
        triangle_hint: Option<u32>,
        cache: &PositionCache,
    ) -> Option<Cell> {
        let triangle = triangle_hint?;
        let owner = self.cell_for_triangle(triangle)?;
        let center = block_average(owner, cache);
        self.settle(owner, center, point, cache)
    }

    /// Like [`nearest_cell`](Self::nearest_cell), but reads the block from
    /// `mesh`, so meshes projected with a custom inset resolve consistently.
    ///
    /// Returns `None` if `mesh` was projected from a grid of another frequency.
    #[must_use]
    pub fn nearest_cell_in_mesh(
        &self,
        mesh: &MeshProjection,
        point: DVec3,
        triangle_hint: Option<u32>,
        cache: &PositionCache,
    ) -> Option<Cell> {
        if mesh.frequency() != self.frequency() {
            return None;
        }
        let triangle = triangle_hint?;
        let owner = self.cell_for_triangle(triangle)?;
        let center = mesh.block_center(triangle)?.as_dvec3();
        self.settle(owner, center, point, cache)
    }

    fn settle(
        &self,
        owner: Cell,
        block_center: DVec3,
        point: DVec3,
        cache: &PositionCache,
    ) -> Option<Cell> {
        if !point.is_finite() || point.length_squared() == 0.0 {
            return None;
        }
        if point.dot(block_center) <= 0.0 {
            return None;
        }

        let mut best = owner;
        let mut best_dot = block_center.dot(self.position(owner, cache));
        for neighbor in self.neighbors(owner) {
            let dot = block_center.dot(self.position(neighbor, cache));
            if dot > best_dot {
                best = neighbor;
                best_dot = dot;
            }
        }
        Some(best)
    }
}

/// Average of the default-inset block vertices of `cell`, as the mesh emits them.
fn block_average(cell: Cell, cache: &PositionCache) -> DVec3 {
    let mut sum: DVec3 = block_outline(cell, cache, DEFAULT_CELL_INSET)
        .map(|v| v.as_dvec3())
        .sum();
    if cell.is_pentagon() {
        sum += cache.get_or_compute(cell).as_vec3().as_dvec3();
    }
    sum / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centroid(mesh: &MeshProjection, triangle: u32) -> DVec3 {
        let [a, b, c] = mesh.triangles[triangle as usize];
        (mesh.vertices[a as usize] + mesh.vertices[b as usize] + mesh.vertices[c as usize])
            .as_dvec3()
            / 3.0
    }

    #[test]
    fn test_point_on_triangle_resolves_to_owner() {
        for n in [1, 2, 5] {
            let grid = GeodesicGrid::new(n).unwrap();
            let cache = PositionCache::new();
            let mesh = grid.project_mesh(&cache);
            for t in 0..mesh.triangle_count() as u32 {
                let point = centroid(&mesh, t);
                assert_eq!(
                    grid.nearest_cell(point, Some(t), &cache),
                    grid.cell_for_triangle(t),
                    "triangle {t} at N={n}"
                );
            }
        }
    }

    #[test]
    fn test_no_hint_returns_none() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        assert_eq!(grid.nearest_cell(DVec3::Y, None, &cache), None);
    }

    #[test]
    fn test_out_of_range_hint_returns_none() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        let past_end = grid.triangle_count();
        assert_eq!(grid.nearest_cell(DVec3::Y, Some(past_end), &cache), None);
        assert_eq!(grid.nearest_cell(DVec3::Y, Some(u32::MAX), &cache), None);
    }

    #[test]
    fn test_degenerate_points_return_none() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        assert_eq!(grid.nearest_cell(DVec3::ZERO, Some(0), &cache), None);
        assert_eq!(grid.nearest_cell(DVec3::NAN, Some(0), &cache), None);
        assert_eq!(
            grid.nearest_cell(DVec3::new(f64::INFINITY, 0.0, 0.0), Some(0), &cache),
            None
        );
    }

    #[test]
    fn test_stale_hint_on_far_side_returns_none() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        // Triangle 0 belongs to the north pole block.
        assert_eq!(grid.nearest_cell(DVec3::Y, Some(0), &cache), grid.cell(0));
        assert_eq!(grid.nearest_cell(DVec3::NEG_Y, Some(0), &cache), None);
    }

    #[test]
    fn test_block_average_matches_mesh() {
        let grid = GeodesicGrid::new(4).unwrap();
        let cache = PositionCache::new();
        let mesh = grid.project_mesh(&cache);
        for t in (0..mesh.triangle_count() as u32).step_by(11) {
            let owner = grid.cell_for_triangle(t).unwrap();
            let expected = mesh.block_center(t).unwrap().as_dvec3();
            assert!((block_average(owner, &cache) - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_custom_inset_mesh_resolves_to_owner() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        let mesh = grid.project_mesh_with_inset(&cache, 0.3);
        for t in 0..mesh.triangle_count() as u32 {
            let point = centroid(&mesh, t);
            assert_eq!(
                grid.nearest_cell_in_mesh(&mesh, point, Some(t), &cache),
                grid.cell_for_triangle(t)
            );
        }
    }

    #[test]
    fn test_mesh_of_other_frequency_is_rejected() {
        let grid = GeodesicGrid::new(3).unwrap();
        let other = GeodesicGrid::new(4).unwrap();
        let cache = PositionCache::new();
        let mesh = other.project_mesh(&cache);
        assert_eq!(grid.nearest_cell_in_mesh(&mesh, DVec3::Y, Some(0), &cache), None);
    }
}
