//! Ray picking against the projected mesh.

use glam::DVec3;

use crate::cache::PositionCache;
use crate::cell::Cell;
use crate::grid::GeodesicGrid;
use crate::mesh::MeshProjection;

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Slack on the barycentric bounds so hits on shared edges are not lost.
const EDGE_EPSILON: f64 = 1e-9;

/// A ray in the grid's local frame (unit sphere at the origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction, or zero for a degenerate ray that hits nothing.
    pub direction: DVec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Maps a world-space ray into the local frame of an overlay drawn around
    /// a sphere at `center` with `radius`, scaled by `overlay_scale`.
    ///
    /// Distances along the local ray are in units of `radius * overlay_scale`.
    #[must_use]
    pub fn to_local(
        origin: DVec3,
        direction: DVec3,
        center: DVec3,
        radius: f64,
        overlay_scale: f64,
    ) -> Self {
        let scale = radius * overlay_scale;
        Self::new((origin - center) / scale, direction)
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// The nearest mesh triangle hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshHit {
    /// Index into [`MeshProjection::triangles`].
    pub triangle: u32,
    /// Intersection point in the grid's local frame.
    pub point: DVec3,
    /// Distance from the ray origin to `point`.
    pub distance: f64,
}

/// Möller–Trumbore intersection; returns the ray parameter of the hit.
fn ray_triangle_intersection(ray: &Ray, v0: DVec3, v1: DVec3, v2: DVec3) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let f = 1.0 / det;

    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(-EDGE_EPSILON..=1.0 + EDGE_EPSILON).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < -EDGE_EPSILON || u + v > 1.0 + EDGE_EPSILON {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > 0.0).then_some(t)
}

impl MeshProjection {
    /// The nearest triangle hit by `ray`, if any.
    ///
    /// Tests every triangle; callers picking many rays per frame against a
    /// fine grid should narrow the search first.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<MeshHit> {
        let mut nearest: Option<(u32, f64)> = None;
        for (index, tri) in self.triangles.iter().enumerate() {
            let [v0, v1, v2] = tri.map(|i| self.vertices[i as usize].as_dvec3());
            let Some(t) = ray_triangle_intersection(ray, v0, v1, v2) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| t < best) {
                nearest = Some((index as u32, t));
            }
        }
        nearest.map(|(triangle, distance)| MeshHit {
            triangle,
            point: ray.at(distance),
            distance,
        })
    }
}

impl GeodesicGrid {
    /// The cell under `ray`, resolved through the nearest mesh hit.
    ///
    /// Returns `None` when the ray misses the mesh, including rays passing
    /// through the gaps between cells.
    #[must_use]
    pub fn pick(&self, mesh: &MeshProjection, ray: &Ray, cache: &PositionCache) -> Option<Cell> {
        let hit = mesh.raycast(ray)?;
        self.nearest_cell_in_mesh(mesh, hit.point, Some(hit.triangle), cache)
    }
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
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction - DVec3::Z).length() < 1e-12);
        assert!((ray.at(2.0) - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_single_triangle_hit_and_miss() {
        let (v0, v1, v2) = (DVec3::ZERO, DVec3::X, DVec3::Y);
        let down = Ray::new(DVec3::new(0.2, 0.2, 1.0), DVec3::NEG_Z);
        let t = ray_triangle_intersection(&down, v0, v1, v2).unwrap();
        assert!((t - 1.0).abs() < 1e-12);

        let outside = Ray::new(DVec3::new(0.8, 0.8, 1.0), DVec3::NEG_Z);
        assert!(ray_triangle_intersection(&outside, v0, v1, v2).is_none());

        let behind = Ray::new(DVec3::new(0.2, 0.2, 1.0), DVec3::Z);
        assert!(ray_triangle_intersection(&behind, v0, v1, v2).is_none());

        let parallel = Ray::new(DVec3::new(0.2, 0.2, 1.0), DVec3::X);
        assert!(ray_triangle_intersection(&parallel, v0, v1, v2).is_none());
    }

    #[test]
    fn test_raycast_toward_triangle_hits_its_block() {
        let grid = GeodesicGrid::new(2).unwrap();
        let cache = PositionCache::new();
        let mesh = grid.project_mesh(&cache);
        for t in 0..mesh.triangle_count() as u32 {
            let target = centroid(&mesh, t);
            let ray = Ray::new(target * 3.0, -target);
            let hit = mesh.raycast(&ray).unwrap();
            assert_eq!(grid.cell_for_triangle(hit.triangle), grid.cell_for_triangle(t));
            assert!((hit.distance - (ray.origin - hit.point).length()).abs() < 1e-9);
            assert_eq!(grid.pick(&mesh, &ray, &cache), grid.cell_for_triangle(t));
        }
    }

    #[test]
    fn test_raycast_reports_nearest_hit() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        let mesh = grid.project_mesh(&cache);
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::NEG_Y);
        let hit = mesh.raycast(&ray).unwrap();
        // The front face is near +Y, not the back face near -Y.
        assert!(hit.point.y > 0.9);
        assert_eq!(grid.pick(&mesh, &ray, &cache), grid.cell(0));
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let grid = GeodesicGrid::new(3).unwrap();
        let cache = PositionCache::new();
        let mesh = grid.project_mesh(&cache);
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::Y);
        assert!(mesh.raycast(&ray).is_none());
        assert_eq!(grid.pick(&mesh, &ray, &cache), None);

        let degenerate = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::ZERO);
        assert!(mesh.raycast(&degenerate).is_none());
    }

    #[test]
    fn test_world_ray_to_local() {
        let center = DVec3::new(100.0, -20.0, 7.0);
        let radius = 50.0;
        let scale = 1.025;
        let ray = Ray::to_local(
            center + DVec3::new(0.0, 200.0, 0.0),
            DVec3::new(0.0, -3.0, 0.0),
            center,
            radius,
            scale,
        );
        assert!((ray.origin - DVec3::new(0.0, 200.0 / (radius * scale), 0.0)).length() < 1e-12);
        assert!((ray.direction - DVec3::NEG_Y).length() < 1e-12);

        let grid = GeodesicGrid::new(4).unwrap();
        let cache = PositionCache::new();
        let mesh = grid.project_mesh(&cache);
        assert_eq!(grid.pick(&mesh, &ray, &cache), grid.cell(0));
    }
}
