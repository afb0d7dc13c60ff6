//! Winding order checks for triangles on the sphere.

use glam::DVec3;

/// `true` if `v0 → v1 → v2` turns counter-clockwise seen from outside the
/// sphere centered at the origin.
#[must_use]
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Number of triangles in an index list that wind inward.
///
/// A correctly projected mesh reports zero.
#[must_use]
pub fn count_inward_triangles(vertices: &[glam::Vec3], triangles: &[[u32; 3]]) -> usize {
    triangles
        .iter()
        .filter(|tri| {
            let [a, b, c] = tri.map(|i| vertices[i as usize].as_dvec3());
            !triangle_winds_outward(a, b, c)
        })
        .count()
}
