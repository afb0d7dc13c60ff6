//! The regular icosahedron the geodesic grid is subdivided from.
//!
//! The polar axis is `+Y`. Vertex ids follow the pentagon cell order: the two
//! poles, then the upper ring, then the lower ring. Ring vertices advance
//! counter-clockwise when viewed from above the north pole, and every lower
//! ring vertex sits half a step east of the upper vertex with the same
//! column.

use std::f64::consts::TAU;

use glam::DVec3;

/// Number of icosahedron vertices (and pentagon cells).
pub const VERTEX_COUNT: usize = 12;

/// Number of icosahedron faces.
pub const FACE_COUNT: usize = 20;

/// Vertex id of the north pole (`+Y`).
pub const NORTH_POLE: usize = 0;

/// Vertex id of the south pole (`−Y`).
pub const SOUTH_POLE: usize = 1;

/// Number of vertices in each of the two rings.
pub const RING_SIZE: usize = 5;

/// Vertex id of the upper ring vertex in `column` (wraps modulo 5).
#[inline]
#[must_use]
pub fn upper(column: usize) -> usize {
    2 + column % RING_SIZE
}

/// Vertex id of the lower ring vertex in `column` (wraps modulo 5).
#[inline]
#[must_use]
pub fn lower(column: usize) -> usize {
    2 + RING_SIZE + column % RING_SIZE
}

/// Faces as counter-clockwise (seen from outside) vertex id triples.
///
/// Faces come in pairs: `2r` and `2r + 1` make up rhombus `r`, where
/// rhombi `0..5` touch the north pole and `5..10` touch the south pole.
pub const FACES: [[usize; 3]; FACE_COUNT] = [
    [0, 2, 3],
    [2, 7, 3],
    [0, 3, 4],
    [3, 8, 4],
    [0, 4, 5],
    [4, 9, 5],
    [0, 5, 6],
    [5, 10, 6],
    [0, 6, 2],
    [6, 11, 2],
    [3, 7, 8],
    [7, 1, 8],
    [4, 8, 9],
    [8, 1, 9],
    [5, 9, 10],
    [9, 1, 10],
    [6, 10, 11],
    [10, 1, 11],
    [2, 11, 7],
    [11, 1, 7],
];

/// Unit-sphere position of icosahedron vertex `id`.
///
/// Ids outside `0..12` are a caller bug.
#[must_use]
pub fn vertex(id: usize) -> DVec3 {
    debug_assert!(id < VERTEX_COUNT, "icosahedron vertex {id} out of range");

    // Ring height and radius: every edge subtends acos(1/sqrt(5)).
    let height = 1.0 / 5.0_f64.sqrt();
    let radius = 2.0 * height;

    match id {
        NORTH_POLE => DVec3::Y,
        SOUTH_POLE => DVec3::NEG_Y,
        2..=6 => ring_point((id - 2) as f64, height, radius),
        _ => ring_point((id - 7) as f64 + 0.5, -height, radius),
    }
}

/// All twelve vertices in id order.
#[must_use]
pub fn vertices() -> [DVec3; VERTEX_COUNT] {
    std::array::from_fn(vertex)
}

fn ring_point(step: f64, height: f64, radius: f64) -> DVec3 {
    let angle = TAU * step / RING_SIZE as f64;
    DVec3::new(radius * angle.sin(), height, radius * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::winding::triangle_winds_outward;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_vertices_are_unit_length() {
        for (id, v) in vertices().iter().enumerate() {
            assert!(
                (v.length() - 1.0).abs() < EPSILON,
                "vertex {id} has length {}",
                v.length()
            );
        }
    }

    #[test]
    fn test_all_face_edges_have_equal_length() {
        let verts = vertices();
        let expected = (verts[0] - verts[2]).length();
        for face in FACES {
            for k in 0..3 {
                let edge = (verts[face[k]] - verts[face[(k + 1) % 3]]).length();
                assert!(
                    (edge - expected).abs() < EPSILON,
                    "face {face:?} edge {k} has length {edge}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn test_faces_wind_outward() {
        let verts = vertices();
        for face in FACES {
            assert!(
                triangle_winds_outward(verts[face[0]], verts[face[1]], verts[face[2]]),
                "face {face:?} winds inward"
            );
        }
    }

    #[test]
    fn test_every_vertex_touches_five_faces() {
        let mut counts = [0usize; VERTEX_COUNT];
        for face in FACES {
            for id in face {
                counts[id] += 1;
            }
        }
        assert_eq!(counts, [5; VERTEX_COUNT]);
    }

    #[test]
    fn test_every_edge_is_shared_by_two_faces() {
        let mut edges = std::collections::HashMap::new();
        for face in FACES {
            for k in 0..3 {
                let (a, b) = (face[k], face[(k + 1) % 3]);
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        assert_eq!(edges.len(), 30);
        assert!(edges.values().all(|&count| count == 2));
    }

    #[test]
    fn test_ring_helpers_wrap() {
        assert_eq!(upper(0), 2);
        assert_eq!(upper(5), 2);
        assert_eq!(lower(4), 11);
        assert_eq!(lower(6), 8);
    }
}
