//! Geodesic hexagonal grid on the unit sphere: cells, adjacency, positions, and mesh projection.

mod cache;
mod cell;
mod error;
mod grid;
pub mod icosahedron;
mod mesh;
mod picking;
mod query;
mod rhombus;
pub mod subdivision;
mod winding;

pub use cache::PositionCache;
pub use cell::{Cell, Neighbors};
pub use error::GridError;
pub use grid::{GeodesicGrid, build_grid, cell_count};
pub use mesh::{
    BLOCK_VERTICES, CELL_UV, CellVertex, DEFAULT_CELL_INSET, HEXAGON_TRIANGLES, MeshProjection,
    PENTAGON_TRIANGLE_SPAN, PENTAGON_TRIANGLES, block_for_triangle, triangle_count,
    vertex_base_for_triangle,
};
pub use picking::{MeshHit, Ray};
pub use subdivision::GridPoint;
pub use winding::{count_inward_triangles, triangle_winds_outward};
