//! Projection of the grid into a renderable overlay mesh.
//!
//! Every cell becomes a block of exactly [`BLOCK_VERTICES`] vertices: an inset
//! outline vertex between each consecutive pair of neighbors, plus the cell
//! center for pentagons (which only have five outline vertices). Pentagons
//! are fanned into five triangles around their center; hexagons are cut into
//! four triangles. Blocks are laid out in cell index order, so pentagon
//! triangles come first and the owning cell of any triangle follows from its
//! index alone (see [`block_for_triangle`]).

use glam::{DVec3, Vec2, Vec3};
use tracing::debug;

use crate::cache::PositionCache;
use crate::cell::Cell;
use crate::grid::GeodesicGrid;

/// Vertices emitted per cell.
pub const BLOCK_VERTICES: u32 = 6;

/// Triangles emitted per pentagon.
pub const PENTAGON_TRIANGLES: u32 = 5;

/// Triangles emitted per hexagon.
pub const HEXAGON_TRIANGLES: u32 = 4;

/// Triangles covered by the twelve leading pentagon blocks.
pub const PENTAGON_TRIANGLE_SPAN: u32 = Cell::PENTAGON_COUNT * PENTAGON_TRIANGLES;

/// Default weight of the cell center when placing outline vertices.
pub const DEFAULT_CELL_INSET: f32 = 0.08;

/// Texture coordinate given to every overlay vertex.
pub const CELL_UV: Vec2 = Vec2::new(0.25, 0.25);

/// Hexagon triangulation within a block: three corner ears and a center triangle.
const HEXAGON_INDICES: [[u32; 3]; HEXAGON_TRIANGLES as usize] =
    [[0, 1, 2], [2, 3, 4], [4, 5, 0], [0, 2, 4]];

/// Number of mesh triangles for a grid with `cell_count` cells.
#[inline]
#[must_use]
pub fn triangle_count(cell_count: u32) -> u32 {
    PENTAGON_TRIANGLE_SPAN + (cell_count - Cell::PENTAGON_COUNT) * HEXAGON_TRIANGLES
}

/// Index of the block (and thus of the cell) that emitted `triangle`.
///
/// Does not check that `triangle` exists; see
/// [`GeodesicGrid::cell_for_triangle`] for the checked form.
#[inline]
#[must_use]
pub fn block_for_triangle(triangle: u32) -> u32 {
    if triangle < PENTAGON_TRIANGLE_SPAN {
        triangle / PENTAGON_TRIANGLES
    } else {
        (triangle - PENTAGON_TRIANGLE_SPAN) / HEXAGON_TRIANGLES + Cell::PENTAGON_COUNT
    }
}

/// First vertex index of the block that emitted `triangle`.
#[inline]
#[must_use]
pub fn vertex_base_for_triangle(triangle: u32) -> u32 {
    block_for_triangle(triangle) * BLOCK_VERTICES
}

/// A renderer-ready overlay mesh with one fixed-size block per cell.
///
/// Positions are on (or just inside) the unit sphere in the grid's local
/// frame. Triangles wind counter-clockwise seen from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshProjection {
    frequency: u32,
    /// Vertex positions, [`BLOCK_VERTICES`] per cell in cell index order.
    pub vertices: Vec<Vec3>,
    /// Vertex normals (the normalized vertex directions).
    pub normals: Vec<Vec3>,
    /// Texture coordinates, one per vertex.
    pub uvs: Vec<Vec2>,
    /// Triangle vertex indices.
    pub triangles: Vec<[u32; 3]>,
}

/// Interleaved vertex layout for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellVertex {
    /// Position in the grid's local frame.
    pub position: [f32; 3],
    /// Outward normal.
    pub normal: [f32; 3],
    /// Overlay texture coordinate.
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(CellVertex, [u8; 32]);

impl MeshProjection {
    pub(crate) fn build(grid: &GeodesicGrid, cache: &PositionCache, inset: f32) -> Self {
        let cells = grid.cell_count() as usize;
        let mut vertices = Vec::with_capacity(cells * BLOCK_VERTICES as usize);
        let mut triangles = Vec::with_capacity(grid.triangle_count() as usize);

        for cell in grid.cells() {
            let base = vertices.len() as u32;
            vertices.extend(block_outline(cell, cache, inset));

            if cell.is_pentagon() {
                vertices.push(cache.get_or_compute(cell).as_vec3());
                let center = base + PENTAGON_TRIANGLES;
                for i in 0..PENTAGON_TRIANGLES {
                    triangles.push([center, base + i, base + (i + 1) % PENTAGON_TRIANGLES]);
                }
            } else {
                triangles.extend(HEXAGON_INDICES.map(|tri| tri.map(|k| base + k)));
            }
        }

        let normals = vertices.iter().map(|v| v.normalize_or_zero()).collect();
        let uvs = vec![CELL_UV; vertices.len()];

        debug!(
            frequency = grid.frequency(),
            vertices = vertices.len(),
            triangles = triangles.len(),
            "Projected grid mesh"
        );

        Self {
            frequency: grid.frequency(),
            vertices,
            normals,
            uvs,
            triangles,
        }
    }

    /// Frequency of the grid this mesh was projected from.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// The [`BLOCK_VERTICES`] vertices emitted for `cell`.
    ///
    /// Returns `None` if the cell is not part of this mesh.
    #[must_use]
    pub fn block_vertices(&self, cell: Cell) -> Option<&[Vec3]> {
        if cell.frequency() != self.frequency {
            return None;
        }
        let start = (cell.index() * BLOCK_VERTICES) as usize;
        self.vertices.get(start..start + BLOCK_VERTICES as usize)
    }

    /// Average of the block vertices of the cell that emitted `triangle`.
    ///
    /// This approximates the cell center; the outline vertices are inset, so
    /// the average sits slightly inside the sphere.
    #[must_use]
    pub fn block_center(&self, triangle: u32) -> Option<Vec3> {
        if triangle as usize >= self.triangles.len() {
            return None;
        }
        let base = vertex_base_for_triangle(triangle) as usize;
        let block = self.vertices.get(base..base + BLOCK_VERTICES as usize)?;
        Some(block.iter().copied().sum::<Vec3>() / BLOCK_VERTICES as f32)
    }

    /// Interleave positions, normals and UVs for upload.
    #[must_use]
    pub fn to_gpu_vertices(&self) -> Vec<CellVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| CellVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    /// Triangle indices flattened into a single index buffer.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// Outline vertices of `cell`'s block, one per consecutive neighbor pair.
///
/// Each sits at the normalized centroid of the cell and the pair, pulled
/// toward the cell center by `inset`.
pub(crate) fn block_outline(
    cell: Cell,
    cache: &PositionCache,
    inset: f32,
) -> impl Iterator<Item = Vec3> {
    let center = cache.get_or_compute(cell);
    let ring: Vec<DVec3> = cell
        .neighbors()
        .iter()
        .map(|&n| cache.get_or_compute(n))
        .collect();
    let blend = f64::from(inset);

    (0..ring.len()).map(move |i| {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let corner = (a + b + center).normalize();
        (center * blend + corner * (1.0 - blend)).as_vec3()
    })
}
