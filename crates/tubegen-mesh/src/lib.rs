#![warn(missing_docs)]

//! Indexed triangle mesh buffer for the tubegen kernel.
//!
//! A [`MeshBuffer`] holds three parallel arrays:
//! 1. `vertices`: positions, the index is the vertex ID
//! 2. `triangles`: flat index triples with significant winding
//! 3. `uv`: one texture coordinate per vertex
//!
//! Buffers are combined with [`MeshBuffer::concatenate`] and cleaned up with
//! [`MeshBuffer::optimize`], which welds coincident vertices.

mod weld;

use thiserror::Error;
use tubegen_math::{Point3, Transform, Vec2, WELD_TOLERANCE};

pub use weld::weld_map;

/// Violations of the [`MeshBuffer`] invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// `uv` and `vertices` have different lengths.
    #[error("uv count {uv} does not match vertex count {vertices}")]
    UvLengthMismatch {
        /// Number of vertices.
        vertices: usize,
        /// Number of texture coordinates.
        uv: usize,
    },

    /// The index list is not a whole number of triangles.
    #[error("triangle index count {0} is not a multiple of 3")]
    DanglingTriangle(usize),

    /// A triangle references a vertex that does not exist.
    #[error("triangle index {index} at position {position} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// Position in the index list.
        position: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices.
        vertices: usize,
    },

    /// The vertex count no longer fits the `u32` triangle indices.
    #[error("{0} vertices exceed the u32 index range")]
    TooManyVertices(usize),
}

/// Mutable indexed mesh: positions, triangle indices and texture coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices, three per triangle.
    pub triangles: Vec<u32>,
    /// Texture coordinates, one per vertex.
    pub uv: Vec<Vec2>,
}

impl MeshBuffer {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// A unit quad in the XZ plane; its counter-clockwise normal is `-Y`.
    pub fn quad() -> Self {
        let mut mesh = Self::new();
        mesh.add_quad();
        mesh
    }

    /// Replace the contents with a unit quad (4 vertices, 2 triangles).
    pub fn add_quad(&mut self) {
        self.vertices = vec![
            Point3::new(0.5, 0.0, 0.5),
            Point3::new(-0.5, 0.0, 0.5),
            Point3::new(-0.5, 0.0, -0.5),
            Point3::new(0.5, 0.0, -0.5),
        ];
        self.uv = vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ];
        self.triangles = vec![0, 1, 3, 3, 1, 2];
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex indices of triangle `i`.
    pub fn triangle(&self, i: usize) -> [u32; 3] {
        [
            self.triangles[3 * i],
            self.triangles[3 * i + 1],
            self.triangles[3 * i + 2],
        ]
    }

    /// Apply an affine transform to every vertex position in place.
    ///
    /// Texture coordinates and triangles are left untouched.
    pub fn transform(&mut self, transform: &Transform) {
        for v in &mut self.vertices {
            *v = transform.apply_point(v);
        }
    }

    /// A new mesh holding `self` followed by `other`.
    ///
    /// `other`'s triangle indices are offset by `self.num_vertices()`;
    /// neither input is modified. Fails if the combined vertex count cannot
    /// be addressed by `u32` indices.
    pub fn concatenate(&self, other: &MeshBuffer) -> Result<MeshBuffer, MeshError> {
        index_count(self.vertices.len() + other.vertices.len())?;
        let offset = index_count(self.vertices.len())?;

        let mut vertices = Vec::with_capacity(self.vertices.len() + other.vertices.len());
        vertices.extend_from_slice(&self.vertices);
        vertices.extend_from_slice(&other.vertices);

        let mut uv = Vec::with_capacity(self.uv.len() + other.uv.len());
        uv.extend_from_slice(&self.uv);
        uv.extend_from_slice(&other.uv);

        let mut triangles = Vec::with_capacity(self.triangles.len() + other.triangles.len());
        triangles.extend_from_slice(&self.triangles);
        for &i in &other.triangles {
            let index = i
                .checked_add(offset)
                .ok_or_else(|| MeshError::TooManyVertices(i as usize + offset as usize))?;
            triangles.push(index);
        }

        Ok(MeshBuffer {
            vertices,
            triangles,
            uv,
        })
    }

    /// Weld vertices closer than [`WELD_TOLERANCE`].
    ///
    /// Returns the number of removed vertices. See
    /// [`optimize_with_tolerance`](Self::optimize_with_tolerance).
    pub fn optimize(&mut self) -> usize {
        self.optimize_with_tolerance(WELD_TOLERANCE)
    }

    /// Weld vertices closer than `tolerance`.
    ///
    /// Each vertex is merged into the lowest-indexed surviving vertex within
    /// `tolerance`, so any cluster of coincident vertices collapses onto its
    /// first member. Triangles are rewritten to the surviving indices and the
    /// remaining vertices keep their relative order.
    ///
    /// The comparison is strict: two vertices exactly `tolerance` apart stay
    /// separate rather than being merged.
    ///
    /// Comparison is O(n·k) for n vertices and k survivors.
    pub fn optimize_with_tolerance(&mut self, tolerance: f64) -> usize {
        let (remap, kept) = weld_map(&self.vertices, tolerance);
        let removed = self.vertices.len() - kept.len();
        if removed == 0 {
            return 0;
        }

        for index in &mut self.triangles {
            *index = remap[*index as usize];
        }
        self.vertices = kept.iter().map(|&i| self.vertices[i]).collect();
        self.uv = kept.iter().map(|&i| self.uv[i]).collect();

        log::debug!(
            "welded {removed} vertices, {} remain",
            self.vertices.len()
        );
        removed
    }

    /// Check the buffer invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.uv.len() != self.vertices.len() {
            return Err(MeshError::UvLengthMismatch {
                vertices: self.vertices.len(),
                uv: self.uv.len(),
            });
        }
        if self.triangles.len() % 3 != 0 {
            return Err(MeshError::DanglingTriangle(self.triangles.len()));
        }
        let n = self.vertices.len();
        if let Some((position, &index)) = self
            .triangles
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= n)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertices: n,
            });
        }
        Ok(())
    }

    /// Flat position array `[x0, y0, z0, x1, ...]` for GPU upload.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Flat texture coordinate array `[u0, v0, u1, ...]`.
    pub fn uvs_f32(&self) -> Vec<f32> {
        self.uv
            .iter()
            .flat_map(|t| [t.x as f32, t.y as f32])
            .collect()
    }
}

/// `n` as a `u32` vertex count, so every index below it is addressable.
fn index_count(n: usize) -> Result<u32, MeshError> {
    u32::try_from(n).map_err(|_| MeshError::TooManyVertices(n))
}
