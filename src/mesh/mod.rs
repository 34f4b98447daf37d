//! Indexed vertex/index buffers from simplices
//!
//! Converts triangle and tetrahedron lists into flat, renderer-friendly
//! buffers where each distinct vertex is stored once.

mod surface;

pub use surface::{extract_surface_faces, extract_surface_faces_with_tolerance, index_surface, SurfaceFace};

use std::collections::HashMap;

use tracing::error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::geometry::{Point3D, Tetrahedron, Triangle, VertexKey, EPSILON};

/// Engine-agnostic indexed mesh
///
/// Contains raw vertex data suitable for any renderer:
/// - `vertices`: flattened `x, y, z` triples
/// - `indices`: three entries per triangle into the vertex list
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<f64>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `index` as a point, if it exists
    pub fn vertex(&self, index: usize) -> Option<Point3D> {
        let xyz = self.vertices.get(index * 3..index * 3 + 3)?;
        Some(Point3D::new(xyz[0], xyz[1], xyz[2]))
    }

    /// Vertex positions narrowed to `f32` for GPU upload
    pub fn positions_f32(&self) -> Vec<[f32; 3]> {
        self.vertices
            .chunks_exact(3)
            .map(|xyz| [xyz[0] as f32, xyz[1] as f32, xyz[2] as f32])
            .collect()
    }

    /// Check buffer shape and index bounds
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidMesh`] if either buffer length is not
    /// a multiple of 3, a coordinate is not finite, or an index points past
    /// the vertex list.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(KernelError::InvalidMesh(format!(
                "vertex buffer length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(KernelError::InvalidMesh(format!(
                "index buffer length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(position) = self.vertices.iter().position(|c| !c.is_finite()) {
            return Err(KernelError::InvalidMesh(format!(
                "non-finite coordinate in vertex {}",
                position / 3
            )));
        }

        let count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(KernelError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                index, count
            )));
        }
        Ok(())
    }
}

/// Deduplicating vertex sink
struct VertexIndexer {
    tolerance: f64,
    slots: HashMap<VertexKey, u32>,
    buffers: MeshBuffers,
}

impl VertexIndexer {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            slots: HashMap::new(),
            buffers: MeshBuffers::default(),
        }
    }

    /// Index of `point`, appending it on first sight
    fn index(&mut self, point: Point3D) -> Result<u32> {
        let key = point.key(self.tolerance);
        if let Some(&index) = self.slots.get(&key) {
            return Ok(index);
        }
        let index = slot_index(self.slots.len())?;
        self.slots.insert(key, index);
        self.buffers.vertices.extend([point.x, point.y, point.z]);
        Ok(index)
    }

    /// Append one triangle; nothing reaches the index buffer on error
    fn push_triangle(&mut self, [a, b, c]: [Point3D; 3]) -> Result<()> {
        let corners = [self.index(a)?, self.index(b)?, self.index(c)?];
        self.buffers.indices.extend(corners);
        Ok(())
    }

    fn finish(self) -> MeshBuffers {
        self.buffers
    }
}

/// Index handed to the vertex stored after `count` others
fn slot_index(count: usize) -> Result<u32> {
    u32::try_from(count)
        .map_err(|_| KernelError::InvalidMesh(format!("vertex {} does not fit a u32 index", count)))
}

/// Index triangles until the index space runs out
///
/// Past `u32::MAX + 1` distinct vertices the remaining triangles are dropped
/// and the overflow is logged with `error!`; the buffers stay valid.
pub(crate) fn index_all(tolerance: f64, triangles: impl IntoIterator<Item = [Point3D; 3]>) -> MeshBuffers {
    let mut indexer = VertexIndexer::new(tolerance);
    for (indexed, points) in triangles.into_iter().enumerate() {
        if let Err(err) = indexer.push_triangle(points) {
            error!(%err, indexed, "index space exhausted, remaining triangles dropped");
            break;
        }
    }
    indexer.finish()
}

/// Index planar triangles at `z = 0` with the default vertex tolerance
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::*;
///
/// let a = Triangle::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), Point2D::new(0.0, 1.0));
/// let b = Triangle::new(Point2D::new(1.0, 0.0), Point2D::new(1.0, 1.0), Point2D::new(0.0, 1.0));
///
/// let mesh = index_triangles(&[a, b]);
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
/// ```
pub fn index_triangles(triangles: &[Triangle]) -> MeshBuffers {
    index_triangles_with_tolerance(triangles, EPSILON)
}

/// Index planar triangles with an explicit vertex tolerance
///
/// Indices are `u32`: a mesh with more than `u32::MAX + 1` distinct vertices
/// is cut short at the first triangle that does not fit, and an error is
/// logged.
pub fn index_triangles_with_tolerance(triangles: &[Triangle], tolerance: f64) -> MeshBuffers {
    index_all(tolerance, triangles.iter().map(|t| t.points.map(Point3D::from)))
}

/// Index every face of every tetrahedron
///
/// Faces shared by two tetrahedra appear twice in the index buffer; use
/// [`extract_surface_faces`] first to keep only the hull.
pub fn index_tetrahedra(tetrahedra: &[Tetrahedron]) -> MeshBuffers {
    index_tetrahedra_with_tolerance(tetrahedra, EPSILON)
}

/// Same limit on distinct vertices as [`index_triangles_with_tolerance`]
pub fn index_tetrahedra_with_tolerance(tetrahedra: &[Tetrahedron], tolerance: f64) -> MeshBuffers {
    index_all(tolerance, tetrahedra.iter().flat_map(Tetrahedron::faces))
}
