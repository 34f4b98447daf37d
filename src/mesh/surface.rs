//! Boundary faces of a tetrahedral mesh
//!
//! A face shared by two tetrahedra is internal; a face that belongs to a
//! single tetrahedron lies on the surface.

use std::collections::HashMap;

use glam::DVec3;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{index_all, MeshBuffers};
use crate::geometry::{Point3D, Tetrahedron, VertexKey, EPSILON};

/// Surface triangle with its outward unit normal
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFace {
    pub points: [Point3D; 3],
    pub normal: Point3D,
}

/// Extract surface faces with the default vertex tolerance
///
/// # Arguments
///
/// * `tetrahedra` - Mesh to inspect, typically the output of
///   [`triangulate3d`](crate::triangulate3d)
///
/// # Returns
///
/// Faces that occur exactly once, in first-seen order, wound so that their
/// normal points away from the mesh centroid (the mean of the tetrahedron
/// centroids).
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::*;
///
/// let tetrahedron = Tetrahedron::new(
///     Point3D::new(0.0, 0.0, 0.0),
///     Point3D::new(1.0, 0.0, 0.0),
///     Point3D::new(0.0, 1.0, 0.0),
///     Point3D::new(0.0, 0.0, 1.0),
/// );
/// let faces = extract_surface_faces(&[tetrahedron]);
/// assert_eq!(faces.len(), 4);
/// ```
pub fn extract_surface_faces(tetrahedra: &[Tetrahedron]) -> Vec<SurfaceFace> {
    extract_surface_faces_with_tolerance(tetrahedra, EPSILON)
}

pub fn extract_surface_faces_with_tolerance(tetrahedra: &[Tetrahedron], tolerance: f64) -> Vec<SurfaceFace> {
    if tetrahedra.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<[VertexKey; 3], usize> = HashMap::new();
    let mut order: Vec<([VertexKey; 3], [Point3D; 3])> = Vec::new();
    for tetrahedron in tetrahedra {
        for face in tetrahedron.faces() {
            let mut key = face.map(|p| p.key(tolerance));
            key.sort_unstable();
            let count = counts.entry(key).or_insert(0);
            if *count == 0 {
                order.push((key, face));
            }
            *count += 1;
        }
    }

    let center = tetrahedra
        .iter()
        .map(|t| DVec3::from(t.centroid()))
        .sum::<DVec3>()
        / tetrahedra.len() as f64;

    let faces: Vec<SurfaceFace> = order
        .into_iter()
        .filter(|(key, _)| counts.get(key) == Some(&1))
        .map(|(_, points)| orient_outward(points, center))
        .collect();

    debug!(
        tetrahedra = tetrahedra.len(),
        faces = counts.len(),
        surface = faces.len(),
        "surface extracted"
    );

    faces
}

fn orient_outward(points: [Point3D; 3], center: DVec3) -> SurfaceFace {
    let [a, b, c] = points.map(DVec3::from);
    let normal = (b - a).cross(c - a);

    if normal.dot(a - center) > 0.0 {
        SurfaceFace {
            points,
            normal: normal.normalize_or_zero().into(),
        }
    } else {
        SurfaceFace {
            points: [points[0], points[2], points[1]],
            normal: (-normal).normalize_or_zero().into(),
        }
    }
}

/// Index surface faces into render buffers, keeping their winding
pub fn index_surface(faces: &[SurfaceFace]) -> MeshBuffers {
    index_all(EPSILON, faces.iter().map(|face| face.points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tetrahedron() -> Tetrahedron {
        Tetrahedron::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
        )
    }

    fn assert_outward(face: &SurfaceFace, center: DVec3) {
        let a = DVec3::from(face.points[0]);
        let normal = DVec3::from(face.normal);
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-12);
        assert!(normal.dot(a - center) > 0.0, "{:?} faces inward", face);

        let [p, q, r] = face.points.map(DVec3::from);
        let winding = (q - p).cross(r - p).normalize();
        assert_relative_eq!(winding.dot(normal), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_tetrahedron() {
        let t = unit_tetrahedron();
        let faces = extract_surface_faces(&[t]);
        assert_eq!(faces.len(), 4);

        let center = DVec3::from(t.centroid());
        for face in &faces {
            assert_outward(face, center);
        }

        // the face on z = 0 points down
        let bottom = faces
            .iter()
            .find(|f| f.points.iter().all(|p| p.z == 0.0))
            .unwrap();
        assert_eq!(bottom.normal, Point3D::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_shared_face_is_dropped() {
        let a = unit_tetrahedron();
        // mirror through the x = 0 plane, sharing the face (0,0,0)-(0,1,0)-(0,0,1)
        let b = Tetrahedron::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(-1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
        );
        let faces = extract_surface_faces(&[a, b]);
        assert_eq!(faces.len(), 6);

        let shared = |f: &SurfaceFace| f.points.iter().all(|p| p.x == 0.0);
        assert!(!faces.iter().any(shared));

        let center = (DVec3::from(a.centroid()) + DVec3::from(b.centroid())) / 2.0;
        for face in &faces {
            assert_outward(face, center);
        }
    }

    #[test]
    fn test_empty_mesh() {
        assert!(extract_surface_faces(&[]).is_empty());
        assert!(index_surface(&[]).is_empty());
    }

    #[test]
    fn test_index_surface_shares_vertices() {
        let faces = extract_surface_faces(&[unit_tetrahedron()]);
        let mesh = index_surface(&faces);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.validate().is_ok());

        for (face, tri) in faces.iter().zip(mesh.indices.chunks_exact(3)) {
            for (p, &i) in face.points.iter().zip(tri) {
                assert_eq!(mesh.vertex(i as usize), Some(*p));
            }
        }
    }
}
