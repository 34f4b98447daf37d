//! Delaunay triangulation kernel
//!
//! Planar and constrained Delaunay triangulation, 3D tetrahedralization,
//! geometric predicates, and conversion of the results into indexed
//! buffers ready for any renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use delaunay_kernel::*;
//!
//! // Triangulate a point set
//! let points = generation::random_points_2d(200, (Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)), 42);
//! let triangles = triangulate(&points);
//!
//! // Convert to deduplicated buffers for rendering
//! let mesh = index_triangles(&triangles);
//! assert!(mesh.vertex_count() <= 200);
//! assert!(mesh.validate().is_ok());
//!
//! // Tetrahedralize and keep only the hull
//! let cloud = generation::random_points_3d(50, (Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 1.0, 1.0)), 7);
//! let tetrahedra = triangulate3d(&cloud);
//! let surface = extract_surface_faces(&tetrahedra);
//! println!("{} tetrahedra, {} surface faces", tetrahedra.len(), surface.len());
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization for configuration, points, simplices
//!   and mesh buffers

// Modules
pub mod config;
pub mod error;
pub mod generation;
pub mod geometry;
pub mod mesh;
pub mod triangulation;

// Re-export core types for convenience
pub use config::{TriangulationConfig, TriangulationConfigBuilder};
pub use error::{KernelError, Result};
pub use geometry::{
    circumcircle, circumsphere, convex_hull_2d, is_point_in_circumcircle, is_point_in_circumsphere,
    is_point_in_triangle, orientation, polygon_area, segments_intersect, signed_volume,
    tetrahedron_volume, Circumcircle, Circumsphere, Edge, Normalization, Orientation, Point2D,
    Point3D, Tetrahedron, Triangle, VertexKey,
};
pub use mesh::{
    extract_surface_faces, extract_surface_faces_with_tolerance, index_surface, index_tetrahedra,
    index_tetrahedra_with_tolerance, index_triangles, index_triangles_with_tolerance, MeshBuffers,
    SurfaceFace,
};
pub use triangulation::{
    triangulate, triangulate3d, triangulate3d_with_config, triangulate_constrained,
    triangulate_constrained_with_config, triangulate_with_config, Constraint,
};

// Re-export the vector types points convert to and from
pub use glam::{DVec2, DVec3};
