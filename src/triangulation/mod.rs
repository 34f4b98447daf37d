//! Delaunay triangulation engines
//!
//! - [`triangulate`]: Bowyer–Watson in the plane
//! - [`triangulate_constrained`]: the planar engine plus mandatory edges,
//!   recovered by edge flips
//! - [`triangulate3d`]: Bowyer–Watson over tetrahedra
//!
//! Every engine is a pure function of its input. Degenerate configurations
//! yield fewer (or zero) simplices rather than errors.

mod constrained;
mod delaunay2d;
mod delaunay3d;
mod keys;
mod planar;

pub use constrained::{triangulate_constrained, triangulate_constrained_with_config, Constraint};
pub use delaunay2d::{triangulate, triangulate_with_config};
pub use delaunay3d::{triangulate3d, triangulate3d_with_config};

use std::collections::HashSet;

use crate::geometry::VertexKey;

/// Drop repeated points under the vertex policy, keeping first occurrences
pub(crate) fn dedup_points<P: Copy>(points: &[P], key: impl Fn(P) -> VertexKey) -> Vec<P> {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().copied().filter(|&p| seen.insert(key(p))).collect()
}
