//! Index-based planar triangulation with edge flips
//!
//! The Bowyer–Watson output is loaded into [`PlanarMesh`] together with its
//! super-triangle. Mandatory edges (the convex hull and user constraints) are
//! then recovered by flipping the edges that cross them, and the Delaunay
//! property is restored with Lawson flips that never touch a fixed edge.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace, warn};

use super::keys::edge_key;
use crate::geometry::predicates::{
    circumcircle_with_epsilon, orient2d, orientation_with_epsilon, segments_intersect_with_epsilon,
};
use crate::geometry::{convex_hull_2d, Orientation, Point2D, Triangle, VertexKey};

/// Counter-clockwise triangles over `vertices` with directed-edge adjacency
///
/// `vertices[..real]` are the deduplicated input points. Anything after
/// them is scaffolding (the super-triangle) and never reaches the output.
#[derive(Debug, Clone)]
pub(crate) struct PlanarMesh {
    vertices: Vec<Point2D>,
    real: usize,
    triangles: Vec<[usize; 3]>,
    /// directed edge -> slot of the triangle that has it
    owners: HashMap<[usize; 2], usize>,
    /// sorted keys of edges no flip may remove
    fixed: HashSet<[usize; 2]>,
    eps: f64,
}

impl PlanarMesh {
    pub(crate) fn new(vertices: Vec<Point2D>, real: usize, triangles: Vec<[usize; 3]>, eps: f64) -> Self {
        let mut owners = HashMap::with_capacity(triangles.len() * 3);
        for (slot, &triangle) in triangles.iter().enumerate() {
            for edge in directed_edges(triangle) {
                owners.insert(edge, slot);
            }
        }
        Self {
            vertices,
            real,
            triangles,
            owners,
            fixed: HashSet::new(),
            eps,
        }
    }

    /// The input points, without scaffolding
    pub(crate) fn vertices(&self) -> &[Point2D] {
        &self.vertices[..self.real]
    }

    /// Number of triangles made of input points only
    pub(crate) fn triangle_count(&self) -> usize {
        self.triangles
            .iter()
            .filter(|t| t.iter().all(|&v| v < self.real))
            .count()
    }

    pub(crate) fn has_edge(&self, a: usize, b: usize) -> bool {
        self.owners.contains_key(&[a, b]) || self.owners.contains_key(&[b, a])
    }

    /// Force every convex hull edge into the mesh, then legalize everything
    ///
    /// A super vertex can fall inside the circumcircle of a thin hull
    /// triangle, in which case Bowyer–Watson connects it across the hull and
    /// the hull triangle is lost. Recovering the hull edges puts those
    /// triangles back. Returns the number of hull corners; fewer than 3 means
    /// the input is collinear and nothing was changed.
    pub(crate) fn recover_hull(&mut self) -> usize {
        let hull = convex_hull_2d(self.vertices());
        if hull.len() < 3 {
            return hull.len();
        }

        let lookup: HashMap<VertexKey, usize> = self
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key(0.0), i))
            .collect();
        let corners: Vec<usize> = hull.iter().filter_map(|p| lookup.get(&p.key(0.0)).copied()).collect();

        let mut missing = 0usize;
        for (i, &a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % corners.len()];
            if !self.recover_edge(a, b) {
                missing += 1;
            }
        }
        if missing > 0 {
            warn!(missing, corners = corners.len(), "hull edges could not be recovered");
        }

        self.legalize_all();
        corners.len()
    }

    /// Make `a-b` an edge of the mesh and protect it from later flips
    ///
    /// A segment running through a vertex is recovered as two edges. Crossing
    /// edges are flipped away one at a time; an edge whose quad is not
    /// strictly convex goes to the back of the queue. Returns `false` when the
    /// segment crosses a fixed edge or no crossing edge can be flipped.
    pub(crate) fn recover_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return true;
        }
        if self.has_edge(a, b) {
            self.fixed.insert(edge_key(a, b));
            return true;
        }

        if let Some(c) = self.vertex_on_segment(a, b) {
            let first = self.recover_edge(a, c);
            let second = self.recover_edge(c, b);
            return first && second;
        }

        let mut queue = self.crossing_edges(a, b);
        if queue.is_empty() {
            return false;
        }
        if queue.iter().any(|&[u, w]| self.is_fixed(u, w)) {
            debug!(a, b, "segment crosses a fixed edge");
            return false;
        }

        let mut created = Vec::new();
        let mut stalled = 0usize;
        let mut budget = flip_budget(self.triangles.len());

        while let Some([u, w]) = queue.pop_front() {
            if budget == 0 {
                debug!(a, b, "flip budget exhausted");
                return false;
            }
            budget -= 1;

            match self.flip(u, w) {
                Some([c, d]) => {
                    stalled = 0;
                    if self.crosses(a, b, c, d) {
                        queue.push_back([c, d]);
                    } else {
                        created.push([c, d]);
                    }
                }
                None => {
                    queue.push_back([u, w]);
                    stalled += 1;
                    if stalled >= queue.len() {
                        debug!(a, b, crossing = queue.len(), "no crossing edge can be flipped");
                        return false;
                    }
                }
            }
        }

        if !self.has_edge(a, b) {
            return false;
        }
        self.fixed.insert(edge_key(a, b));
        trace!(a, b, flips = created.len(), "edge recovered");
        self.legalize(created);
        true
    }

    /// Lawson flips over every edge
    pub(crate) fn legalize_all(&mut self) {
        let edges: Vec<[usize; 2]> = self
            .triangles
            .iter()
            .flat_map(|&t| directed_edges(t))
            .filter(|&[u, w]| u < w)
            .collect();
        self.legalize(edges);
    }

    /// Flip edges from the work list until none has its opposite vertex
    /// strictly inside a circumcircle
    ///
    /// Fixed edges and edges whose quad touches scaffolding are left alone.
    fn legalize(&mut self, mut stack: Vec<[usize; 2]>) {
        let mut budget = flip_budget(self.triangles.len());
        let mut flips = 0usize;

        while let Some([u, w]) = stack.pop() {
            if self.is_fixed(u, w) {
                continue;
            }
            let (Some(c), Some(d)) = (self.apex(u, w), self.apex(w, u)) else {
                continue;
            };
            if [u, w, c, d].iter().any(|&v| v >= self.real) || !self.is_illegal(u, w, c, d) {
                continue;
            }
            if budget == 0 {
                warn!(flips, "flip budget exhausted while legalizing");
                break;
            }
            budget -= 1;

            if self.flip(u, w).is_some() {
                flips += 1;
                stack.extend([[u, d], [d, w], [w, c], [c, u]]);
            }
        }

        if flips > 0 {
            trace!(flips, "legalized");
        }
    }

    /// Swap the diagonal `u-w` of its quad for the other one
    ///
    /// `None` when `u-w` is a boundary edge or the quad is not strictly
    /// convex.
    fn flip(&mut self, u: usize, w: usize) -> Option<[usize; 2]> {
        let first = *self.owners.get(&[u, w])?;
        let second = *self.owners.get(&[w, u])?;
        let c = third(self.triangles[first], u, w)?;
        let d = third(self.triangles[second], w, u)?;
        if c == d || !self.is_ccw(c, u, d) || !self.is_ccw(d, w, c) {
            return None;
        }

        self.replace(first, [c, u, d]);
        self.replace(second, [d, w, c]);
        Some([c, d])
    }

    fn replace(&mut self, slot: usize, triangle: [usize; 3]) {
        for edge in directed_edges(self.triangles[slot]) {
            if self.owners.get(&edge) == Some(&slot) {
                self.owners.remove(&edge);
            }
        }
        self.triangles[slot] = triangle;
        for edge in directed_edges(triangle) {
            self.owners.insert(edge, slot);
        }
    }

    /// Vertex opposite the directed edge `a -> b`
    fn apex(&self, a: usize, b: usize) -> Option<usize> {
        let slot = *self.owners.get(&[a, b])?;
        third(self.triangles[slot], a, b)
    }

    fn is_fixed(&self, a: usize, b: usize) -> bool {
        self.fixed.contains(&edge_key(a, b))
    }

    fn is_ccw(&self, a: usize, b: usize, c: usize) -> bool {
        let v = &self.vertices;
        orientation_with_epsilon(v[a], v[b], v[c], self.eps) == Orientation::CounterClockwise
    }

    /// `d` lies strictly inside the circumcircle of `u, w, c`
    fn is_illegal(&self, u: usize, w: usize, c: usize, d: usize) -> bool {
        let v = &self.vertices;
        match circumcircle_with_epsilon(&Triangle::new(v[u], v[w], v[c]), self.eps) {
            Some(circle) => circle.strictly_contains(v[d], self.eps),
            None => true,
        }
    }

    fn crosses(&self, a: usize, b: usize, u: usize, w: usize) -> bool {
        let v = &self.vertices;
        segments_intersect_with_epsilon(v[a], v[b], v[u], v[w], self.eps)
    }

    /// Edges properly crossing `a-b`, ordered from `a` to `b`
    fn crossing_edges(&self, a: usize, b: usize) -> VecDeque<[usize; 2]> {
        let (pa, pb) = (self.vertices[a], self.vertices[b]);
        let mut seen = HashSet::new();
        let mut crossings: Vec<(f64, [usize; 2])> = Vec::new();

        for &triangle in &self.triangles {
            for [u, w] in directed_edges(triangle) {
                if !self.crosses(a, b, u, w) || !seen.insert(edge_key(u, w)) {
                    continue;
                }
                let (pu, pw) = (self.vertices[u], self.vertices[w]);
                let du = orient2d(pu, pw, pa);
                let dw = orient2d(pu, pw, pb);
                crossings.push((du / (du - dw), [u, w]));
            }
        }

        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));
        crossings.into_iter().map(|(_, edge)| edge).collect()
    }

    /// The input vertex closest to `a` lying strictly inside segment `a-b`
    ///
    /// "On" the segment means within `eps·|ab|` of its line.
    fn vertex_on_segment(&self, a: usize, b: usize) -> Option<usize> {
        let pa = self.vertices[a];
        let pb = self.vertices[b];
        let (ab_x, ab_y) = (pb.x - pa.x, pb.y - pa.y);
        let length_squared = ab_x * ab_x + ab_y * ab_y;

        self.vertices()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != a && i != b)
            .filter_map(|(i, &p)| {
                let (ap_x, ap_y) = (p.x - pa.x, p.y - pa.y);
                let t = (ap_x * ab_x + ap_y * ab_y) / length_squared;
                let off_line = orient2d(pa, pb, p).abs();
                (off_line <= self.eps * length_squared && t > 0.0 && t < 1.0).then_some((t, i))
            })
            .min_by(|l, r| l.0.total_cmp(&r.0))
            .map(|(_, i)| i)
    }

    /// Non-degenerate triangles made of input points only
    pub(crate) fn into_triangles(self) -> Vec<Triangle> {
        let Self {
            vertices,
            real,
            triangles,
            eps,
            ..
        } = self;
        triangles
            .into_iter()
            .filter(|t| t.iter().all(|&v| v < real))
            .map(|[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c]))
            .filter(|t| circumcircle_with_epsilon(t, eps).is_some())
            .collect()
    }
}

#[inline]
fn directed_edges([a, b, c]: [usize; 3]) -> [[usize; 2]; 3] {
    [[a, b], [b, c], [c, a]]
}

/// Third vertex of `triangle`, which must contain the directed edge `a -> b`
fn third(triangle: [usize; 3], a: usize, b: usize) -> Option<usize> {
    (0..3)
        .find(|&i| triangle[i] == a && triangle[(i + 1) % 3] == b)
        .map(|i| triangle[(i + 2) % 3])
}

/// Upper bound on flips for one recovery or legalization pass
fn flip_budget(triangles: usize) -> usize {
    triangles.saturating_mul(triangles).max(64)
}
