//! Floating-point geometric predicates
//!
//! All comparisons use a tolerance instead of exact arithmetic, so nearly
//! collinear or nearly cospherical inputs can still be misclassified. The
//! tolerance is relative: orientation and degeneracy tests compare against
//! the product of the edge lengths involved and containment tests against
//! the squared radius. Scaling the input therefore never changes an answer.

use glam::{DVec2, DVec3};

use super::point::{Point2D, Point3D};
use super::simplex::{Circumcircle, Circumsphere, Tetrahedron, Triangle};
use super::{EPSILON, MIN_VOLUME};

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Twice the signed area of `abc`; positive when counter-clockwise
#[inline]
pub fn orient2d(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let ab = DVec2::from(b) - DVec2::from(a);
    let ac = DVec2::from(c) - DVec2::from(a);
    ab.perp_dot(ac)
}

/// Classify the turn `a -> b -> c` with the default tolerance
pub fn orientation(a: Point2D, b: Point2D, c: Point2D) -> Orientation {
    orientation_with_epsilon(a, b, c, EPSILON)
}

/// Classify the turn `a -> b -> c`
///
/// Collinear when `|orient2d| <= eps·|ab|·|ac|`, i.e. when the sine of the
/// angle at `a` is at most `eps`.
pub fn orientation_with_epsilon(a: Point2D, b: Point2D, c: Point2D, eps: f64) -> Orientation {
    let det = orient2d(a, b, c);
    let eps = eps * a.distance_squared(b).sqrt() * a.distance_squared(c).sqrt();
    if det > eps {
        Orientation::CounterClockwise
    } else if det < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Signed area of the triangle `abc`
#[inline]
pub fn triangle_signed_area(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    orient2d(a, b, c) * 0.5
}

/// Circumcircle of a triangle, or `None` when its vertices are collinear
pub fn circumcircle(triangle: &Triangle) -> Option<Circumcircle> {
    circumcircle_with_epsilon(triangle, EPSILON)
}

/// Circumcircle with an explicit determinant tolerance
///
/// Solves for the center equidistant from all three vertices using
/// `d = 2·(x1(y2−y3) + x2(y3−y1) + x3(y1−y2))`, evaluated relative to the
/// first vertex. Returns `None` when `|d| <= 2·eps·|ab|·|ac|`, so the cut-off
/// depends on the triangle's shape and not on its size.
pub fn circumcircle_with_epsilon(triangle: &Triangle, eps: f64) -> Option<Circumcircle> {
    let [a, b, c] = triangle.points.map(DVec2::from);
    let ab = b - a;
    let ac = c - a;

    let d = 2.0 * ab.perp_dot(ac);
    if d.abs() <= 2.0 * eps * ab.length() * ac.length() || !d.is_finite() {
        return None;
    }

    let ab2 = ab.length_squared();
    let ac2 = ac.length_squared();
    let offset = DVec2::new(ac.y * ab2 - ab.y * ac2, ab.x * ac2 - ac.x * ab2) / d;
    let center = a + offset;

    Some(Circumcircle {
        center: center.into(),
        radius: offset.length(),
    })
}

/// Circumsphere of a tetrahedron, or `None` when it is flat
pub fn circumsphere(tetrahedron: &Tetrahedron) -> Option<Circumsphere> {
    circumsphere_with_tolerance(tetrahedron, EPSILON, MIN_VOLUME)
}

/// Circumsphere with explicit determinant and volume tolerances
///
/// Cramer's rule on the 3×3 system of edge vectors from the first vertex.
/// Returns `None` when `|det| <= eps·|u|·|v|·|w|` for the edge vectors
/// `u, v, w`, or when the volume is below the absolute `min_volume`.
pub fn circumsphere_with_tolerance(
    tetrahedron: &Tetrahedron,
    eps: f64,
    min_volume: f64,
) -> Option<Circumsphere> {
    let [a, b, c, d] = tetrahedron.points.map(DVec3::from);
    let u = b - a;
    let v = c - a;
    let w = d - a;

    let det = u.dot(v.cross(w));
    let flat = eps * u.length() * v.length() * w.length();
    if det.abs() <= flat || !det.is_finite() || det.abs() / 6.0 < min_volume {
        return None;
    }

    let offset = (u.length_squared() * v.cross(w)
        + v.length_squared() * w.cross(u)
        + w.length_squared() * u.cross(v))
        / (2.0 * det);

    Some(Circumsphere {
        center: (a + offset).into(),
        radius: offset.length(),
    })
}

/// Inclusive circumcircle test: points on the circle count as inside
///
/// Degenerate triangles contain nothing.
pub fn is_point_in_circumcircle(point: Point2D, triangle: &Triangle) -> bool {
    circumcircle(triangle).is_some_and(|circle| circle.contains(point, EPSILON))
}

/// Inclusive circumsphere test: points on the sphere count as inside
pub fn is_point_in_circumsphere(point: Point3D, tetrahedron: &Tetrahedron) -> bool {
    circumsphere(tetrahedron).is_some_and(|sphere| sphere.contains(point, EPSILON))
}

/// Barycentric point-in-triangle test, inclusive on the edges
pub fn is_point_in_triangle(point: Point2D, triangle: &Triangle) -> bool {
    let [a, b, c] = triangle.points;

    let area = 0.5 * (-b.y * c.x + a.y * (-b.x + c.x) + a.x * (b.y - c.y) + b.x * c.y);
    if orientation(a, b, c) == Orientation::Collinear {
        return false;
    }

    let s = (a.y * c.x - a.x * c.y + (c.y - a.y) * point.x + (a.x - c.x) * point.y) / (2.0 * area);
    let t = (a.x * b.y - a.y * b.x + (a.y - b.y) * point.x + (b.x - a.x) * point.y) / (2.0 * area);

    s >= 0.0 && t >= 0.0 && 1.0 - s - t >= 0.0
}

/// Signed volume of the tetrahedron `abcd` (scalar triple product / 6)
#[inline]
pub fn signed_volume(a: Point3D, b: Point3D, c: Point3D, d: Point3D) -> f64 {
    let a = DVec3::from(a);
    let u = DVec3::from(b) - a;
    let v = DVec3::from(c) - a;
    let w = DVec3::from(d) - a;
    u.dot(v.cross(w)) / 6.0
}

#[inline]
pub fn tetrahedron_volume(a: Point3D, b: Point3D, c: Point3D, d: Point3D) -> f64 {
    signed_volume(a, b, c, d).abs()
}

/// Proper crossing test for segments `p1p2` and `q1q2`
///
/// Segments that share an endpoint, touch, or overlap collinearly are not
/// considered intersecting.
pub fn segments_intersect(p1: Point2D, p2: Point2D, q1: Point2D, q2: Point2D) -> bool {
    segments_intersect_with_epsilon(p1, p2, q1, q2, EPSILON)
}

pub fn segments_intersect_with_epsilon(
    p1: Point2D,
    p2: Point2D,
    q1: Point2D,
    q2: Point2D,
    eps: f64,
) -> bool {
    let eps2 = eps * eps;
    for p in [p1, p2] {
        for q in [q1, q2] {
            if p.distance_squared(q) <= eps2 {
                return false;
            }
        }
    }

    let o1 = orientation_with_epsilon(p1, p2, q1, eps);
    let o2 = orientation_with_epsilon(p1, p2, q2, eps);
    let o3 = orientation_with_epsilon(q1, q2, p1, eps);
    let o4 = orientation_with_epsilon(q1, q2, p2, eps);

    opposite(o1, o2) && opposite(o3, o4)
}

#[inline]
fn opposite(a: Orientation, b: Orientation) -> bool {
    matches!(
        (a, b),
        (Orientation::CounterClockwise, Orientation::Clockwise)
            | (Orientation::Clockwise, Orientation::CounterClockwise)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into())
    }

    #[test]
    fn test_circumcircle_right_triangle() {
        let circle = circumcircle(&tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0))).unwrap();
        assert_relative_eq!(circle.center.x, 0.5);
        assert_relative_eq!(circle.center.y, 0.5);
        assert_relative_eq!(circle.radius, 0.5f64.sqrt());
    }

    #[test]
    fn test_circumcircle_translated() {
        let circle = circumcircle(&tri((100.0, 50.0), (102.0, 50.0), (100.0, 52.0))).unwrap();
        assert_relative_eq!(circle.center.x, 101.0, epsilon = 1e-12);
        assert_relative_eq!(circle.center.y, 51.0, epsilon = 1e-12);
        assert_relative_eq!(circle.radius, 2.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_circumcircle_collinear() {
        assert!(circumcircle(&tri((0.0, 0.0), (1.0, 1.0), (2.0, 2.0))).is_none());
        assert!(circumcircle(&tri((0.0, 0.0), (0.0, 0.0), (1.0, 0.0))).is_none());
    }

    #[test]
    fn test_point_in_circumcircle_inclusive() {
        let t = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        assert!(is_point_in_circumcircle(Point2D::new(0.5, 0.5), &t));
        // (1,1) lies exactly on the circle
        assert!(is_point_in_circumcircle(Point2D::new(1.0, 1.0), &t));
        assert!(!is_point_in_circumcircle(Point2D::new(2.0, 2.0), &t));

        let flat = tri((0.0, 0.0), (1.0, 0.0), (2.0, 0.0));
        assert!(!is_point_in_circumcircle(Point2D::new(1.0, 0.0), &flat));
    }

    #[test]
    fn test_point_in_triangle() {
        let t = tri((0.0, 0.0), (2.0, 0.0), (0.0, 2.0));
        assert!(is_point_in_triangle(Point2D::new(0.5, 0.5), &t));
        assert!(!is_point_in_triangle(Point2D::new(1.5, 1.5), &t));
        // edges and corners are inside
        assert!(is_point_in_triangle(Point2D::new(1.0, 1.0), &t));
        assert!(is_point_in_triangle(Point2D::new(0.0, 0.0), &t));

        // winding does not matter
        let cw = tri((0.0, 0.0), (0.0, 2.0), (2.0, 0.0));
        assert!(is_point_in_triangle(Point2D::new(0.5, 0.5), &cw));
    }

    #[test]
    fn test_orientation() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 0.0);
        assert_eq!(orientation(a, b, Point2D::new(0.0, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(a, b, Point2D::new(0.0, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation(a, b, Point2D::new(5.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn test_signed_volume() {
        let o = Point3D::new(0.0, 0.0, 0.0);
        let x = Point3D::new(1.0, 0.0, 0.0);
        let y = Point3D::new(0.0, 1.0, 0.0);
        let z = Point3D::new(0.0, 0.0, 1.0);

        assert_relative_eq!(signed_volume(o, x, y, z), 1.0 / 6.0);
        assert_relative_eq!(signed_volume(o, y, x, z), -1.0 / 6.0);
        assert_relative_eq!(tetrahedron_volume(o, y, x, z), 1.0 / 6.0);
        assert_eq!(signed_volume(o, x, y, Point3D::new(1.0, 1.0, 0.0)), 0.0);
    }

    #[test]
    fn test_circumsphere_unit_corner() {
        let t = Tetrahedron::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
        );
        let sphere = circumsphere(&t).unwrap();
        assert_relative_eq!(sphere.center.x, 0.5);
        assert_relative_eq!(sphere.center.y, 0.5);
        assert_relative_eq!(sphere.center.z, 0.5);
        assert_relative_eq!(sphere.radius, 0.75f64.sqrt());

        assert!(is_point_in_circumsphere(Point3D::new(1.0, 1.0, 1.0), &t));
        assert!(is_point_in_circumsphere(Point3D::new(0.5, 0.5, 0.5), &t));
        assert!(!is_point_in_circumsphere(Point3D::new(2.0, 2.0, 2.0), &t));
    }

    #[test]
    fn test_circumsphere_coplanar() {
        let t = Tetrahedron::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(1.0, 1.0, 0.0),
        );
        assert!(circumsphere(&t).is_none());
        assert!(!is_point_in_circumsphere(Point3D::new(0.5, 0.5, 0.0), &t));
    }

    #[test]
    fn test_circumsphere_tiny_volume_rejected() {
        let t = Tetrahedron::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 0.0, 1e-3),
        );
        assert!(circumsphere_with_tolerance(&t, EPSILON, MIN_VOLUME).is_some());
        assert!(circumsphere_with_tolerance(&t, EPSILON, 1e-3).is_none());
    }

    #[test]
    fn test_small_triangles_are_not_degenerate() {
        // twice the area is 1e-10, right at the old absolute cut-off
        let small = tri((0.0, 0.0), (1e-5, 0.0), (0.0, 1e-5));
        let circle = circumcircle(&small).unwrap();
        assert_relative_eq!(circle.center.x, 0.5e-5, max_relative = 1e-12);
        assert_relative_eq!(circle.radius, 0.5e-10f64.sqrt(), max_relative = 1e-12);
        assert!(is_point_in_circumcircle(Point2D::new(0.5e-5, 0.5e-5), &small));
        assert!(!is_point_in_circumcircle(Point2D::new(1.1e-5, 1.1e-5), &small));
        assert!(is_point_in_triangle(Point2D::new(0.2e-5, 0.2e-5), &small));

        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1e-6, 0.0);
        assert_eq!(orientation(a, b, Point2D::new(0.0, 1e-6)), Orientation::CounterClockwise);
        assert_eq!(orientation(a, b, Point2D::new(2e-6, 0.0)), Orientation::Collinear);

        let t = Tetrahedron::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1e-3, 0.0, 0.0),
            Point3D::new(0.0, 1e-3, 0.0),
            Point3D::new(0.0, 0.0, 1e-3),
        );
        let sphere = circumsphere_with_tolerance(&t, EPSILON, 0.0).unwrap();
        assert_relative_eq!(sphere.center.z, 0.5e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_sliver_is_degenerate_at_any_scale() {
        for scale in [1e-6, 1.0, 1e6] {
            let sliver = tri((0.0, 0.0), (scale, 0.0), (2.0 * scale, 1e-12 * scale));
            assert!(circumcircle(&sliver).is_none());
        }
    }

    #[test]
    fn test_segments_intersect() {
        let p = |x, y| Point2D::new(x, y);

        assert!(segments_intersect(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)));
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)));

        // shared endpoint
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 1.0), p(1.0, 1.0), p(2.0, 0.0)));
        // T-junction: endpoint touching the other segment's interior
        assert!(!segments_intersect(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)));
        // collinear overlap
        assert!(!segments_intersect(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(3.0, 0.0)));
    }
}
