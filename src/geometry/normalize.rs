//! Unit-cube normalization for 3D point sets
//!
//! Rescales widely spaced input so circumsphere arithmetic works on
//! coordinates of order one.

use glam::DVec3;

use super::point::Point3D;

/// Linear map from the input bounding box into `[0, 1]³`
///
/// The same factor is used on every axis so shapes are not distorted; the
/// longest side of the bounding box maps onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    min: DVec3,
    scale: f64,
}

impl Normalization {
    /// Compute the map for a point set, or `None` if it is empty
    ///
    /// A zero-extent set (all points identical) gets scale 1.
    pub fn from_points(points: &[Point3D]) -> Option<Self> {
        let (min, max) = bounds(points)?;
        let extent = (max - min).max_element();
        let scale = if extent > 0.0 && extent.is_finite() { extent } else { 1.0 };
        Some(Self { min, scale })
    }

    /// Identity map (used when normalization is disabled)
    pub fn identity() -> Self {
        Self {
            min: DVec3::ZERO,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn offset(&self) -> Point3D {
        self.min.into()
    }

    #[inline]
    pub fn normalize(&self, point: Point3D) -> Point3D {
        ((DVec3::from(point) - self.min) / self.scale).into()
    }

    #[inline]
    pub fn denormalize(&self, point: Point3D) -> Point3D {
        (DVec3::from(point) * self.scale + self.min).into()
    }
}

/// Axis-aligned bounds of a point set
pub(crate) fn bounds(points: &[Point3D]) -> Option<(DVec3, DVec3)> {
    let first = DVec3::from(*points.first()?);
    Some(points.iter().fold((first, first), |(min, max), &p| {
        let p = DVec3::from(p);
        (min.min(p), max.max(p))
    }))
}
