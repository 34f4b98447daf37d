//! Triangulation configuration and builder
//!
//! Tolerances and super-structure sizing shared by the 2D, constrained and
//! 3D engines and by the mesh indexer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::geometry::{EPSILON, MIN_VOLUME};

/// Default scale of the synthetic super-triangle/super-tetrahedron relative
/// to the input bounding box
pub const DEFAULT_SUPER_MARGIN: f64 = 20.0;

/// Smallest margin that still encloses the bounding box strictly
pub const MIN_SUPER_MARGIN: f64 = 2.0;

/// Configuration for a triangulation run
///
/// The same configuration and input always produce the same output.
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::*;
///
/// let config = TriangulationConfigBuilder::new()
///     .super_margin(50.0)
///     .unwrap()
///     .normalize(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.super_margin, 50.0);
/// assert!(!config.normalize);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    /// Tolerance for determinant and containment tests
    pub epsilon: f64,

    /// Tetrahedra with a volume at or below this are never created
    ///
    /// Measured in the engine's working coordinates, i.e. in the unit cube
    /// when `normalize` is on.
    pub min_volume: f64,

    /// Size of the super-structure relative to the bounding box
    ///
    /// Larger margins keep the super vertices further from the hull, at the
    /// cost of larger magnitudes in the circumcircle arithmetic.
    pub super_margin: f64,

    /// Rescale 3D input into the unit cube before triangulating
    pub normalize: bool,

    /// Bucket size used to decide whether two points are the same vertex
    ///
    /// - 0.0: bit-exact coordinate match
    /// - > 0.0: coordinates are rounded to multiples of this value
    pub vertex_tolerance: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            min_volume: MIN_VOLUME,
            super_margin: DEFAULT_SUPER_MARGIN,
            normalize: true,
            vertex_tolerance: EPSILON,
        }
    }
}

/// Builder for creating a [`TriangulationConfig`] with validation
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::*;
///
/// // Use defaults
/// let config = TriangulationConfigBuilder::new().build().unwrap();
/// assert_eq!(config, TriangulationConfig::default());
///
/// // Exact vertex matching
/// let config = TriangulationConfigBuilder::new()
///     .vertex_tolerance(0.0)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.vertex_tolerance, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TriangulationConfigBuilder {
    epsilon: f64,
    min_volume: f64,
    super_margin: f64,
    normalize: bool,
    vertex_tolerance: f64,
}

impl TriangulationConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - epsilon: 1e-10
    /// - min_volume: 1e-12
    /// - super_margin: 20.0
    /// - normalize: true
    /// - vertex_tolerance: 1e-10
    pub fn new() -> Self {
        let defaults = TriangulationConfig::default();
        Self {
            epsilon: defaults.epsilon,
            min_volume: defaults.min_volume,
            super_margin: defaults.super_margin,
            normalize: defaults.normalize,
            vertex_tolerance: defaults.vertex_tolerance,
        }
    }

    /// Set the predicate tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if epsilon is not a positive finite number
    pub fn epsilon(mut self, epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(KernelError::InvalidConfig(format!(
                "epsilon must be positive and finite (got {})",
                epsilon
            )));
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Set the minimum tetrahedron volume
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the volume is negative or not finite
    pub fn min_volume(mut self, min_volume: f64) -> Result<Self> {
        if !min_volume.is_finite() || min_volume < 0.0 {
            return Err(KernelError::InvalidConfig(format!(
                "min_volume must be >= 0 and finite (got {})",
                min_volume
            )));
        }
        self.min_volume = min_volume;
        Ok(self)
    }

    /// Set the super-structure margin
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the margin is below 2.0 or not finite
    pub fn super_margin(mut self, margin: f64) -> Result<Self> {
        if !margin.is_finite() || margin < MIN_SUPER_MARGIN {
            return Err(KernelError::InvalidConfig(format!(
                "super_margin must be >= {} and finite (got {})",
                MIN_SUPER_MARGIN, margin
            )));
        }
        self.super_margin = margin;
        Ok(self)
    }

    /// Enable or disable unit-cube normalization of 3D input
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the vertex identity tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the tolerance is negative or not finite
    pub fn vertex_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(KernelError::InvalidConfig(format!(
                "vertex_tolerance must be >= 0 and finite (got {})",
                tolerance
            )));
        }
        self.vertex_tolerance = tolerance;
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<TriangulationConfig> {
        Ok(TriangulationConfig {
            epsilon: self.epsilon,
            min_volume: self.min_volume,
            super_margin: self.super_margin,
            normalize: self.normalize,
            vertex_tolerance: self.vertex_tolerance,
        })
    }
}

impl Default for TriangulationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
