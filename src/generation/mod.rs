//! Point-set generators
//!
//! Deterministic inputs for tests, demos and benchmarks. Random sets are
//! seeded with ChaCha8 so the same seed yields the same points on every
//! platform.

mod points;

pub use points::{grid_points_2d, grid_points_3d, random_points_2d, random_points_3d};
