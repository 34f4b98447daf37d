//! Error types for the triangulation kernel
//!
//! Degenerate geometry and insufficient input are not errors here: they
//! degrade to `None` circumcircles or empty results. Only configuration and
//! mesh validation can fail.

use thiserror::Error;

/// Errors raised by configuration and mesh validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Mesh buffers violate the vertex/index layout
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

/// Result type alias for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;
