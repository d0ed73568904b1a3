//! Error types for karman-lbm.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LbmError {
    #[error("Invalid grid {nx}x{ny}: channel needs nx >= 2 and ny >= 3")]
    InvalidGrid { nx: usize, ny: usize },

    #[error("Invalid obstacle: {0}")]
    InvalidObstacle(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Relaxation frequency {omega} outside the stable range (0, 2)")]
    UnstableRelaxation { omega: f64 },

    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    #[error("Numerical divergence at ({x}, {y}): density = {density}")]
    Divergence { x: usize, y: usize, density: f64 },
}

pub type Result<T> = std::result::Result<T, LbmError>;
