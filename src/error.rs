//! Error types for homogenization

use thiserror::Error;

/// Main error type for homogenization operations
#[derive(Error, Debug)]
pub enum HomogenizationError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid volume fraction: {0}")]
    InvalidFraction(String),

    #[error("Singular system: {0}")]
    SingularSystem(String),

    #[error("Invalid orientation tensor: {0}")]
    OrientationTensor(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for homogenization operations
pub type HomogenizationResult<T> = Result<T, HomogenizationError>;
