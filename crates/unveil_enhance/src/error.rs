//! Error types for unveil_enhance

use thiserror::Error;

/// Errors that can occur in the enhancement controllers
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// Failed to read a fragment source
    #[error("fragment read failed: {0}")]
    FragmentRead(String),

    /// Fragment source contained no block with the marker class
    #[error("no fragment matching `{0}` in source")]
    FragmentMarkerMissing(String),
}

/// Result type for unveil_enhance operations
pub type Result<T> = std::result::Result<T, EnhanceError>;
