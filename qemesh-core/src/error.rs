//! Error types for qemesh

use thiserror::Error;

/// Main error type for qemesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Attribute length mismatch: {len} values is not a multiple of {components} components")]
    AttributeLength { len: usize, components: usize },
}

/// Result type alias for qemesh operations
pub type Result<T> = std::result::Result<T, Error>;
