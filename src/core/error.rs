//! Error types for the groundcover crate
//!
//! The numeric core is total over its inputs and never returns errors;
//! only the resource edges (image decoding, config files) can fail.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config error: {0}")]
    Config(String),

    #[error("field error: {0}")]
    Field(String),
}
