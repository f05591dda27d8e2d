//! Error types for embedding codecs.

use thiserror::Error;

/// Errors raised while embedding into or extracting from an image.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Payload does not fit in the container.
    #[error("payload of {len} bytes exceeds capacity of {capacity} bytes")]
    PayloadTooLarge { len: usize, capacity: usize },

    /// The carrier was not produced from the given reference image.
    #[error("carrier does not derive from the reference image")]
    ReferenceMismatch,

    /// The carrier holds no payload.
    #[error("no embedded payload found")]
    NoPayload,

    /// The embedded payload is damaged.
    #[error("corrupted payload: {0}")]
    Corrupted(String),

    /// The image could not be read.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
