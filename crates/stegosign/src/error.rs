//! Error types for stegosign sessions.

use std::time::Duration;

use stegosign_codec::CodecError;
use stegosign_core::CoreError;
use thiserror::Error;

/// Errors that can occur while managing keys or sealing and opening images.
///
/// A signature that does not verify is reported as
/// [`Verdict::Invalid`](crate::Verdict::Invalid), never as an error.
#[derive(Debug, Error)]
pub enum StegoError {
    /// Core error (key generation, malformed envelope, bad signature text).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Envelope does not fit in the container image.
    #[error("payload of {len} bytes exceeds carrier capacity of {capacity} bytes")]
    PayloadTooLarge { len: usize, capacity: usize },

    /// Key generation exceeded the configured deadline.
    #[error("key generation timed out after {0:?}")]
    KeygenTimeout(Duration),

    /// The blocking key generation task panicked or was aborted.
    #[error("key generation task failed: {0}")]
    KeygenTask(String),
}

impl StegoError {
    /// Whether this error means the extracted payload could not be parsed,
    /// as opposed to a codec or key failure.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(
            self,
            StegoError::Core(CoreError::MalformedEnvelope(_) | CoreError::InvalidSignature(_))
        )
    }
}

/// Result type for stegosign operations.
pub type Result<T> = std::result::Result<T, StegoError>;
