//! Error types for stegosign core.

use thiserror::Error;

/// Core errors that can occur while generating keys, signing, or parsing
/// envelopes.
///
/// A signature that fails to verify is not an error; see
/// [`crate::signature::verify`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("prime bit length must be at least 2, got {0}")]
    InvalidBitLength(usize),

    #[error("key size {requested} is below the minimum of {minimum} bits")]
    KeyTooSmall { requested: usize, minimum: usize },

    #[error("invalid primes: {0}")]
    InvalidPrimes(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("key generation cancelled")]
    Cancelled,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
