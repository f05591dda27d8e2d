//! Embedding codec abstraction.
//!
//! A codec hides a byte payload inside a container image and recovers it
//! later given the original image as reference. Implementations may use
//! pixel-value differencing, LSB replacement, or anything else; callers treat
//! them as byte-preserving transports.

use bytes::Bytes;

use crate::error::Result;

/// Result of an embed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    /// The image carrying the payload.
    pub carrier: Bytes,
    /// Number of payload bits written into the carrier.
    pub bits_used: u64,
}

/// Codec trait for hiding payloads in images.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait EmbeddingCodec: Send + Sync {
    /// Hide `payload` in `container`, returning the carrier image.
    fn embed(&self, container: &Bytes, payload: &[u8]) -> Result<Embedded>;

    /// Recover the payload hidden in `carrier`.
    ///
    /// `reference` is the container the carrier was produced from.
    fn extract(&self, reference: &Bytes, carrier: &Bytes) -> Result<Vec<u8>>;

    /// Maximum payload size, in bytes, that `image` can carry.
    fn capacity(&self, image: &Bytes) -> Result<usize>;
}

impl<C: EmbeddingCodec + ?Sized> EmbeddingCodec for std::sync::Arc<C> {
    fn embed(&self, container: &Bytes, payload: &[u8]) -> Result<Embedded> {
        (**self).embed(container, payload)
    }

    fn extract(&self, reference: &Bytes, carrier: &Bytes) -> Result<Vec<u8>> {
        (**self).extract(reference, carrier)
    }

    fn capacity(&self, image: &Bytes) -> Result<usize> {
        (**self).capacity(image)
    }
}
