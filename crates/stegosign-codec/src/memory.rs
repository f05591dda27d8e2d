//! A simple in-memory codec for testing.
//!
//! The carrier is the container followed by the payload, a big-endian `u32`
//! length, and a 4-byte magic. Capacity is one payload byte per eight image
//! bytes, the same budget as one-bit LSB embedding, minus the trailer.

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{Embedded, EmbeddingCodec};
use crate::error::{CodecError, Result};

/// Trailer magic.
const MAGIC: &[u8; 4] = b"SSG1";

/// Length field plus magic.
const TRAILER_LEN: usize = 8;

/// In-memory codec that appends the payload after the image bytes.
#[derive(Debug, Clone, Copy)]
pub struct TrailerCodec {
    image_bytes_per_payload_byte: usize,
}

impl TrailerCodec {
    /// Create a codec with the default one-in-eight capacity.
    pub fn new() -> Self {
        Self {
            image_bytes_per_payload_byte: 8,
        }
    }

    /// Create a codec with a custom density. A density of zero is treated
    /// as one.
    pub fn with_density(image_bytes_per_payload_byte: usize) -> Self {
        Self {
            image_bytes_per_payload_byte: image_bytes_per_payload_byte.max(1),
        }
    }
}

impl Default for TrailerCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// The trailer's length field, or `PayloadTooLarge` when `len` does not fit
/// in 32 bits.
fn length_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CodecError::PayloadTooLarge {
        len,
        capacity: u32::MAX as usize,
    })
}

impl EmbeddingCodec for TrailerCodec {
    fn embed(&self, container: &Bytes, payload: &[u8]) -> Result<Embedded> {
        let capacity = self.capacity(container)?;
        if payload.len() > capacity {
            return Err(CodecError::PayloadTooLarge {
                len: payload.len(),
                capacity,
            });
        }

        let len_field = length_field(payload.len())?;
        let mut carrier = BytesMut::with_capacity(container.len() + payload.len() + TRAILER_LEN);
        carrier.extend_from_slice(container);
        carrier.extend_from_slice(payload);
        carrier.put_u32(len_field);
        carrier.extend_from_slice(MAGIC);

        tracing::debug!(
            payload_len = payload.len(),
            capacity,
            "embedded payload"
        );
        Ok(Embedded {
            carrier: carrier.freeze(),
            bits_used: payload.len() as u64 * 8,
        })
    }

    fn extract(&self, reference: &Bytes, carrier: &Bytes) -> Result<Vec<u8>> {
        if !carrier.starts_with(reference) {
            return Err(CodecError::ReferenceMismatch);
        }
        let hidden = &carrier[reference.len()..];
        if hidden.is_empty() {
            return Err(CodecError::NoPayload);
        }
        if hidden.len() < TRAILER_LEN || &hidden[hidden.len() - 4..] != MAGIC {
            return Err(CodecError::Corrupted("missing trailer".into()));
        }

        let body = &hidden[..hidden.len() - TRAILER_LEN];
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&hidden[hidden.len() - TRAILER_LEN..hidden.len() - 4]);
        let len = u32::from_be_bytes(len_bytes) as usize;
        if len != body.len() {
            return Err(CodecError::Corrupted(format!(
                "length field says {len} bytes, found {}",
                body.len()
            )));
        }

        tracing::debug!(payload_len = len, "extracted payload");
        Ok(body.to_vec())
    }

    fn capacity(&self, image: &Bytes) -> Result<usize> {
        if image.is_empty() {
            return Err(CodecError::InvalidImage("empty image".into()));
        }
        Ok((image.len() / self.image_bytes_per_payload_byte).saturating_sub(TRAILER_LEN))
    }
}
