//! Seal and open: the path from a message to a signed carrier image and back.
//!
//! Sealing signs the message, wraps signature and message in an
//! [`Envelope`], and embeds the envelope's UTF-8 text. Opening extracts the
//! text, decodes the envelope, and verifies it. Decode failures are errors;
//! a signature that does not match is a [`Verdict::Invalid`].

use bytes::Bytes;
use stegosign_codec::EmbeddingCodec;
use stegosign_core::Envelope;

use crate::config::SessionConfig;
use crate::context::{SigningContext, Verdict};
use crate::error::{Result, StegoError};

/// A carrier image produced by [`SignedEmbedder::seal`].
#[derive(Debug, Clone)]
pub struct Sealed {
    /// The image carrying the envelope.
    pub carrier: Bytes,
    /// The envelope that was embedded.
    pub envelope: Envelope,
    /// Envelope size in bytes.
    pub payload_len: usize,
    /// Bits the codec reported writing.
    pub bits_used: u64,
    /// Capacity of the container in bytes.
    pub capacity: usize,
}

impl Sealed {
    /// Fraction of the container's capacity used by the envelope.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.payload_len as f64 / self.capacity as f64
    }
}

/// The result of [`SignedEmbedder::open`].
#[derive(Debug, Clone)]
pub struct Opened {
    /// The decoded envelope.
    pub envelope: Envelope,
    /// Whether its signature verified under the context's public key.
    pub verdict: Verdict,
}

/// Signs messages and moves them through an embedding codec.
pub struct SignedEmbedder<C: EmbeddingCodec> {
    codec: C,
    enforce_capacity: bool,
}

impl<C: EmbeddingCodec> SignedEmbedder<C> {
    /// Create an embedder over `codec`.
    pub fn new(codec: C, config: &SessionConfig) -> Self {
        Self {
            codec,
            enforce_capacity: config.enforce_capacity,
        }
    }

    /// Get the codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Sign `message` and hide the envelope in `container`.
    pub fn seal(
        &self,
        context: &SigningContext,
        container: &Bytes,
        message: &str,
    ) -> Result<Sealed> {
        if !Envelope::is_transportable(message) {
            tracing::warn!(
                "message contains ':' and will be truncated when the envelope is decoded"
            );
        }

        let envelope = context.envelope(message);
        let payload = envelope.to_payload();
        let capacity = self.codec.capacity(container)?;
        if self.enforce_capacity && payload.len() > capacity {
            return Err(StegoError::PayloadTooLarge {
                len: payload.len(),
                capacity,
            });
        }

        let embedded = self.codec.embed(container, &payload)?;
        tracing::info!(
            payload_len = payload.len(),
            capacity,
            bits_used = embedded.bits_used,
            generation = context.generation(),
            "sealed signed message"
        );

        Ok(Sealed {
            carrier: embedded.carrier,
            envelope,
            payload_len: payload.len(),
            bits_used: embedded.bits_used,
            capacity,
        })
    }

    /// Extract and decode the envelope hidden in `carrier` without verifying.
    pub fn extract_envelope(&self, reference: &Bytes, carrier: &Bytes) -> Result<Envelope> {
        let payload = self.codec.extract(reference, carrier)?;
        Envelope::from_payload(&payload).map_err(|e| {
            tracing::warn!(error = %e, payload_len = payload.len(), "extracted payload is malformed");
            StegoError::from(e)
        })
    }

    /// Extract the envelope from `carrier` and verify it under `context`.
    pub fn open(
        &self,
        context: &SigningContext,
        reference: &Bytes,
        carrier: &Bytes,
    ) -> Result<Opened> {
        let envelope = self.extract_envelope(reference, carrier)?;
        let verdict = context.verify_envelope(&envelope);
        tracing::info!(
            ?verdict,
            generation = context.generation(),
            "opened signed message"
        );
        Ok(Opened { envelope, verdict })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stegosign_codec::{CodecError, TrailerCodec};

    fn container(len: usize) -> Bytes {
        Bytes::from(vec![0x80u8; len])
    }

    fn setup() -> (SignedEmbedder<TrailerCodec>, SigningContext) {
        let config = SessionConfig::default();
        let context = SigningContext::generate(&config).unwrap();
        (SignedEmbedder::new(TrailerCodec::new(), &config), context)
    }

    #[test]
    fn test_seal_open_valid() {
        let (embedder, context) = setup();
        let image = container(16 * 1024);

        let sealed = embedder.seal(&context, &image, "hello world").unwrap();
        assert_eq!(sealed.bits_used, sealed.payload_len as u64 * 8);
        assert!(sealed.utilization() > 0.0 && sealed.utilization() <= 1.0);

        let opened = embedder.open(&context, &image, &sealed.carrier).unwrap();
        assert_eq!(opened.envelope.message, "hello world");
        assert_eq!(opened.verdict, Verdict::Valid);
    }

    #[test]
    fn test_capacity_enforced() {
        let (embedder, context) = setup();
        let err = embedder.seal(&context, &container(256), "hello").unwrap_err();
        assert!(matches!(err, StegoError::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_codec_still_rejects_when_precheck_disabled() {
        let config = SessionConfig::default().enforce_capacity(false);
        let context = SigningContext::generate(&config).unwrap();
        let embedder = SignedEmbedder::new(TrailerCodec::new(), &config);

        let err = embedder.seal(&context, &container(256), "hello").unwrap_err();
        assert!(matches!(
            err,
            StegoError::Codec(CodecError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn test_malformed_payload_is_error_not_verdict() {
        let (embedder, context) = setup();
        let image = container(4096);
        let embedded = embedder.codec().embed(&image, b"not an envelope").unwrap();

        let err = embedder.open(&context, &image, &embedded.carrier).unwrap_err();
        assert!(err.is_malformed_payload());
    }

    #[test]
    fn test_forged_envelope_is_invalid_verdict() {
        let (embedder, context) = setup();
        let image = container(4096);
        let embedded = embedder
            .codec()
            .embed(&image, b"SIGNATURE:12345:MESSAGE:forged")
            .unwrap();

        let opened = embedder.open(&context, &image, &embedded.carrier).unwrap();
        assert_eq!(opened.verdict, Verdict::Invalid);
        assert_eq!(opened.envelope.message, "forged");
    }

    #[test]
    fn test_colon_message_does_not_verify_after_transport() {
        let (embedder, context) = setup();
        let image = container(16 * 1024);

        let sealed = embedder.seal(&context, &image, "note: meet at noon").unwrap();
        let opened = embedder.open(&context, &image, &sealed.carrier).unwrap();
        assert_eq!(opened.envelope.message, "note");
        assert_eq!(opened.verdict, Verdict::Invalid);
    }
}
