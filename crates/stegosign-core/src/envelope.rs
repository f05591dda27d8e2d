//! Text envelope bundling a signature with its message.
//!
//! Format: `SIGNATURE:<decimal>:MESSAGE:<text>`.
//!
//! Decoding splits the whole text on `:` and takes the second segment as the
//! signature and the fourth as the message. A message containing `:` is
//! therefore truncated at its first colon and will not verify after
//! decoding. The format is kept as-is so that envelopes stay readable by
//! existing extractors.

use crate::error::{CoreError, Result};
use crate::signature::Signature;

/// Marker preceding the signature.
pub const SIGNATURE_MARKER: &str = "SIGNATURE:";

/// Marker preceding the message.
pub const MESSAGE_MARKER: &str = "MESSAGE:";

/// Field delimiter.
pub const DELIMITER: char = ':';

/// A signature and the message it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub signature: Signature,
    pub message: String,
}

impl Envelope {
    /// Bundle a signature with its message.
    pub fn new(signature: Signature, message: impl Into<String>) -> Self {
        Self {
            signature,
            message: message.into(),
        }
    }

    /// Render as `SIGNATURE:<decimal>:MESSAGE:<text>`.
    pub fn encode(&self) -> String {
        format!(
            "{SIGNATURE_MARKER}{}{DELIMITER}{MESSAGE_MARKER}{}",
            self.signature.to_decimal(),
            self.message
        )
    }

    /// Parse an envelope.
    ///
    /// Fails if either marker is missing, fewer than four segments result
    /// from splitting on `:`, or the signature segment is not a decimal
    /// integer.
    pub fn decode(text: &str) -> Result<Self> {
        if !text.contains(SIGNATURE_MARKER) || !text.contains(MESSAGE_MARKER) {
            return Err(CoreError::MalformedEnvelope("missing marker".into()));
        }

        let parts: Vec<&str> = text.split(DELIMITER).collect();
        if parts.len() < 4 {
            return Err(CoreError::MalformedEnvelope(format!(
                "expected at least 4 segments, got {}",
                parts.len()
            )));
        }

        let signature = Signature::from_decimal(parts[1])
            .map_err(|e| CoreError::MalformedEnvelope(e.to_string()))?;

        Ok(Self {
            signature,
            message: parts[3].to_string(),
        })
    }

    /// Encode as UTF-8 bytes for an embedding codec.
    pub fn to_payload(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }

    /// Decode from extracted payload bytes. The bytes must be valid UTF-8.
    pub fn from_payload(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::MalformedEnvelope(format!("payload is not UTF-8: {e}")))?;
        Self::decode(text)
    }

    /// Whether `message` survives an encode/decode round trip unchanged.
    pub fn is_transportable(message: &str) -> bool {
        !message.contains(DELIMITER)
    }
}
