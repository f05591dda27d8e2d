//! Message digests.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Width of a digest in bits.
pub const DIGEST_BITS: usize = 256;

/// A 32-byte SHA-256 digest, read as a big-endian unsigned integer when
/// signing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Compute the SHA-256 digest of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The digest as a big-endian unsigned integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for BigUint {
    fn from(digest: Digest) -> Self {
        digest.to_biguint()
    }
}

/// Hash a message. Text is hashed as its UTF-8 bytes.
pub fn hash_message(message: impl AsRef<[u8]>) -> Digest {
    Digest::hash(message.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha256_values() {
        assert_eq!(
            hash_message("").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hash_message("abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_text_and_bytes_agree() {
        let text = "Секретное сообщение для передачи";
        assert_eq!(hash_message(text), hash_message(text.as_bytes()));
        assert_eq!(hash_message(text), hash_message(text.to_string()));
    }

    #[test]
    fn test_integer_is_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x01;
        bytes[30] = 0x02;
        assert_eq!(Digest::from_bytes(bytes).to_biguint(), BigUint::from(0x0201u32));

        let digest = hash_message("abc");
        assert!(digest.to_biguint().bits() <= DIGEST_BITS as u64);
    }

    #[test]
    fn test_debug_is_truncated() {
        let debug = format!("{:?}", hash_message("abc"));
        assert_eq!(debug, "Digest(ba7816bf...)");
    }
}
