//! Textbook modular-exponentiation signatures.
//!
//! `sign` computes `H(m)^d mod n` and `verify` checks `s^e mod n == H(m)`,
//! where `H` is SHA-256 read as a big-endian integer. There is no padding or
//! salt, so signatures are deterministic and inherit every weakness of the
//! unpadded scheme (notably multiplicative malleability).

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::digest::hash_message;
use crate::error::{CoreError, Result};
use crate::keys::{PrivateKey, PublicKey};

/// A signature: an integer in `[0, n)` for the signing key's modulus.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Signature(BigUint);

impl Signature {
    /// Wrap a raw integer.
    pub fn from_biguint(value: BigUint) -> Self {
        Self(value)
    }

    /// The signature as an integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Decimal representation, as carried inside an envelope.
    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// Parse a decimal representation. Only ASCII digits are accepted.
    pub fn from_decimal(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidSignature(format!(
                "expected decimal digits, got {s:?}"
            )));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidSignature(format!("unparseable integer {s:?}")))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimal = self.to_decimal();
        if decimal.len() > 16 {
            write!(f, "Signature({}...)", &decimal[..16])
        } else {
            write!(f, "Signature({decimal})")
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Signature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_decimal(s)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.to_decimal()
    }
}

impl TryFrom<String> for Signature {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_decimal(&s)
    }
}

impl From<BigUint> for Signature {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

/// Sign a message with a private key.
pub fn sign(message: impl AsRef<[u8]>, key: &PrivateKey) -> Signature {
    let digest = hash_message(message).to_biguint();
    Signature(digest.modpow(key.exponent(), key.modulus()))
}

/// Verify a signature over a message.
///
/// Returns `false` for a signature that does not match, including any value
/// `>= n`, which no signer could have produced.
pub fn verify(message: impl AsRef<[u8]>, signature: &Signature, key: &PublicKey) -> bool {
    if signature.0 >= *key.modulus() {
        return false;
    }
    let digest = hash_message(message).to_biguint();
    signature.0.modpow(key.exponent(), key.modulus()) == digest
}

impl PrivateKey {
    /// Sign a message.
    pub fn sign(&self, message: impl AsRef<[u8]>) -> Signature {
        sign(message, self)
    }
}

impl PublicKey {
    /// Verify a signature over a message.
    pub fn verify(&self, message: impl AsRef<[u8]>, signature: &Signature) -> bool {
        verify(message, signature, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{KeyPair, DEFAULT_KEY_BITS};
    use num_traits::One;

    fn keypair() -> KeyPair {
        KeyPair::generate(DEFAULT_KEY_BITS).unwrap()
    }

    #[test]
    fn test_sign_verify() {
        let keypair = keypair();
        let message = "hello world";
        let signature = keypair.private_key().sign(message);

        assert!(keypair.public_key().verify(message, &signature));

        // Tampered message should fail
        assert!(!keypair.public_key().verify("hello worlD", &signature));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let keypair = keypair();
        let a = sign(b"same bytes", keypair.private_key());
        let b = sign(b"same bytes", keypair.private_key());
        assert_eq!(a, b);
    }

    #[test]
    fn test_tampered_signature_fails() {
        let keypair = keypair();
        let signature = sign("payload", keypair.private_key());
        let bumped = Signature::from_biguint(signature.as_biguint() + BigUint::one());
        assert!(!verify("payload", &bumped, keypair.public_key()));
    }

    #[test]
    fn test_signature_out_of_range_is_invalid() {
        let keypair = keypair();
        let signature = sign("payload", keypair.private_key());

        // congruent mod n, so the raw arithmetic would accept it
        let shifted = Signature::from_biguint(signature.as_biguint() + keypair.public_key().modulus());
        assert!(!verify("payload", &shifted, keypair.public_key()));
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = keypair();
        let other = keypair();
        let signature = sign("payload", signer.private_key());
        assert!(!verify("payload", &signature, other.public_key()));
    }

    #[test]
    fn test_decimal_roundtrip_and_rejection() {
        let signature = Signature::from_biguint(BigUint::from(1234567890u64));
        assert_eq!(signature.to_string(), "1234567890");
        assert_eq!("1234567890".parse::<Signature>().unwrap(), signature);

        for bad in ["", "12a", "-5", "+5", " 5", "1_000", "0x10"] {
            assert!(
                matches!(bad.parse::<Signature>(), Err(CoreError::InvalidSignature(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_signature_serializes_as_decimal_string() {
        let signature = Signature::from_biguint(BigUint::from(42u32));
        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(json, "\"42\"");
        let recovered: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, signature);
    }
}
