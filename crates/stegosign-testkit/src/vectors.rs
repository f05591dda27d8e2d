//! Golden test vectors for deterministic verification.
//!
//! Digest and envelope vectors pin the byte-level formats. The signature
//! vectors use a fixed pair of 256-bit primes so that any implementation of
//! the scheme must reproduce the exact signature integers.

use num_bigint::BigUint;

use stegosign_core::{hash_message, Envelope, KeyPair, Signature};

/// Known SHA-256 digest of a message.
#[derive(Debug, Clone)]
pub struct DigestVector {
    pub name: &'static str,
    pub message: &'static str,
    pub digest_hex: &'static str,
}

/// Envelope text and the fields it decodes to.
#[derive(Debug, Clone)]
pub struct EnvelopeVector {
    pub name: &'static str,
    pub signature: &'static str,
    pub message: &'static str,
    pub encoded: &'static str,
    /// The message recovered by decoding `encoded`.
    pub decoded_message: &'static str,
}

/// A signature under the fixed golden key.
#[derive(Debug, Clone)]
pub struct SignatureVector {
    pub name: &'static str,
    pub message: &'static str,
    pub signature: &'static str,
}

/// First prime of the golden key.
pub const GOLDEN_P: &str =
    "99228037585593539916185199956532980522288895352421028661976399402760339679039";

/// Second prime of the golden key.
pub const GOLDEN_Q: &str =
    "82226853154944048616521678438356185481893161135780820586132850707689512231467";

/// Modulus of the golden key.
pub const GOLDEN_N: &str = "8159209275403868804222038595279181281973942928997650389514134841408391154562171868961504810675295183340255858237601484926597285181461812122074083456120213";

/// Get the digest vectors.
pub fn digest_vectors() -> Vec<DigestVector> {
    vec![
        DigestVector {
            name: "empty message",
            message: "",
            digest_hex: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        DigestVector {
            name: "abc",
            message: "abc",
            digest_hex: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        DigestVector {
            name: "hello world",
            message: "hello world",
            digest_hex: "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        },
        DigestVector {
            name: "pangram",
            message: "The quick brown fox jumps over the lazy dog",
            digest_hex: "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
        },
        DigestVector {
            name: "cyrillic",
            message: "Секретное сообщение для передачи",
            digest_hex: "a4b02040f007881f5beca47a0f5d921a3fb233317392de5181dcce186cab375c",
        },
    ]
}

/// Get the envelope vectors.
pub fn envelope_vectors() -> Vec<EnvelopeVector> {
    vec![
        EnvelopeVector {
            name: "plain message",
            signature: "12345",
            message: "hello world",
            encoded: "SIGNATURE:12345:MESSAGE:hello world",
            decoded_message: "hello world",
        },
        EnvelopeVector {
            name: "empty message",
            signature: "0",
            message: "",
            encoded: "SIGNATURE:0:MESSAGE:",
            decoded_message: "",
        },
        EnvelopeVector {
            name: "cyrillic message",
            signature: "987654321987654321987654321",
            message: "Секретное сообщение для передачи",
            encoded: "SIGNATURE:987654321987654321987654321:MESSAGE:Секретное сообщение для передачи",
            decoded_message: "Секретное сообщение для передачи",
        },
        EnvelopeVector {
            name: "message with delimiter is truncated",
            signature: "42",
            message: "meet at 12:30",
            encoded: "SIGNATURE:42:MESSAGE:meet at 12:30",
            decoded_message: "meet at 12",
        },
    ]
}

/// Get the signature vectors under the golden key.
pub fn signature_vectors() -> Vec<SignatureVector> {
    vec![
        SignatureVector {
            name: "hello world",
            message: "hello world",
            signature: "4769450387338488954158380587325200097954759557817007522334593007101658851331942199003365944272007861198274326270125083532106645902140760647575488393786275",
        },
        SignatureVector {
            name: "cyrillic",
            message: "Секретное сообщение для передачи",
            signature: "481722565123732388055166745379344020065166173918322237560688645461363804680425761609089551204059347243357632468248580142242281934187955407752136420512382",
        },
    ]
}

/// Rebuild the golden key pair from [`GOLDEN_P`] and [`GOLDEN_Q`].
pub fn golden_keypair() -> KeyPair {
    let parse = |s: &str| BigUint::parse_bytes(s.as_bytes(), 10).expect("golden prime is decimal");
    KeyPair::from_primes(parse(GOLDEN_P), parse(GOLDEN_Q)).expect("golden primes are valid")
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let mut results = Vec::new();

    for v in digest_vectors() {
        let matches = hash_message(v.message).to_hex() == v.digest_hex;
        results.push((format!("digest: {}", v.name), matches));
    }

    for v in envelope_vectors() {
        let matches = Signature::from_decimal(v.signature)
            .map(|sig| Envelope::new(sig, v.message))
            .ok()
            .filter(|envelope| envelope.encode() == v.encoded)
            .and_then(|_| Envelope::decode(v.encoded).ok())
            .is_some_and(|decoded| decoded.message == v.decoded_message);
        results.push((format!("envelope: {}", v.name), matches));
    }

    let keypair = golden_keypair();
    for v in signature_vectors() {
        let signature = keypair.private_key().sign(v.message);
        let matches = signature.to_decimal() == v.signature
            && keypair.public_key().verify(v.message, &signature);
        results.push((format!("signature: {}", v.name), matches));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches) in verify_all_vectors() {
            assert!(matches, "vector failed: {name}");
        }
    }

    #[test]
    fn test_golden_modulus() {
        let keypair = golden_keypair();
        assert_eq!(keypair.public_key().modulus().to_string(), GOLDEN_N);
        assert_eq!(keypair.public_key().bits(), 512);
    }

    #[test]
    fn test_golden_signature_rejected_under_other_message() {
        let keypair = golden_keypair();
        let signature: Signature = signature_vectors()[0].signature.parse().unwrap();
        assert!(keypair.public_key().verify("hello world", &signature));
        assert!(!keypair.public_key().verify("hello world!", &signature));
    }
}
