//! Proptest generators for property-based testing.

use num_bigint::BigUint;
use proptest::prelude::*;

use stegosign_core::{KeyPair, Signature};

use crate::fixtures::keypair_pool;

/// Pick a key pair from the shared seeded pool.
pub fn pooled_keypair() -> impl Strategy<Value = KeyPair> {
    (0..keypair_pool().len()).prop_map(|i| keypair_pool()[i].clone())
}

/// Pick two different key pairs from the pool.
pub fn distinct_keypairs() -> impl Strategy<Value = (KeyPair, KeyPair)> {
    let len = keypair_pool().len();
    (0..len, 1..len).prop_map(move |(i, offset)| {
        let pool = keypair_pool();
        (pool[i].clone(), pool[(i + offset) % len].clone())
    })
}

/// Any text, including `:`.
pub fn any_message() -> impl Strategy<Value = String> {
    ".{0,200}".prop_map(String::from)
}

/// Text that survives an envelope round trip (no `:`).
pub fn transportable_message() -> impl Strategy<Value = String> {
    "[^:]{0,200}".prop_map(String::from)
}

/// Text guaranteed to contain at least one `:`.
pub fn colon_message() -> impl Strategy<Value = String> {
    ("[^:]{0,40}", "[^:]{0,40}").prop_map(|(head, tail)| format!("{head}:{tail}"))
}

/// Arbitrary message bytes.
pub fn message_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// A signature value of up to `bytes` random bytes.
pub fn signature_value(bytes: usize) -> impl Strategy<Value = Signature> {
    prop::collection::vec(any::<u8>(), 1..=bytes)
        .prop_map(|raw| Signature::from_biguint(BigUint::from_bytes_be(&raw)))
}

/// A key pair and a message to sign with it.
#[derive(Debug, Clone)]
pub struct SignCase {
    pub keypair: KeyPair,
    pub message: String,
}

impl Arbitrary for SignCase {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (pooled_keypair(), any_message())
            .prop_map(|(keypair, message)| SignCase { keypair, message })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stegosign_core::{sign, verify, Envelope};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_sign_verify_roundtrip(case: SignCase) {
            let signature = sign(&case.message, case.keypair.private_key());
            prop_assert!(verify(&case.message, &signature, case.keypair.public_key()));
        }

        #[test]
        fn test_signing_is_deterministic(case: SignCase) {
            let a = sign(&case.message, case.keypair.private_key());
            let b = sign(&case.message, case.keypair.private_key());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn test_bytes_sign_verify(keypair in pooled_keypair(), message in message_bytes(512)) {
            let signature = keypair.private_key().sign(&message);
            prop_assert!(keypair.public_key().verify(&message, &signature));
        }

        #[test]
        fn test_colon_messages_are_truncated(message in colon_message()) {
            prop_assert!(!Envelope::is_transportable(&message));
            let envelope = Envelope::new(Signature::from_biguint(BigUint::from(1u32)), message.clone());
            let decoded = Envelope::decode(&envelope.encode()).unwrap();
            prop_assert_ne!(decoded.message, message);
        }

        #[test]
        fn test_distinct_keypairs_differ((a, b) in distinct_keypairs()) {
            prop_assert_ne!(a.public_key(), b.public_key());
        }
    }
}
