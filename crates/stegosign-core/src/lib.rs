//! # Stegosign Core
//!
//! Pure primitives for signing a message before it is hidden in an image:
//! prime generation, key pairs, digests, signatures, and the text envelope
//! that carries a signature through an embedding codec.
//!
//! This crate contains no I/O, no logging, no async. It is pure computation
//! over big integers.
//!
//! ## Scheme
//!
//! Textbook modular exponentiation over a SHA-256 digest:
//!
//! - keys: `n = p * q`, `e = 65537`, `d = e^-1 mod (p-1)(q-1)`
//! - sign: `s = H(m)^d mod n`
//! - verify: `s^e mod n == H(m)`
//!
//! Primes come from a Fermat probable-prime test (see [`primality`]).
//!
//! ```rust
//! use stegosign_core::{Envelope, KeyPair, DEFAULT_KEY_BITS};
//!
//! let keypair = KeyPair::generate(DEFAULT_KEY_BITS).unwrap();
//! let signature = keypair.private_key().sign("hello world");
//! assert!(keypair.public_key().verify("hello world", &signature));
//!
//! let text = Envelope::new(signature, "hello world").encode();
//! let envelope = Envelope::decode(&text).unwrap();
//! assert!(keypair.public_key().verify(&envelope.message, &envelope.signature));
//! ```

pub mod digest;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod primality;
pub mod prime;
pub mod signature;

pub use digest::{hash_message, Digest, DIGEST_BITS};
pub use envelope::Envelope;
pub use error::{CoreError, Result};
pub use keys::{
    generate_keys, KeyGenStats, KeyPair, KeyPairGenerator, PrivateKey, PublicKey,
    DEFAULT_KEY_BITS, MIN_KEY_BITS, PUBLIC_EXPONENT,
};
pub use primality::{is_probably_prime, is_probably_prime_with_rng, DEFAULT_WITNESSES};
pub use prime::{generate_prime, CancelToken, GeneratedPrime, PrimeGenerator};
pub use signature::{sign, verify, Signature};
