//! # Stegosign Testkit
//!
//! Testing utilities for stegosign.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: digests, envelopes, and signatures under a fixed key
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Seeded key pairs and ready-to-use seal/open setups
//!
//! ## Golden Vectors
//!
//! ```rust
//! use stegosign_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches) in verify_all_vectors() {
//!     assert!(matches, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use stegosign_testkit::generators::SignCase;
//!
//! proptest! {
//!     #[test]
//!     fn signatures_verify(case: SignCase) {
//!         let sig = case.keypair.private_key().sign(&case.message);
//!         prop_assert!(case.keypair.public_key().verify(&case.message, &sig));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use stegosign_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let sealed = fixture.seal("hello world");
//! assert!(fixture.open(&sealed.carrier).unwrap().verdict.is_valid());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{keypair_pool, multi_party_fixtures, seeded_keypair, TestFixture};
pub use generators::SignCase;
pub use vectors::{golden_keypair, verify_all_vectors};
