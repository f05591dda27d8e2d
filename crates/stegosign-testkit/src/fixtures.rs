//! Test fixtures and helpers.
//!
//! Key generation dominates test time, so fixtures draw from a small pool of
//! seeded key pairs built once per process.

use std::sync::OnceLock;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;

use stegosign::{Opened, Sealed, SessionConfig, SignedEmbedder, SigningContext};
use stegosign_codec::TrailerCodec;
use stegosign_core::{KeyPair, KeyPairGenerator, DEFAULT_KEY_BITS};

/// Seeds for the shared key pool.
pub const POOL_SEEDS: [u64; 4] = [0x5EED_0001, 0x5EED_0002, 0x5EED_0003, 0x5EED_0004];

/// Default container size used by fixtures, in bytes.
pub const CONTAINER_LEN: usize = 64 * 1024;

/// Generate a 512-bit key pair deterministically from `seed`.
pub fn seeded_keypair(seed: u64) -> KeyPair {
    let (keypair, _) = KeyPairGenerator::new(DEFAULT_KEY_BITS)
        .expect("default key size is valid")
        .generate_with_rng(&mut StdRng::seed_from_u64(seed))
        .expect("generation without a cancel token cannot fail");
    keypair
}

/// The shared pool of seeded key pairs, one per entry of [`POOL_SEEDS`].
pub fn keypair_pool() -> &'static [KeyPair] {
    static POOL: OnceLock<Vec<KeyPair>> = OnceLock::new();
    POOL.get_or_init(|| POOL_SEEDS.iter().map(|&seed| seeded_keypair(seed)).collect())
}

/// A deterministic stand-in for raw image bytes.
pub fn container_image(len: usize) -> Bytes {
    Bytes::from(
        (0..len)
            .map(|i| ((i * 31 + i / 7) % 256) as u8)
            .collect::<Vec<_>>(),
    )
}

/// A test fixture with a signing context, an embedder, and a container.
pub struct TestFixture {
    pub context: SigningContext,
    pub embedder: SignedEmbedder<TrailerCodec>,
    pub container: Bytes,
}

impl TestFixture {
    /// Create a fixture around the first pooled key pair.
    pub fn new() -> Self {
        Self::from_keypair(keypair_pool()[0].clone())
    }

    /// Create a fixture around pooled key pair `index` (modulo pool size).
    pub fn pooled(index: usize) -> Self {
        let pool = keypair_pool();
        Self::from_keypair(pool[index % pool.len()].clone())
    }

    /// Create a fixture with a freshly generated key pair.
    pub fn fresh() -> Self {
        let context =
            SigningContext::generate(&SessionConfig::default()).expect("default config is valid");
        Self::from_context(context)
    }

    /// Create a fixture around a specific key pair.
    pub fn from_keypair(keypair: KeyPair) -> Self {
        Self::from_context(SigningContext::new(keypair))
    }

    fn from_context(context: SigningContext) -> Self {
        Self {
            context,
            embedder: SignedEmbedder::new(TrailerCodec::new(), &SessionConfig::default()),
            container: container_image(CONTAINER_LEN),
        }
    }

    /// Sign `message` and embed it in the fixture's container.
    pub fn seal(&self, message: &str) -> Sealed {
        self.embedder
            .seal(&self.context, &self.container, message)
            .expect("fixture container has room for a short message")
    }

    /// Extract and verify a carrier produced from the fixture's container.
    pub fn open(&self, carrier: &Bytes) -> stegosign::Result<Opened> {
        self.embedder.open(&self.context, &self.container, carrier)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures with distinct key pairs for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            if i < POOL_SEEDS.len() {
                TestFixture::pooled(i)
            } else {
                TestFixture::from_keypair(seeded_keypair(0x5EED_0000 + i as u64 + 1))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stegosign::Verdict;

    #[test]
    fn test_seeded_keypair_is_deterministic() {
        assert_eq!(seeded_keypair(7), seeded_keypair(7));
        assert_ne!(
            seeded_keypair(7).public_key(),
            seeded_keypair(8).public_key()
        );
    }

    #[test]
    fn test_pool_keys_are_distinct() {
        let pool = keypair_pool();
        assert_eq!(pool.len(), POOL_SEEDS.len());
        for (i, a) in pool.iter().enumerate() {
            for b in &pool[i + 1..] {
                assert_ne!(a.public_key(), b.public_key());
            }
        }
    }

    #[test]
    fn test_fixture_seal_open() {
        let fixture = TestFixture::new();
        let sealed = fixture.seal("fixture message");
        let opened = fixture.open(&sealed.carrier).unwrap();
        assert_eq!(opened.verdict, Verdict::Valid);
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(5);
        let pks: Vec<_> = parties.iter().map(|p| p.context.public_key().clone()).collect();
        for (i, a) in pks.iter().enumerate() {
            for b in &pks[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
