//! Signing context: the key pair a session currently signs with.

use stegosign_core::{
    Envelope, KeyGenStats, KeyPair, KeyPairGenerator, PublicKey, Signature,
};

use crate::config::SessionConfig;
use crate::error::Result;

/// Outcome of checking a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The signature matches the message under the public key.
    Valid,
    /// It does not.
    Invalid,
}

impl Verdict {
    /// Whether the signature verified.
    pub fn is_valid(self) -> bool {
        self == Verdict::Valid
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// An immutable key pair with its provenance.
///
/// Contexts are never modified. Regenerating keys builds a new context;
/// signatures made under the old one no longer verify under the new one.
#[derive(Debug, Clone)]
pub struct SigningContext {
    keypair: KeyPair,
    stats: KeyGenStats,
    generation: u64,
}

impl SigningContext {
    /// Wrap an existing key pair as the first generation.
    pub fn new(keypair: KeyPair) -> Self {
        Self {
            keypair,
            stats: KeyGenStats::default(),
            generation: 0,
        }
    }

    pub(crate) fn from_generated(keypair: KeyPair, stats: KeyGenStats, generation: u64) -> Self {
        Self {
            keypair,
            stats,
            generation,
        }
    }

    /// Generate a fresh context on the current thread.
    ///
    /// Blocks for the whole key generation; async callers should go through
    /// [`Session`](crate::Session) instead.
    pub fn generate(config: &SessionConfig) -> Result<Self> {
        let (keypair, stats) = KeyPairGenerator::new(config.key_bits)?
            .witnesses(config.witness_count)
            .generate()?;
        Ok(Self::from_generated(keypair, stats, 0))
    }

    /// Build the next generation of this context with new keys.
    pub fn regenerate(&self, config: &SessionConfig) -> Result<Self> {
        let next = Self::generate(config)?;
        Ok(Self {
            generation: self.generation + 1,
            ..next
        })
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        self.keypair.public_key()
    }

    /// Get the key pair.
    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Work done generating this context's keys.
    pub fn stats(&self) -> KeyGenStats {
        self.stats
    }

    /// How many regenerations preceded this context.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sign a message.
    pub fn sign(&self, message: impl AsRef<[u8]>) -> Signature {
        self.keypair.private_key().sign(message)
    }

    /// Verify a signature against this context's public key.
    pub fn verify(&self, message: impl AsRef<[u8]>, signature: &Signature) -> Verdict {
        self.public_key().verify(message, signature).into()
    }

    /// Sign a message and bundle it into an envelope.
    pub fn envelope(&self, message: &str) -> Envelope {
        Envelope::new(self.sign(message), message)
    }

    /// Verify an envelope's signature over its message.
    pub fn verify_envelope(&self, envelope: &Envelope) -> Verdict {
        self.verify(&envelope.message, &envelope.signature)
    }
}
