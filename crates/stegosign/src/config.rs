//! Session configuration.

use std::time::Duration;

use stegosign_core::{DEFAULT_KEY_BITS, DEFAULT_WITNESSES};

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Total key size in bits.
    pub key_bits: usize,
    /// Fermat witnesses per prime candidate.
    pub witness_count: usize,
    /// Deadline for a single key generation. `None` waits indefinitely.
    pub keygen_timeout: Option<Duration>,
    /// Whether to check the envelope against the codec's capacity before
    /// embedding.
    pub enforce_capacity: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            witness_count: DEFAULT_WITNESSES,
            keygen_timeout: None,
            enforce_capacity: true,
        }
    }
}

impl SessionConfig {
    /// Set the key size.
    pub fn key_bits(mut self, bits: usize) -> Self {
        self.key_bits = bits;
        self
    }

    /// Set the number of Fermat witnesses.
    pub fn witness_count(mut self, count: usize) -> Self {
        self.witness_count = count;
        self
    }

    /// Bound key generation time.
    pub fn keygen_timeout(mut self, timeout: Duration) -> Self {
        self.keygen_timeout = Some(timeout);
        self
    }

    /// Toggle the capacity pre-check.
    pub fn enforce_capacity(mut self, enforce: bool) -> Self {
        self.enforce_capacity = enforce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.key_bits, 512);
        assert_eq!(config.witness_count, 128);
        assert_eq!(config.keygen_timeout, None);
        assert!(config.enforce_capacity);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::default()
            .key_bits(1024)
            .witness_count(32)
            .keygen_timeout(Duration::from_secs(5))
            .enforce_capacity(false);
        assert_eq!(config.key_bits, 1024);
        assert_eq!(config.witness_count, 32);
        assert_eq!(config.keygen_timeout, Some(Duration::from_secs(5)));
        assert!(!config.enforce_capacity);
    }
}
