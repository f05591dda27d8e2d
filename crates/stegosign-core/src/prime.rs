//! Random prime generation.
//!
//! Candidates are sampled with the top bit set (exact bit length) and the
//! bottom bit set (odd), then filtered through the Fermat test. The loop has
//! no attempt cap: by the prime number theorem roughly `ln(2^bits) / 2`
//! odd candidates are needed on average, but a degenerate entropy source
//! could keep it running forever. Callers that need bounded latency should
//! hold a [`CancelToken`] and trip it from outside.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;

use crate::error::{CoreError, Result};
use crate::primality::{is_probably_prime_with_rng, DEFAULT_WITNESSES};

/// Shared flag used to stop a running generator from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Generators observe it before the next candidate.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A prime together with the number of candidates sampled to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrime {
    pub value: BigUint,
    pub attempts: u64,
}

/// Generator for random primes of a fixed bit length.
#[derive(Debug, Clone)]
pub struct PrimeGenerator {
    bits: usize,
    witnesses: usize,
    cancel: Option<CancelToken>,
}

impl PrimeGenerator {
    /// Create a generator for primes of exactly `bits` bits.
    pub fn new(bits: usize) -> Result<Self> {
        if bits < 2 {
            return Err(CoreError::InvalidBitLength(bits));
        }
        Ok(Self {
            bits,
            witnesses: DEFAULT_WITNESSES,
            cancel: None,
        })
    }

    /// Set the number of Fermat witnesses per candidate.
    pub fn witnesses(mut self, witnesses: usize) -> Self {
        self.witnesses = witnesses;
        self
    }

    /// Attach a cancellation token.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The configured bit length.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Sample a single candidate: `bits` random bits with the top and bottom
    /// bits forced on.
    pub fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        let raw = rng.gen_biguint(self.bits as u64);
        let top = BigUint::one() << (self.bits - 1);
        raw | top | BigUint::one()
    }

    /// Sample candidates until one passes the primality test.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedPrime> {
        let mut attempts = 0u64;
        loop {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(CoreError::Cancelled);
            }
            attempts += 1;
            let candidate = self.candidate(rng);
            if is_probably_prime_with_rng(&candidate, self.witnesses, rng) {
                return Ok(GeneratedPrime {
                    value: candidate,
                    attempts,
                });
            }
        }
    }
}

/// Generate a random prime of exactly `bits` bits using the thread-local RNG.
pub fn generate_prime(bits: usize) -> Result<BigUint> {
    let generated = PrimeGenerator::new(bits)?.generate(&mut rand::thread_rng())?;
    Ok(generated.value)
}
