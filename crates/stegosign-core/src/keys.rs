//! Key pairs for the modular-exponentiation signature scheme.
//!
//! A key pair shares a modulus `n = p * q` for distinct primes `p` and `q`.
//! The public exponent is fixed at 65537 and the private exponent `d` is its
//! inverse modulo `(p - 1)(q - 1)`, so `(m^e)^d ≡ m (mod n)` for `m < n`.
//!
//! The private exponent never leaves [`PrivateKey`]: there is no accessor,
//! and its `Debug` output is redacted.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::{Digest, DIGEST_BITS};
use crate::error::{CoreError, Result};
use crate::prime::{CancelToken, GeneratedPrime, PrimeGenerator};
use crate::primality::{is_probably_prime, DEFAULT_WITNESSES};

/// The fixed public exponent.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Default total key size in bits.
pub const DEFAULT_KEY_BITS: usize = 512;

/// Smallest total key size whose modulus always exceeds a 256-bit digest.
///
/// Two primes of at least 129 bits each give `n >= 2^256`.
pub const MIN_KEY_BITS: usize = 2 * (DIGEST_BITS / 2 + 1);

/// Public half of a key pair: `(e, n)`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PublicKeyParts", into = "PublicKeyParts")]
pub struct PublicKey {
    e: BigUint,
    n: BigUint,
}

#[derive(Clone, Serialize, Deserialize)]
struct PublicKeyParts {
    e: BigUint,
    n: BigUint,
}

impl PublicKey {
    /// Build a public key from its parts.
    ///
    /// The modulus must exceed every digest (at least 257 bits) and the
    /// exponent must be odd and greater than one.
    pub fn new(e: BigUint, n: BigUint) -> Result<Self> {
        if n.bits() <= DIGEST_BITS as u64 {
            return Err(CoreError::InvalidPublicKey(format!(
                "modulus has {} bits, need more than {}",
                n.bits(),
                DIGEST_BITS
            )));
        }
        if e <= BigUint::one() || e.is_even() {
            return Err(CoreError::InvalidPublicKey(format!(
                "exponent {e} must be odd and greater than 1"
            )));
        }
        if e >= n {
            return Err(CoreError::InvalidPublicKey(
                "exponent must be smaller than the modulus".into(),
            ));
        }
        Ok(Self { e, n })
    }

    /// The public exponent.
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// The modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    /// Short identifier: the first 16 hex characters of SHA-256 over the
    /// big-endian modulus.
    pub fn fingerprint(&self) -> String {
        Digest::hash(&self.n.to_bytes_be()).to_hex()[..16].to_string()
    }
}

impl TryFrom<PublicKeyParts> for PublicKey {
    type Error = CoreError;

    fn try_from(parts: PublicKeyParts) -> Result<Self> {
        Self::new(parts.e, parts.n)
    }
}

impl From<PublicKey> for PublicKeyParts {
    fn from(key: PublicKey) -> Self {
        Self { e: key.e, n: key.n }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(e={}, n={}b, {})", self.e, self.bits(), self.fingerprint())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "e: {}\nn: {} bits ({})",
            self.e,
            self.bits(),
            self.fingerprint()
        )
    }
}

/// Private half of a key pair: `(d, n)`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    d: BigUint,
    n: BigUint,
}

impl PrivateKey {
    pub(crate) fn exponent(&self) -> &BigUint {
        &self.d
    }

    /// The modulus, shared with the public key.
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(d=<redacted>, n={}b)", self.n.bits())
    }
}

/// A matched public and private key.
///
/// Immutable once built; regenerating produces a new value.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair of `bits` total bits with default settings.
    pub fn generate(bits: usize) -> Result<Self> {
        let (keypair, _) = KeyPairGenerator::new(bits)?.generate()?;
        Ok(keypair)
    }

    /// Rebuild a key pair from known primes.
    ///
    /// Both must be distinct probable primes whose product exceeds every
    /// digest, and 65537 must be invertible modulo `(p-1)(q-1)`.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self> {
        if p == q {
            return Err(CoreError::InvalidPrimes("p and q must differ".into()));
        }
        for prime in [&p, &q] {
            if !is_probably_prime(prime, DEFAULT_WITNESSES) {
                return Err(CoreError::InvalidPrimes(format!("{prime} is composite")));
            }
        }

        let one = BigUint::one();
        let phi = (&p - &one) * (&q - &one);
        let e = BigUint::from(PUBLIC_EXPONENT);
        let d = mod_inverse(&e, &phi).ok_or_else(|| {
            CoreError::InvalidPrimes("65537 has no inverse modulo the totient".into())
        })?;

        let public = PublicKey::new(e, p * q)?;
        let n = public.n.clone();
        Ok(Self {
            public,
            private: PrivateKey { d, n },
        })
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Get the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Split into `(public, private)`.
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public, self.private)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public)
    }
}

/// Counters describing how much work a key generation took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyGenStats {
    /// Prime candidates sampled across all rounds.
    pub prime_attempts: u64,
    /// Times `q` was resampled because it equalled `p`.
    pub equal_prime_retries: u64,
    /// Times both primes were discarded because 65537 had no inverse
    /// modulo the totient.
    pub inverse_retries: u64,
}

/// Builder for key pairs.
#[derive(Debug, Clone)]
pub struct KeyPairGenerator {
    bits: usize,
    witnesses: usize,
    cancel: Option<CancelToken>,
}

impl KeyPairGenerator {
    /// Create a generator for keys of `bits` total bits.
    pub fn new(bits: usize) -> Result<Self> {
        if bits < MIN_KEY_BITS {
            return Err(CoreError::KeyTooSmall {
                requested: bits,
                minimum: MIN_KEY_BITS,
            });
        }
        Ok(Self {
            bits,
            witnesses: DEFAULT_WITNESSES,
            cancel: None,
        })
    }

    /// Set the number of Fermat witnesses per prime candidate.
    pub fn witnesses(mut self, witnesses: usize) -> Self {
        self.witnesses = witnesses;
        self
    }

    /// Attach a cancellation token, checked between prime candidates.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Total key size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Generate a key pair using the thread-local RNG.
    pub fn generate(&self) -> Result<(KeyPair, KeyGenStats)> {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// Generate a key pair drawing all randomness from `rng`.
    ///
    /// Primes whose totient shares a factor with 65537 are discarded and the
    /// whole pair is regenerated; nothing partial is ever returned.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(KeyPair, KeyGenStats)> {
        let mut primes = PrimeGenerator::new(self.bits / 2)?.witnesses(self.witnesses);
        if let Some(token) = &self.cancel {
            primes = primes.cancel_token(token.clone());
        }

        assemble_keypair(|| primes.generate(rng))
    }
}

/// Draw primes from `next_prime` until they form a valid key pair.
///
/// q is redrawn while it equals p; both are discarded when 65537 has no
/// inverse modulo the totient.
fn assemble_keypair<F>(mut next_prime: F) -> Result<(KeyPair, KeyGenStats)>
where
    F: FnMut() -> Result<GeneratedPrime>,
{
    let e = BigUint::from(PUBLIC_EXPONENT);
    let mut stats = KeyGenStats::default();
    loop {
        let p = next_prime()?;
        stats.prime_attempts += p.attempts;

        let mut q = next_prime()?;
        stats.prime_attempts += q.attempts;
        while q.value == p.value {
            stats.equal_prime_retries += 1;
            q = next_prime()?;
            stats.prime_attempts += q.attempts;
        }

        let (p, q) = (p.value, q.value);
        let one = BigUint::one();
        let phi = (&p - &one) * (&q - &one);
        let Some(d) = mod_inverse(&e, &phi) else {
            stats.inverse_retries += 1;
            continue;
        };

        let n = p * q;
        let keypair = KeyPair {
            public: PublicKey { e: e.clone(), n: n.clone() },
            private: PrivateKey { d, n },
        };
        return Ok((keypair, stats));
    }
}

/// Generate a key pair of `bits` total bits and return its halves.
pub fn generate_keys(bits: usize) -> Result<(PublicKey, PrivateKey)> {
    Ok(KeyPair::generate(bits)?.into_parts())
}

/// Inverse of `a` modulo `m`, if `gcd(a, m) == 1`.
fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());
    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }
    egcd.x.mod_floor(&m).to_biguint()
}
