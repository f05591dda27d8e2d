//! Fermat probable-prime test.
//!
//! For each witness `a` drawn uniformly from `[2, n-2]` the test checks
//! `a^(n-1) ≡ 1 (mod n)`. One failing witness proves `n` composite; passing
//! every witness only makes `n` a probable prime.
//!
//! This is deliberately the Fermat test and not Miller-Rabin. Carmichael
//! numbers (561, 1105, 1729, ...) satisfy the congruence for every base
//! coprime to them, so they are only rejected when a witness happens to share
//! a factor with the candidate. For uniformly random candidates of cryptographic
//! size that blind spot is negligible; for adversarial input it is not.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;

/// Default number of Fermat witnesses per candidate.
pub const DEFAULT_WITNESSES: usize = 128;

/// Test `candidate` for primality with `witness_count` random Fermat witnesses,
/// drawing them from the thread-local RNG.
pub fn is_probably_prime(candidate: &BigUint, witness_count: usize) -> bool {
    is_probably_prime_with_rng(candidate, witness_count, &mut rand::thread_rng())
}

/// Test `candidate` for primality, drawing witnesses from `rng`.
///
/// Returns `false` for anything below 2. The witness range `[2, n-2]` is empty
/// for 2 and 3, which are accepted without trials.
pub fn is_probably_prime_with_rng<R: Rng + ?Sized>(
    candidate: &BigUint,
    witness_count: usize,
    rng: &mut R,
) -> bool {
    let two = BigUint::from(2u32);
    if *candidate < two {
        return false;
    }
    if *candidate < BigUint::from(4u32) {
        return true;
    }

    let one = BigUint::one();
    let exponent = candidate - &one;
    for _ in 0..witness_count {
        // upper bound is exclusive: witnesses span [2, n-2]
        let witness = rng.gen_biguint_range(&two, &exponent);
        if witness.modpow(&exponent, candidate) != one {
            return false;
        }
    }
    true
}
