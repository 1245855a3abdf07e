//! Blum-Blum-Shub bit generator
//!
//! # Algorithm
//!
//! ```text
//! modulus = p * q
//! x_0     = seed^2 mod modulus
//! x_{n+1} = x_n^2  mod modulus      (squared BEFORE the bit is read)
//! bit_n   = x_{n+1} mod 2
//! ```
//!
//! # Determinism
//!
//! Same (p, q, seed) → same bit stream. The encrypt/decrypt symmetry of the
//! stream cipher depends on both sides constructing a fresh generator from
//! identical parameters and drawing the same number of bits in the same order.
//!
//! The generator performs no primality or `≡ 3 mod 4` check on `p` and `q`.
//! Non-conforming factors degrade the quality of the stream, they do not fail.

use num_bigint::BigUint;
use num_traits::One;
use thiserror::Error;

/// Errors raised while constructing a generator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid modulus: p * q = {modulus} must be greater than 1")]
    InvalidModulus { modulus: BigUint },
}

/// Number of bits needed to address `count` distinct values: `ceil(log2(count))`.
///
/// Zero and one both need no bits at all.
///
/// # Example
/// ```
/// use bbs_demo_core_rs::rng::bits_needed;
///
/// assert_eq!(bits_needed(1), 0);
/// assert_eq!(bits_needed(8), 3);
/// assert_eq!(bits_needed(20), 5);
/// ```
pub fn bits_needed(count: u64) -> u32 {
    if count <= 1 {
        0
    } else {
        u64::BITS - (count - 1).leading_zeros()
    }
}

/// Deterministic bit generator using Blum-Blum-Shub
///
/// # Example
/// ```
/// use bbs_demo_core_rs::BbsGenerator;
/// use num_bigint::BigUint;
///
/// let mut rng = BbsGenerator::new(
///     &BigUint::from(11u32),
///     &BigUint::from(19u32),
///     &BigUint::from(3u32),
/// )
/// .unwrap();
///
/// assert_eq!(rng.current_state(), &BigUint::from(9u32));
/// assert_eq!(rng.next_bit(), 1); // 9^2 mod 209 = 81, which is odd
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbsGenerator {
    /// p * q, always > 1
    modulus: BigUint,
    /// seed^2 mod modulus, fixed at construction
    initial: BigUint,
    /// Advances on every bit draw; always < modulus
    current: BigUint,
    /// Total bits drawn since construction or the last reset
    bits_drawn: u64,
}

impl BbsGenerator {
    /// Create a new generator from two factors and a seed
    ///
    /// # Arguments
    /// * `p` - First factor (expected prime ≡ 3 mod 4, not checked)
    /// * `q` - Second factor (expected prime ≡ 3 mod 4, not checked)
    /// * `seed` - Initial seed value
    ///
    /// # Errors
    /// Returns `GeneratorError::InvalidModulus` if `p * q <= 1`.
    pub fn new(p: &BigUint, q: &BigUint, seed: &BigUint) -> Result<Self, GeneratorError> {
        let modulus = p * q;
        if modulus <= BigUint::one() {
            return Err(GeneratorError::InvalidModulus { modulus });
        }

        let initial = (seed * seed) % &modulus;
        Ok(Self {
            current: initial.clone(),
            modulus,
            initial,
            bits_drawn: 0,
        })
    }

    /// Rebuild a generator from previously captured parts.
    ///
    /// Callers are responsible for the invariants (`modulus > 1`,
    /// `initial < modulus`, `current < modulus`).
    pub(crate) fn from_parts(
        modulus: BigUint,
        initial: BigUint,
        current: BigUint,
        bits_drawn: u64,
    ) -> Self {
        Self {
            modulus,
            initial,
            current,
            bits_drawn,
        }
    }

    /// Generate the next random bit (0 or 1)
    ///
    /// The state is squared first, then its parity is returned. The very
    /// first bit therefore comes from `initial^2 mod modulus`.
    pub fn next_bit(&mut self) -> u8 {
        self.current = (&self.current * &self.current) % &self.modulus;
        self.bits_drawn += 1;
        u8::from(self.current.bit(0))
    }

    /// Draw `bit_length` bits and assemble them most-significant-bit first
    ///
    /// The first bit drawn becomes the most significant bit of the result.
    /// A zero bit length draws nothing and yields 0.
    ///
    /// # Example
    /// ```
    /// use bbs_demo_core_rs::BbsGenerator;
    /// use num_bigint::BigUint;
    ///
    /// let mut rng = BbsGenerator::new(
    ///     &BigUint::from(11u32),
    ///     &BigUint::from(19u32),
    ///     &BigUint::from(3u32),
    /// )
    /// .unwrap();
    /// assert_eq!(rng.next_integer(8), BigUint::from(130u32));
    /// ```
    pub fn next_integer(&mut self, bit_length: u32) -> BigUint {
        let mut result = BigUint::default();
        for _ in 0..bit_length {
            result <<= 1u32;
            result += BigUint::from(self.next_bit());
        }
        result
    }

    /// Same draw order as [`next_integer`](Self::next_integer), into a machine word
    ///
    /// # Panics
    /// Panics if `bit_length > 64`
    pub fn next_u64(&mut self, bit_length: u32) -> u64 {
        assert!(bit_length <= u64::BITS, "bit_length must not exceed 64");

        let mut result = 0u64;
        for _ in 0..bit_length {
            result = (result << 1) | u64::from(self.next_bit());
        }
        result
    }

    /// Current internal value (does not advance the state)
    pub fn current_state(&self) -> &BigUint {
        &self.current
    }

    /// `seed^2 mod modulus`, as captured at construction
    pub fn initial_state(&self) -> &BigUint {
        &self.initial
    }

    /// `p * q`
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bits drawn since construction or the last [`reset`](Self::reset)
    pub fn bits_drawn(&self) -> u64 {
        self.bits_drawn
    }

    /// Rewind to the initial state so the same stream replays from the start
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.bits_drawn = 0;
    }
}
