//! Per-operation configuration
//!
//! Parameters cross the boundary as decimal strings and are parsed into
//! arbitrary-precision integers before reaching the generator.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::rng::{BbsGenerator, GeneratorError};
use crate::service::BbsError;

/// Default number of roulette slots
pub const DEFAULT_ROULETTE_SLOTS: usize = 20;

/// Generator parameters for one operation
///
/// Serializes each field as a decimal string:
/// `{"p": "61", "q": "53", "seed": "12"}`.
///
/// # Example
/// ```
/// use bbs_demo_core_rs::BbsParams;
///
/// let params = BbsParams::parse("11", "19", "3").unwrap();
/// let rng = params.generator().unwrap();
/// assert_eq!(rng.modulus().to_string(), "209");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbsParams {
    #[serde(with = "decimal")]
    pub p: BigUint,
    #[serde(with = "decimal")]
    pub q: BigUint,
    #[serde(with = "decimal")]
    pub seed: BigUint,
}

impl BbsParams {
    pub fn new(p: impl Into<BigUint>, q: impl Into<BigUint>, seed: impl Into<BigUint>) -> Self {
        Self {
            p: p.into(),
            q: q.into(),
            seed: seed.into(),
        }
    }

    /// Parse three decimal strings
    ///
    /// # Errors
    /// Returns `BbsError::InvalidParameter` naming the first field that is
    /// empty or contains anything other than ASCII digits (after trimming).
    pub fn parse(p: &str, q: &str, seed: &str) -> Result<Self, BbsError> {
        Ok(Self {
            p: parse_decimal("p", p)?,
            q: parse_decimal("q", q)?,
            seed: parse_decimal("seed", seed)?,
        })
    }

    /// Construct a fresh generator for a single operation
    ///
    /// Generators are never shared between operations; call this once per
    /// encrypt, decrypt, spin or shuffle.
    pub fn generator(&self) -> Result<BbsGenerator, GeneratorError> {
        BbsGenerator::new(&self.p, &self.q, &self.seed)
    }

    /// Factors that are not `≡ 3 mod 4`, with their residue mod 4
    ///
    /// Advisory only. No primality test is performed.
    pub fn non_blum_factors(&self) -> Vec<(&'static str, u32)> {
        [("p", &self.p), ("q", &self.q)]
            .into_iter()
            .filter_map(|(name, factor)| {
                let residue = (factor % 4u32).to_u32().unwrap_or_default();
                (residue != 3).then_some((name, residue))
            })
            .collect()
    }
}

impl Default for BbsParams {
    /// Demo parameters: p = 61, q = 53, seed = 12
    fn default() -> Self {
        Self::new(61u32, 53u32, 12u32)
    }
}

/// Parse a non-negative decimal integer, naming the field on failure
pub fn parse_decimal(name: &'static str, value: &str) -> Result<BigUint, BbsError> {
    let trimmed = value.trim();
    let invalid = || BbsError::InvalidParameter {
        name,
        value: value.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(invalid)
}

/// Roulette table configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteConfig {
    pub slots: usize,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_ROULETTE_SLOTS,
        }
    }
}

mod decimal {
    use num_bigint::BigUint;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!(
                "expected a non-negative decimal integer, got {:?}",
                raw
            )));
        }
        BigUint::parse_bytes(trimmed.as_bytes(), 10)
            .ok_or_else(|| D::Error::custom(format!("unparseable decimal integer {:?}", raw)))
    }
}
