//! Checkpoint - Save/Resume Generator State
//!
//! Captures a generator mid-stream so a session can resume (or replay) the
//! exact bit sequence later.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored generator emits the same bits the original
//!   would have emitted next
//! - **Parameter Matching**: a snapshot only restores under the parameters
//!   it was taken with (SHA-256 fingerprint of the canonical JSON)
//! - **Range**: `current < modulus`, `initial = seed^2 mod modulus`

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::BbsParams;
use crate::rng::BbsGenerator;
use crate::service::BbsError;

/// Generator state snapshot
///
/// Integers are stored as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSnapshot {
    /// SHA-256 of the canonical parameter JSON
    pub params_hash: String,
    pub modulus: String,
    pub initial: String,
    pub current: String,
    pub bits_drawn: u64,
}

impl GeneratorSnapshot {
    /// Capture `generator`, which must have been built from `params`
    pub fn capture(generator: &BbsGenerator, params: &BbsParams) -> Result<Self, BbsError> {
        if generator.modulus() != &(&params.p * &params.q) {
            return Err(BbsError::Checkpoint(
                "generator was not built from these parameters".to_string(),
            ));
        }

        Ok(Self {
            params_hash: compute_params_hash(params)?,
            modulus: generator.modulus().to_string(),
            initial: generator.initial_state().to_string(),
            current: generator.current_state().to_string(),
            bits_drawn: generator.bits_drawn(),
        })
    }

    /// Rebuild the generator, validating the snapshot against `params`
    ///
    /// # Errors
    /// `BbsError::Checkpoint` on fingerprint mismatch, unparseable integers,
    /// or any broken range invariant.
    pub fn restore(&self, params: &BbsParams) -> Result<BbsGenerator, BbsError> {
        let expected_hash = compute_params_hash(params)?;
        if self.params_hash != expected_hash {
            return Err(BbsError::Checkpoint(format!(
                "Parameter fingerprint mismatch: snapshot {}, parameters {}",
                self.params_hash, expected_hash
            )));
        }

        let modulus = parse_field("modulus", &self.modulus)?;
        let initial = parse_field("initial", &self.initial)?;
        let current = parse_field("current", &self.current)?;

        // Re-derive from the parameters rather than trusting the snapshot
        let fresh = params.generator()?;
        if &modulus != fresh.modulus() {
            return Err(BbsError::Checkpoint(format!(
                "Modulus mismatch: snapshot {}, parameters give {}",
                modulus,
                fresh.modulus()
            )));
        }
        if &initial != fresh.initial_state() {
            return Err(BbsError::Checkpoint(format!(
                "Initial state mismatch: snapshot {}, parameters give {}",
                initial,
                fresh.initial_state()
            )));
        }
        if current >= modulus {
            return Err(BbsError::Checkpoint(format!(
                "Current state {} out of range for modulus {}",
                current, modulus
            )));
        }

        Ok(BbsGenerator::from_parts(
            modulus,
            initial,
            current,
            self.bits_drawn,
        ))
    }

    pub fn to_json(&self) -> Result<String, BbsError> {
        serde_json::to_string(self).map_err(|e| BbsError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, BbsError> {
        serde_json::from_str(json).map_err(|e| BbsError::Serialization(e.to_string()))
    }
}

fn parse_field(name: &str, value: &str) -> Result<BigUint, BbsError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BbsError::Checkpoint(format!(
            "Field '{}' is not a decimal integer: {:?}",
            name, value
        )));
    }
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        BbsError::Checkpoint(format!("Field '{}' is not a decimal integer: {:?}", name, value))
    })
}

// ============================================================================
// Parameter Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of a serializable configuration
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_params_hash<T: Serialize>(params: &T) -> Result<String, BbsError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(params).map_err(|e| {
        BbsError::Serialization(format!("Parameter serialization failed: {}", e))
    })?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        BbsError::Serialization(format!("Parameter serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
