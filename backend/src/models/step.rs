//! Audit trace records
//!
//! Every operation returns its domain result paired with an ordered list of
//! [`StepRecord`]s. The record layout is a fixed external contract; what
//! `raw_draw` and `marker` mean depends on the operation:
//!
//! | operation | `raw_draw`                  | `marker`                        |
//! |-----------|-----------------------------|---------------------------------|
//! | cipher    | 8-bit generator draw        | low bit of the TRANSFORMED byte |
//! | sampler   | single display bit          | the same bit                    |
//! | shuffler  | accepted index draw         | the same index                  |
//!
//! Serialized field names (`n`, `xn`, `bit`) are the ones existing front ends read.

use serde::{Deserialize, Serialize};

/// One drawn value in an operation's trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based position within the operation's draw sequence
    #[serde(rename = "n")]
    pub index: usize,

    /// Decimal string of the drawn value
    #[serde(rename = "xn")]
    pub raw_draw: String,

    /// Operation-specific diagnostic value
    #[serde(rename = "bit")]
    pub marker: u64,
}

impl StepRecord {
    pub fn new(index: usize, raw_draw: impl ToString, marker: u64) -> Self {
        Self {
            index,
            raw_draw: raw_draw.to_string(),
            marker,
        }
    }
}

/// Generic (payload, trace) pair
///
/// `payload` is the hex ciphertext, the recovered text, the winning slot, or
/// the JSON-encoded permutation. It serializes as `ciphertextHex` regardless
/// of operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    #[serde(rename = "ciphertextHex")]
    pub payload: String,
    pub steps: Vec<StepRecord>,
}
