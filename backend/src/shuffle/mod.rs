//! Unbiased Fisher-Yates shuffle driven by the bit generator
//!
//! For `i` from `len - 1` down to 1, a `ceil(log2(i + 1))`-bit integer is
//! drawn and redrawn until it is `<= i` (rejection sampling, no modulo
//! reduction). Positions `i` and `r` are swapped when they differ. Only real
//! swaps are recorded, so the trace is shorter than `len - 1` whenever a
//! position selects itself.

pub mod deck;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{OperationResult, StepRecord};
use crate::rng::{bits_needed, BbsGenerator};

pub use deck::{shuffle_deck, standard_deck, DeckShuffle, RANKS, SUITS};

/// Redraw ceiling per position.
///
/// Each draw is accepted with probability above 1/2, so only a stuck stream
/// (e.g. a state that squares to itself) reaches this.
pub const MAX_REJECTIONS_PER_POSITION: usize = 1024;

/// Errors raised by the shuffler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("Bit stream rejected {attempts} consecutive draws at position {position}")]
    DegenerateStream { position: usize, attempts: usize },
}

/// Shuffler output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleOutcome<T> {
    pub permuted: Vec<T>,
    /// One record per swap actually performed
    pub steps: Vec<StepRecord>,
    /// Out-of-range draws discarded by rejection sampling
    pub rejected_draws: usize,
}

impl<T: Serialize> ShuffleOutcome<T> {
    /// Generic form with the permutation JSON-encoded as the payload
    pub fn to_operation_result(&self) -> Result<OperationResult, serde_json::Error> {
        Ok(OperationResult {
            payload: serde_json::to_string(&self.permuted)?,
            steps: self.steps.clone(),
        })
    }
}

/// Shuffle `sequence` into a uniformly random permutation
///
/// Sequences of length 0 or 1 come back unchanged with no steps and no draws.
///
/// # Errors
/// Returns `ShuffleError::DegenerateStream` if a single position exhausts
/// [`MAX_REJECTIONS_PER_POSITION`] redraws.
pub fn shuffle<T>(
    generator: &mut BbsGenerator,
    mut sequence: Vec<T>,
) -> Result<ShuffleOutcome<T>, ShuffleError> {
    let mut steps = Vec::new();
    let mut rejected_draws = 0;

    for i in (1..sequence.len()).rev() {
        let bound = i as u64;
        let bits = bits_needed(bound + 1);

        let mut attempts = 0;
        let r = loop {
            let draw = generator.next_u64(bits);
            if draw <= bound {
                break draw;
            }
            attempts += 1;
            if attempts > MAX_REJECTIONS_PER_POSITION {
                return Err(ShuffleError::DegenerateStream {
                    position: i,
                    attempts,
                });
            }
        };
        rejected_draws += attempts;

        if r != bound {
            let j = r as usize;
            sequence.swap(i, j);
            steps.push(StepRecord::new(steps.len() + 1, r, r));
        }
    }

    Ok(ShuffleOutcome {
        permuted: sequence,
        steps,
        rejected_draws,
    })
}
