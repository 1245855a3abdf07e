//! Bounded-integer sampler (roulette spin)
//!
//! # Draw sequence
//!
//! For `slot_count` slots, `k = ceil(log2(slot_count))`:
//!
//! 1. `k` single-bit draws, recorded in the trace and then DISCARDED
//! 2. one `k`-bit draw `r`, mapped into range by the chosen strategy
//!
//! # Bias
//!
//! [`SamplingStrategy::Modulo`] (the default, used by [`sample`]) returns
//! `r mod slot_count`. When `slot_count` is not a power of two this favors
//! the low indices: with 3 slots and `k = 2`, index 0 is hit by both `r = 0`
//! and `r = 3`. [`SamplingStrategy::Rejection`] redraws instead and is
//! uniform, but it consumes a different number of bits, so the two
//! strategies produce different results for the same parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{OperationResult, StepRecord};
use crate::rng::{bits_needed, BbsGenerator};

/// Redraw ceiling for the rejection strategy.
///
/// Each redraw is accepted with probability above 1/2, so only a stuck
/// stream (e.g. a state that squares to itself) reaches this.
pub const MAX_REJECTIONS: usize = 1024;

/// Errors raised by the sampler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplerError {
    #[error("Invalid slot count {0}: at least one slot is required")]
    InvalidSlotCount(usize),

    #[error("Bit stream rejected {attempts} consecutive draws for {slot_count} slots")]
    DegenerateStream { slot_count: usize, attempts: usize },
}

/// How a `k`-bit draw is mapped into `[0, slot_count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// `r mod slot_count` (biased unless `slot_count` is a power of two)
    #[default]
    Modulo,
    /// Redraw until `r < slot_count` (unbiased)
    Rejection,
}

/// Sampler output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOutcome {
    #[serde(rename = "winningNumber")]
    pub winning_index: usize,
    pub steps: Vec<StepRecord>,
}

impl From<SpinOutcome> for OperationResult {
    fn from(result: SpinOutcome) -> Self {
        OperationResult {
            payload: result.winning_index.to_string(),
            steps: result.steps,
        }
    }
}

/// Sample a slot in `[0, slot_count)` with the modulo strategy
pub fn sample(generator: &mut BbsGenerator, slot_count: usize) -> Result<SpinOutcome, SamplerError> {
    sample_with(generator, slot_count, SamplingStrategy::Modulo)
}

/// Sample a slot in `[0, slot_count)` with an explicit strategy
///
/// # Errors
/// - `InvalidSlotCount` if `slot_count == 0` (nothing is drawn)
/// - `DegenerateStream` if the rejection strategy exhausts [`MAX_REJECTIONS`]
pub fn sample_with(
    generator: &mut BbsGenerator,
    slot_count: usize,
    strategy: SamplingStrategy,
) -> Result<SpinOutcome, SamplerError> {
    if slot_count == 0 {
        return Err(SamplerError::InvalidSlotCount(slot_count));
    }

    let slots = slot_count as u64;
    let bits = bits_needed(slots);

    // Display-only draws
    let steps = (0..bits as usize)
        .map(|i| {
            let bit = generator.next_u64(1);
            StepRecord::new(i + 1, bit, bit)
        })
        .collect();

    let winning = match strategy {
        SamplingStrategy::Modulo => generator.next_u64(bits) % slots,
        SamplingStrategy::Rejection => {
            let mut accepted = None;
            for _ in 0..=MAX_REJECTIONS {
                let draw = generator.next_u64(bits);
                if draw < slots {
                    accepted = Some(draw);
                    break;
                }
            }
            accepted.ok_or(SamplerError::DegenerateStream {
                slot_count,
                attempts: MAX_REJECTIONS + 1,
            })?
        }
    };

    Ok(SpinOutcome {
        winning_index: winning as usize,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn rng(p: u32, q: u32, seed: u32) -> BbsGenerator {
        BbsGenerator::new(&BigUint::from(p), &BigUint::from(q), &BigUint::from(seed)).unwrap()
    }

    #[test]
    fn test_zero_slots_rejected_without_drawing() {
        let mut g = rng(11, 19, 3);
        assert_eq!(sample(&mut g, 0), Err(SamplerError::InvalidSlotCount(0)));
        assert_eq!(g.bits_drawn(), 0);
    }

    #[test]
    fn test_single_slot_draws_nothing() {
        let mut g = rng(11, 19, 3);
        let spin = sample(&mut g, 1).unwrap();

        assert_eq!(spin.winning_index, 0);
        assert!(spin.steps.is_empty());
        assert_eq!(g.bits_drawn(), 0);
    }

    #[test]
    fn test_display_steps_carry_bit_twice() {
        let mut g = rng(11, 19, 3);
        let spin = sample(&mut g, 8).unwrap();

        let expected: Vec<StepRecord> = [1u64, 0, 0]
            .iter()
            .enumerate()
            .map(|(i, &b)| StepRecord::new(i + 1, b, b))
            .collect();
        assert_eq!(spin.steps, expected);
    }

    #[test]
    fn test_rejection_strategy_stuck_stream() {
        // seed 1 → state 1 forever → every bit is 1 → r = 3 for 3 slots
        let mut g = rng(11, 19, 1);
        let err = sample_with(&mut g, 3, SamplingStrategy::Rejection).unwrap_err();
        assert_eq!(
            err,
            SamplerError::DegenerateStream {
                slot_count: 3,
                attempts: MAX_REJECTIONS + 1
            }
        );
    }

    #[test]
    fn test_modulo_strategy_survives_stuck_stream() {
        let mut g = rng(11, 19, 1);
        let spin = sample(&mut g, 3).unwrap();
        assert_eq!(spin.winning_index, 0); // 3 mod 3
    }

    #[test]
    fn test_winning_number_wire_name() {
        let spin = SpinOutcome {
            winning_index: 4,
            steps: vec![],
        };
        let json = serde_json::to_value(&spin).unwrap();
        assert_eq!(json, serde_json::json!({"winningNumber": 4, "steps": []}));
    }
}
