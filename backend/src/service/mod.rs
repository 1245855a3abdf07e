//! Collaborator facade
//!
//! The free functions here are the boundary contract: plain parameters in,
//! (result, trace) out. Each call builds its own generator from the supplied
//! parameters and drops it on return, so calls are independent and safe to
//! run from any number of threads. Do not pool generators across calls; the
//! BBS state is strictly sequential.
//!
//! [`DemoService`] runs the same operations and additionally records an
//! audit [`EventLog`].

pub mod checkpoint;

use serde::Serialize;
use thiserror::Error;

use crate::cipher::{self, CipherError, Decryption, Encryption};
use crate::models::{BbsParams, Event, EventLog, OperationKind};
use crate::rng::{BbsGenerator, GeneratorError};
use crate::sampler::{self, SamplerError, SamplingStrategy, SpinOutcome};
use crate::shuffle::{self as shuffler, DeckShuffle, ShuffleError, ShuffleOutcome};

/// Crate-level error type
#[derive(Debug, Error, PartialEq)]
pub enum BbsError {
    #[error("Invalid parameter '{name}': {value:?} is not a non-negative decimal integer")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Shuffle error: {0}")]
    Shuffle(#[from] ShuffleError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Encrypt `text` with a fresh generator
pub fn encrypt(text: &str, params: &BbsParams) -> Result<Encryption, BbsError> {
    let mut generator = params.generator()?;
    Ok(cipher::encrypt(text, &mut generator))
}

/// Decrypt hex produced by [`encrypt`] with the same parameters
pub fn decrypt(ciphertext_hex: &str, params: &BbsParams) -> Result<Decryption, BbsError> {
    let mut generator = params.generator()?;
    Ok(cipher::decrypt(ciphertext_hex, &mut generator)?)
}

/// Sample a slot in `[0, slot_count)` (modulo strategy)
pub fn sample(params: &BbsParams, slot_count: usize) -> Result<SpinOutcome, BbsError> {
    sample_with(params, slot_count, SamplingStrategy::Modulo)
}

/// Sample with an explicit strategy
pub fn sample_with(
    params: &BbsParams,
    slot_count: usize,
    strategy: SamplingStrategy,
) -> Result<SpinOutcome, BbsError> {
    let mut generator = params.generator()?;
    Ok(sampler::sample_with(&mut generator, slot_count, strategy)?)
}

/// Uniformly permute `sequence`
pub fn shuffle<T>(params: &BbsParams, sequence: Vec<T>) -> Result<ShuffleOutcome<T>, BbsError> {
    let mut generator = params.generator()?;
    Ok(shuffler::shuffle(&mut generator, sequence)?)
}

/// Shuffle a standard 52-card deck
pub fn shuffle_deck(params: &BbsParams) -> Result<DeckShuffle, BbsError> {
    let mut generator = params.generator()?;
    Ok(shuffler::shuffle_deck(&mut generator)?)
}

/// Auditing front for the four operations
///
/// Holds only the audit log and an operation counter; every call still
/// builds its own generator.
///
/// # Example
/// ```
/// use bbs_demo_core_rs::{BbsParams, DemoService};
///
/// let mut service = DemoService::new();
/// let params = BbsParams::parse("11", "19", "3").unwrap();
///
/// let encrypted = service.encrypt("A", &params).unwrap();
/// assert_eq!(encrypted.ciphertext_hex, "C3");
/// assert_eq!(service.event_log().events_of_type("OperationCompleted").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DemoService {
    events: EventLog,
    operations: u64,
}

impl DemoService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encrypt(&mut self, text: &str, params: &BbsParams) -> Result<Encryption, BbsError> {
        self.run(OperationKind::Encrypt, params, |g| Ok(cipher::encrypt(text, g)), |r| {
            r.steps.len()
        })
    }

    pub fn decrypt(&mut self, ciphertext_hex: &str, params: &BbsParams) -> Result<Decryption, BbsError> {
        self.run(
            OperationKind::Decrypt,
            params,
            |g| Ok(cipher::decrypt(ciphertext_hex, g)?),
            |r| r.steps.len(),
        )
    }

    pub fn spin(
        &mut self,
        params: &BbsParams,
        slot_count: usize,
        strategy: SamplingStrategy,
    ) -> Result<SpinOutcome, BbsError> {
        self.run(
            OperationKind::Spin,
            params,
            |g| Ok(sampler::sample_with(g, slot_count, strategy)?),
            |r| r.steps.len(),
        )
    }

    pub fn shuffle<T>(&mut self, params: &BbsParams, sequence: Vec<T>) -> Result<ShuffleOutcome<T>, BbsError> {
        let outcome = self.run(
            OperationKind::Shuffle,
            params,
            |g| Ok(shuffler::shuffle(g, sequence)?),
            |r| r.steps.len(),
        )?;
        self.log_rejections(outcome.rejected_draws);
        Ok(outcome)
    }

    pub fn shuffle_deck(&mut self, params: &BbsParams) -> Result<DeckShuffle, BbsError> {
        self.run(
            OperationKind::Shuffle,
            params,
            |g| Ok(shuffler::shuffle_deck(g)?),
            |r| r.steps.len(),
        )
    }

    /// Get the audit log
    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    /// Number of operations started so far
    pub fn operation_count(&self) -> u64 {
        self.operations
    }

    /// Serialize the audit log as a JSON array
    pub fn events_json(&self) -> Result<String, BbsError> {
        to_json(self.events.events())
    }

    fn run<R>(
        &mut self,
        kind: OperationKind,
        params: &BbsParams,
        op: impl FnOnce(&mut BbsGenerator) -> Result<R, BbsError>,
        steps_of: impl Fn(&R) -> usize,
    ) -> Result<R, BbsError> {
        self.operations += 1;
        let operation = self.operations;

        let result = params.generator().map_err(BbsError::from).and_then(|mut generator| {
            self.events.log(Event::GeneratorCreated {
                operation,
                kind,
                modulus_bits: generator.modulus().bits(),
            });
            for (name, residue) in params.non_blum_factors() {
                self.events.log(Event::NonBlumParameter {
                    operation,
                    name: name.to_string(),
                    residue,
                });
            }

            let result = op(&mut generator)?;
            self.events.log(Event::OperationCompleted {
                operation,
                kind,
                steps: steps_of(&result),
                bits_drawn: generator.bits_drawn(),
            });
            Ok(result)
        });

        if let Err(e) = &result {
            self.events.log(Event::OperationFailed {
                operation,
                kind,
                reason: e.to_string(),
            });
        }
        result
    }

    fn log_rejections(&mut self, rejected: usize) {
        if rejected > 0 {
            self.events.log(Event::ShuffleRejections {
                operation: self.operations,
                rejected,
            });
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, BbsError> {
    serde_json::to_string(value).map_err(|e| BbsError::Serialization(e.to_string()))
}
