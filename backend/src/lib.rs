//! BBS Demo Core - Rust Engine
//!
//! Deterministic Blum-Blum-Shub bit generator and its three consumers.
//!
//! # Architecture
//!
//! - **rng**: Blum-Blum-Shub bit generator
//! - **models**: Trace records, parameters, audit events
//! - **cipher**: Byte-stream XOR cipher (encrypt / decrypt)
//! - **sampler**: Bounded-integer sampler (roulette spin)
//! - **shuffle**: Unbiased Fisher-Yates shuffle, 52-card deck
//! - **service**: Collaborator functions, audited facade, checkpoints
//!
//! # Critical Invariants
//!
//! 1. One fresh generator per operation, never shared
//! 2. The generator squares its state BEFORE reading a bit
//! 3. Every result is a pure function of (p, q, seed) and the input
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod cipher;
pub mod models;
pub mod rng;
pub mod sampler;
pub mod service;
pub mod shuffle;

// Re-exports for convenience
pub use cipher::{CipherError, Decryption, Encryption};
pub use models::{
    event::{Event, EventLog, OperationKind},
    params::{BbsParams, RouletteConfig},
    step::{OperationResult, StepRecord},
};
pub use rng::{BbsGenerator, GeneratorError};
pub use sampler::{SamplerError, SamplingStrategy, SpinOutcome};
pub use service::checkpoint::GeneratorSnapshot;
pub use service::{
    decrypt, encrypt, sample, sample_with, shuffle, shuffle_deck, BbsError, DemoService,
};
pub use shuffle::{DeckShuffle, ShuffleError, ShuffleOutcome};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn bbs_demo_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::operations::py_encrypt, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::operations::py_decrypt, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::operations::py_spin_roulette, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::operations::py_shuffle_deck, m)?)?;
    Ok(())
}
