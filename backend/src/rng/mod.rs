//! Deterministic random bit generation
//!
//! Uses the Blum-Blum-Shub construction: repeated modular squaring of a
//! quadratic residue modulo `p * q`, emitting the parity of each new state.
//! CRITICAL: Every consumer in this crate draws its bits through this module.

mod bbs;

pub use bbs::{bits_needed, BbsGenerator, GeneratorError};
