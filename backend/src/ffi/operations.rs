//! Python-callable operations
//!
//! ```python
//! from bbs_demo_core_rs import encrypt, decrypt
//!
//! result = encrypt("A", "11", "19", "3")
//! assert result["ciphertextHex"] == "C3"
//! assert decrypt("C3", "11", "19", "3")["plaintext"] == "A"
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{
    decryption_to_py, deck_to_py, encryption_to_py, parse_params, spin_to_py, to_py_err,
};
use crate::models::params::DEFAULT_ROULETTE_SLOTS;
use crate::sampler::SamplingStrategy;
use crate::service;

/// Encrypt text; returns `{"ciphertextHex", "steps"}`
#[pyfunction]
#[pyo3(name = "encrypt")]
pub fn py_encrypt(py: Python<'_>, text: &str, p: &str, q: &str, seed: &str) -> PyResult<Py<PyDict>> {
    let params = parse_params(p, q, seed)?;
    let result = service::encrypt(text, &params).map_err(to_py_err)?;
    encryption_to_py(py, &result)
}

/// Decrypt hex; returns `{"plaintext", "steps"}`
#[pyfunction]
#[pyo3(name = "decrypt")]
pub fn py_decrypt(
    py: Python<'_>,
    ciphertext_hex: &str,
    p: &str,
    q: &str,
    seed: &str,
) -> PyResult<Py<PyDict>> {
    let params = parse_params(p, q, seed)?;
    let result = service::decrypt(ciphertext_hex, &params).map_err(to_py_err)?;
    decryption_to_py(py, &result)
}

/// Spin a roulette wheel; returns `{"winningNumber", "steps"}`
///
/// `rejection=True` selects the unbiased strategy.
#[pyfunction]
#[pyo3(name = "spin_roulette", signature = (p, q, seed, slots = DEFAULT_ROULETTE_SLOTS, rejection = false))]
pub fn py_spin_roulette(
    py: Python<'_>,
    p: &str,
    q: &str,
    seed: &str,
    slots: usize,
    rejection: bool,
) -> PyResult<Py<PyDict>> {
    let params = parse_params(p, q, seed)?;
    let strategy = if rejection {
        SamplingStrategy::Rejection
    } else {
        SamplingStrategy::Modulo
    };
    let result = service::sample_with(&params, slots, strategy).map_err(to_py_err)?;
    spin_to_py(py, &result)
}

/// Shuffle a 52-card deck; returns the deck DTO
#[pyfunction]
#[pyo3(name = "shuffle_deck")]
pub fn py_shuffle_deck(py: Python<'_>, p: &str, q: &str, seed: &str) -> PyResult<Py<PyDict>> {
    let params = parse_params(p, q, seed)?;
    let result = service::shuffle_deck(&params).map_err(to_py_err)?;
    deck_to_py(py, &result)
}
