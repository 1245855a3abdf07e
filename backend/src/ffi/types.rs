//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust result types and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::cipher::{Decryption, Encryption};
use crate::models::{BbsParams, StepRecord};
use crate::sampler::SpinOutcome;
use crate::service::BbsError;
use crate::shuffle::DeckShuffle;

/// Map a crate error onto `ValueError`
pub fn to_py_err(error: BbsError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

/// Parse the three decimal-string parameters
pub fn parse_params(p: &str, q: &str, seed: &str) -> PyResult<BbsParams> {
    BbsParams::parse(p, q, seed).map_err(to_py_err)
}

/// Convert a trace to a list of `{"n", "xn", "bit"}` dicts
pub fn steps_to_py<'py>(py: Python<'py>, steps: &[StepRecord]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for step in steps {
        let dict = PyDict::new(py);
        dict.set_item("n", step.index)?;
        dict.set_item("xn", &step.raw_draw)?;
        dict.set_item("bit", step.marker)?;
        list.append(dict)?;
    }
    Ok(list)
}

pub fn encryption_to_py(py: Python<'_>, result: &Encryption) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("ciphertextHex", &result.ciphertext_hex)?;
    dict.set_item("steps", steps_to_py(py, &result.steps)?)?;
    Ok(dict.unbind())
}

pub fn decryption_to_py(py: Python<'_>, result: &Decryption) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("plaintext", &result.plaintext)?;
    dict.set_item("steps", steps_to_py(py, &result.steps)?)?;
    Ok(dict.unbind())
}

pub fn spin_to_py(py: Python<'_>, result: &SpinOutcome) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("winningNumber", result.winning_index)?;
    dict.set_item("steps", steps_to_py(py, &result.steps)?)?;
    Ok(dict.unbind())
}

pub fn deck_to_py(py: Python<'_>, result: &DeckShuffle) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("success", result.success)?;
    dict.set_item("shuffledDeck", &result.shuffled_deck)?;
    dict.set_item("cardCount", result.card_count)?;
    dict.set_item("steps", steps_to_py(py, &result.steps)?)?;
    dict.set_item("message", &result.message)?;
    Ok(dict.unbind())
}
