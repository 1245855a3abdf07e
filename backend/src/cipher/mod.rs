//! Byte-stream XOR cipher
//!
//! Each byte is XORed with an 8-bit draw from the generator. Encryption and
//! decryption are the same transform; they only differ in how bytes enter
//! and leave (UTF-8 text → uppercase hex, and hex → byte-per-char text).
//!
//! # Known limitation
//!
//! Decryption promotes each recovered byte directly to a `char`
//! (U+0000..=U+00FF). Text containing non-ASCII characters encrypts to its
//! multi-byte UTF-8 form and therefore does NOT round-trip. Only text made
//! of single-byte characters (ASCII) survives `decrypt(encrypt(t))`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{OperationResult, StepRecord};
use crate::rng::BbsGenerator;

/// Errors on the decryption path
#[derive(Debug, Error, PartialEq)]
pub enum CipherError {
    #[error("Malformed hex input: {0}")]
    MalformedHex(#[from] hex::FromHexError),
}

/// Encryption output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encryption {
    /// Two uppercase hex digits per byte
    pub ciphertext_hex: String,
    pub steps: Vec<StepRecord>,
}

/// Decryption output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decryption {
    pub plaintext: String,
    pub steps: Vec<StepRecord>,
}

impl From<Encryption> for OperationResult {
    fn from(result: Encryption) -> Self {
        OperationResult {
            payload: result.ciphertext_hex,
            steps: result.steps,
        }
    }
}

impl From<Decryption> for OperationResult {
    fn from(result: Decryption) -> Self {
        OperationResult {
            payload: result.plaintext,
            steps: result.steps,
        }
    }
}

/// XOR every byte with the next 8-bit draw
///
/// Step `i + 1` records the raw draw `r` and the low bit of the output byte
/// (not of `r`).
pub fn transform(data: &[u8], generator: &mut BbsGenerator) -> (Vec<u8>, Vec<StepRecord>) {
    let mut output = Vec::with_capacity(data.len());
    let mut steps = Vec::with_capacity(data.len());

    for (i, &byte) in data.iter().enumerate() {
        let draw = generator.next_u64(8);
        // draw < 256 because exactly 8 bits were drawn
        let out = byte ^ (draw & 0xFF) as u8;
        output.push(out);
        steps.push(StepRecord::new(i + 1, draw, u64::from(out & 1)));
    }

    (output, steps)
}

/// Encrypt the UTF-8 bytes of `text`
pub fn encrypt(text: &str, generator: &mut BbsGenerator) -> Encryption {
    let (bytes, steps) = transform(text.as_bytes(), generator);
    Encryption {
        ciphertext_hex: hex::encode_upper(bytes),
        steps,
    }
}

/// Decrypt a hex string produced by [`encrypt`]
///
/// Upper- and lowercase digits are accepted.
///
/// # Errors
/// Returns `CipherError::MalformedHex` for odd length or a non-hex
/// character. The input is validated before any bit is drawn.
pub fn decrypt(ciphertext_hex: &str, generator: &mut BbsGenerator) -> Result<Decryption, CipherError> {
    let bytes = hex::decode(ciphertext_hex)?;
    let (plain, steps) = transform(&bytes, generator);

    Ok(Decryption {
        plaintext: plain.into_iter().map(char::from).collect(),
        steps,
    })
}
