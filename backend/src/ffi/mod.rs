//! PyO3 bindings
//!
//! Parameters arrive as decimal strings, exactly as a web or script front end
//! sends them; results come back as dicts with the same keys as the JSON DTOs.

pub mod operations;
pub mod types;
