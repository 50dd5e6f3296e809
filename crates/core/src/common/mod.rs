//! Common value types and error definitions.
//!
//! This module groups the pieces shared by every layer of the driver:
//! 1. **Errors:** The `DriverError` taxonomy (`error`).
//! 2. **Words:** 32-bit instruction words and pixel-quad packing (`word`).

/// Driver error taxonomy.
pub mod error;
/// Instruction words, pixel-quad packing, and response-line parsing.
pub mod word;

pub use error::DriverError;
pub use word::InstructionWord;
