//! Instruction words and pixel-quad packing.
//!
//! Everything the device accepts or emits is a 32-bit quantity carried on the
//! wire as 32 ASCII binary digits, most significant bit first. This module
//! provides:
//! 1. **`InstructionWord`:** The value type produced by the encoder and
//!    consumed once by the transport.
//! 2. **Quad packing:** Four 8-bit grayscale samples packed big-endian into
//!    one 32-bit protocol word, in both the streaming and read directions.
//! 3. **Response parsing:** Strict validation of inbound 32-digit lines.

use crate::common::error::DriverError;
use std::fmt;

/// Width of every protocol word in bits.
pub const WORD_BITS: usize = 32;

/// Number of pixel samples packed into one protocol word.
pub const QUAD_SIZE: usize = 4;

/// An exactly-32-bit instruction word.
///
/// A pure value type: produced by the encoder, rendered with [`InstructionWord::wire`]
/// (or `Display`), handed to the transport, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionWord(pub u32);

impl InstructionWord {
    /// Returns the raw 32-bit value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Renders the word as it travels on the wire: 32 binary digits, bit 31 first.
    pub fn wire(self) -> String {
        format!("{:032b}", self.0)
    }
}

impl fmt::Display for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

/// Packs up to four grayscale samples into one 32-bit word.
///
/// The first sample lands in bits [31:24], the second in [23:16], and so on.
/// A short final group is zero-padded on the right: the missing low-order byte
/// positions stay zero, matching the device's expectation for the tail of an
/// image whose pixel count is not a multiple of four.
///
/// # Panics
///
/// Panics if `samples` holds more than four bytes; callers chunk first.
pub fn pack_quad(samples: &[u8]) -> u32 {
    assert!(samples.len() <= QUAD_SIZE, "quad holds at most 4 samples");
    let mut word = 0u32;
    for (i, &byte) in samples.iter().enumerate() {
        word |= u32::from(byte) << (24 - 8 * i);
    }
    word
}

/// Splits a 32-bit response word into its four 8-bit samples.
///
/// Bits [31:24] become the first sample, mirroring [`pack_quad`].
pub fn unpack_quad(word: u32) -> [u8; QUAD_SIZE] {
    [
        (word >> 24) as u8,
        (word >> 16) as u8,
        (word >> 8) as u8,
        word as u8,
    ]
}

/// Parses an inbound response line as a 32-bit protocol word.
///
/// The line must be exactly 32 characters, each `'0'` or `'1'`. Anything else
/// is a [`DriverError::ProtocolDesync`]; the caller's accumulation state is
/// untouched because validation happens before any sample is appended.
pub fn parse_response_word(line: &str) -> Result<u32, DriverError> {
    if line.len() != WORD_BITS || !line.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(DriverError::ProtocolDesync(line.to_string()));
    }
    u32::from_str_radix(line, 2).map_err(|_| DriverError::ProtocolDesync(line.to_string()))
}
