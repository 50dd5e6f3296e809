//! Instruction bit layouts and encoding.
//!
//! Every instruction is exactly 32 bits, partitioned per command kind.
//! Bit 31 is the most significant and is sent first on the wire.
//!
//! | Command        | Layout (MSB to LSB)                                           |
//! |----------------|---------------------------------------------------------------|
//! | START / STEP   | bit31=1, bits[30:0]=0                                         |
//! | IMAGE_CONFIG   | bit31=1, bit30=mode, bit29=debug, [28:20]=width,              |
//! |                | [19:11]=height, [10:8]=simd lanes, [7:0]=trunc(scale*100)     |
//! | READ_REG       | [31:30]=01, [29:8]=0, [7:0]=register address                  |
//! | READ_IMAGE     | [31:28]=0001, [27:0]=0                                        |
//!
//! `WRITE_PIXELS` has no instruction word of its own; its payload words are
//! produced by the pixel stream writer in the session module.

use crate::common::word::InstructionWord;
use crate::config::{Mode, SessionConfig};
use crate::isa::command::Command;

/// Bit position of the run/config flag (set for START, STEP, IMAGE_CONFIG).
pub const RUN_BIT: u32 = 31;

/// Bit position of the processing-mode flag (0 sequential, 1 SIMD).
pub const MODE_BIT: u32 = 30;

/// Bit position of the debug flag.
pub const DEBUG_BIT: u32 = 29;

/// Bit shift of the 9-bit width field (bits [28:20]).
pub const WIDTH_SHIFT: u32 = 20;

/// Bit shift of the 9-bit height field (bits [19:11]).
pub const HEIGHT_SHIFT: u32 = 11;

/// Bit mask for the width and height fields (9 bits each).
pub const DIMENSION_MASK: u32 = 0x1FF;

/// Bit shift of the 3-bit SIMD lane field (bits [10:8]).
pub const SIMD_SHIFT: u32 = 8;

/// Bit mask for the SIMD lane field.
pub const SIMD_MASK: u32 = 0x7;

/// Bit mask for the 8-bit scale field (bits [7:0]).
pub const SCALE_MASK: u32 = 0xFF;

/// Fixed word for START and STEP: bit 31 set, everything else zero.
pub const RUN_WORD: u32 = 1 << RUN_BIT;

/// Opcode prefix of READ_REG in bits [31:30].
pub const READ_REG_OPCODE: u32 = 0b01 << 30;

/// Bit mask for the register address field of READ_REG.
pub const REG_ADDR_MASK: u32 = 0xFF;

/// Fixed word for READ_IMAGE: `0001` in bits [31:28], zeros elsewhere.
pub const READ_IMAGE_WORD: u32 = 0b0001 << 28;

/// Fixed probe word asking the device whether streamed data was consumed:
/// bit 31 clear, bits [30:0] all set.
pub const WRITE_ACK_WORD: u32 = !RUN_WORD;

/// Encodes a command into its 32-bit instruction word.
///
/// Returns `None` for [`Command::WritePixels`], which is not independently
/// encoded; the session streams its payload words instead. Encoding a given
/// command is deterministic, so the same input always yields an identical word.
pub fn encode(command: &Command) -> Option<InstructionWord> {
    let word = match command {
        Command::Start | Command::Step => RUN_WORD,
        Command::ImageConfig(config) => config_word(config).raw(),
        Command::ReadReg(addr) => READ_REG_OPCODE | u32::from(*addr),
        Command::ReadImage => READ_IMAGE_WORD,
        Command::WritePixels => return None,
    };
    Some(InstructionWord(word))
}

/// Packs a validated configuration into the IMAGE_CONFIG layout.
pub fn config_word(config: &SessionConfig) -> InstructionWord {
    InstructionWord(
        (1 << RUN_BIT)
            | (config.mode.bit() << MODE_BIT)
            | (u32::from(config.debug) << DEBUG_BIT)
            | ((u32::from(config.width) & DIMENSION_MASK) << WIDTH_SHIFT)
            | ((u32::from(config.height) & DIMENSION_MASK) << HEIGHT_SHIFT)
            | ((u32::from(config.simd_lanes) & SIMD_MASK) << SIMD_SHIFT)
            | (u32::from(config.scale_centiunits()) & SCALE_MASK),
    )
}

/// Fields re-extracted from an IMAGE_CONFIG word at their documented offsets.
///
/// Used for tracing and for bit-exactness checks; `scale_centiunits` is the
/// on-wire truncated value, so the fractional factor is `scale_centiunits / 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFields {
    /// Processing mode (bit 30).
    pub mode: Mode,
    /// Debug flag (bit 29).
    pub debug: bool,
    /// Width field, bits [28:20].
    pub width: u16,
    /// Height field, bits [19:11].
    pub height: u16,
    /// SIMD lane field, bits [10:8].
    pub simd_lanes: u8,
    /// Scale field, bits [7:0].
    pub scale_centiunits: u8,
}

/// Re-extracts the IMAGE_CONFIG fields from an instruction word.
pub fn unpack_config(word: InstructionWord) -> ConfigFields {
    let raw = word.raw();
    ConfigFields {
        mode: if raw >> MODE_BIT & 1 == 1 {
            Mode::Simd
        } else {
            Mode::Sequential
        },
        debug: raw >> DEBUG_BIT & 1 == 1,
        width: (raw >> WIDTH_SHIFT & DIMENSION_MASK) as u16,
        height: (raw >> HEIGHT_SHIFT & DIMENSION_MASK) as u16,
        simd_lanes: (raw >> SIMD_SHIFT & SIMD_MASK) as u8,
        scale_centiunits: (raw & SCALE_MASK) as u8,
    }
}
