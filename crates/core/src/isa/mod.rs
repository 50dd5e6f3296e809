//! Instruction set of the downscaler device.
//!
//! This module turns textual test commands into 32-bit instruction words:
//! 1. **Commands:** Parsing the textual surface into typed commands (`command`).
//! 2. **Encoding:** Per-command bit layouts and field extraction (`encode`).
//! 3. **Registers:** The symbolic register directory and address resolution (`regs`).

/// Textual command parsing.
pub mod command;
/// Bit layouts, field constants, and instruction encoding.
pub mod encode;
/// Register name directory and address resolution.
pub mod regs;

pub use command::Command;
pub use encode::encode;
