//! Device register directory.
//!
//! Static domain data: the mapping from symbolic register names to their 8-bit
//! addresses on the device. The table is fixed at build time; there is no
//! mutable global state. Resolution accepts either a symbolic name or a raw
//! 8-bit binary address, but raw addresses are only accepted when they belong
//! to the known set. Arbitrary addresses are rejected, not silently encoded.

use crate::common::error::DriverError;

/// Device status register.
pub const REG_STATUS: u8 = 0b0000_0000;
/// Configured image width.
pub const REG_IMG_WIDTH: u8 = 0b0000_0001;
/// Configured image height.
pub const REG_IMG_HEIGHT: u8 = 0b0000_0010;
/// Configured downscale factor (centiunits).
pub const REG_SCALE: u8 = 0b0000_0011;
/// Configured processing mode.
pub const REG_MODE: u8 = 0b0000_0100;
/// Elapsed device cycles.
pub const PERF_CYCLES: u8 = 0b0001_0000;
/// Floating-point operations performed.
pub const PERF_FLOPS: u8 = 0b0001_0001;
/// Memory read count.
pub const PERF_MEM_READ: u8 = 0b0001_0010;
/// Memory write count.
pub const PERF_MEM_WRITE: u8 = 0b0001_0011;
/// Current FSM state of the device pipeline.
pub const DBG_FSM_STATE: u8 = 0b0010_0000;
/// X coordinate currently being processed.
pub const DBG_CURR_X: u8 = 0b0010_0001;
/// Y coordinate currently being processed.
pub const DBG_CURR_Y: u8 = 0b0010_0010;
/// Memory address of the current access.
pub const DBG_MEM_ADDR: u8 = 0b0010_0011;
/// Interpolated output pixel, lane 0.
pub const DBG_PIXEL_OUT_0: u8 = 0b0011_0000;
/// Interpolated output pixel, lane 1.
pub const DBG_PIXEL_OUT_1: u8 = 0b0011_0001;
/// Interpolated output pixel, lane 2.
pub const DBG_PIXEL_OUT_2: u8 = 0b0011_0010;
/// Interpolated output pixel, lane 3.
pub const DBG_PIXEL_OUT_3: u8 = 0b0011_0011;
/// Neighbor fetch state of the bilinear kernel.
pub const DBG_NEIGHBORS: u8 = 0b0011_0100;

/// The full register directory: every addressable register on the device.
pub const DIRECTORY: &[(&str, u8)] = &[
    ("REG_STATUS", REG_STATUS),
    ("REG_IMG_WIDTH", REG_IMG_WIDTH),
    ("REG_IMG_HEIGHT", REG_IMG_HEIGHT),
    ("REG_SCALE", REG_SCALE),
    ("REG_MODE", REG_MODE),
    ("PERF_CYCLES", PERF_CYCLES),
    ("PERF_FLOPS", PERF_FLOPS),
    ("PERF_MEM_READ", PERF_MEM_READ),
    ("PERF_MEM_WRITE", PERF_MEM_WRITE),
    ("DBG_FSM_STATE", DBG_FSM_STATE),
    ("DBG_CURR_X", DBG_CURR_X),
    ("DBG_CURR_Y", DBG_CURR_Y),
    ("DBG_MEM_ADDR", DBG_MEM_ADDR),
    ("DBG_PIXEL_OUT_0", DBG_PIXEL_OUT_0),
    ("DBG_PIXEL_OUT_1", DBG_PIXEL_OUT_1),
    ("DBG_PIXEL_OUT_2", DBG_PIXEL_OUT_2),
    ("DBG_PIXEL_OUT_3", DBG_PIXEL_OUT_3),
    ("DBG_NEIGHBORS", DBG_NEIGHBORS),
];

/// Resolves a `READ_REG` token to its 8-bit address.
///
/// Two typed parses, attempted in order:
/// 1. An exact symbolic name from [`DIRECTORY`].
/// 2. A well-formed 8-bit binary string whose value is a registered address.
///
/// Anything else fails with [`DriverError::UnknownRegister`].
pub fn resolve(token: &str) -> Result<u8, DriverError> {
    if let Some(&(_, addr)) = DIRECTORY.iter().find(|(name, _)| *name == token) {
        return Ok(addr);
    }
    if let Some(addr) = parse_raw_address(token) {
        if DIRECTORY.iter().any(|&(_, known)| known == addr) {
            return Ok(addr);
        }
    }
    Err(DriverError::UnknownRegister(token.to_string()))
}

/// Parses a token as a raw 8-bit binary address, if well-formed.
fn parse_raw_address(token: &str) -> Option<u8> {
    if token.len() != 8 || !token.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u8::from_str_radix(token, 2).ok()
}
