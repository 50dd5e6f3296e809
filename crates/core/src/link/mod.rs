//! Transport layer: one line out, one line in.
//!
//! This module defines the `Transport` trait implemented by every channel to
//! the device, and the TCP implementation used in production:
//! 1. **Contract:** Exactly one line is written per request, then exactly one
//!    line is read back before the next request is issued. No pipelining, no
//!    multiplexing, no timeouts; a stalled peer blocks the caller.
//! 2. **Lifecycle:** The connection is established once at session start and
//!    never reconnected; any I/O failure is fatal to the session.

/// Blocking TCP line transport.
pub mod tcp;

pub use tcp::TcpLink;

use crate::common::error::DriverError;

/// A blocking, line-delimited request/response channel to the device.
///
/// Implementors append the line terminator themselves; callers pass the bare
/// payload (an instruction word's 32 binary digits, or a textual command).
pub trait Transport {
    /// Sends one line and blocks until the peer's single-line response arrives.
    ///
    /// The returned line has its terminator stripped. An I/O failure maps to
    /// [`DriverError::Transport`] and the session must be re-established
    /// externally.
    fn request(&mut self, line: &str) -> Result<String, DriverError>;
}
