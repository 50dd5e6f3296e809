//! Driver error taxonomy.
//!
//! Every failure the driver can report falls into one of four categories:
//! 1. **Local command errors:** Malformed, unrecognized, or referencing an
//!    unknown register. Nothing is transmitted; the session continues.
//! 2. **Precondition violations:** Streaming or reconstruction attempted
//!    before an image is loaded or a configuration is set.
//! 3. **Protocol desync:** A response line that is not the expected fixed-width
//!    binary format. Surfaced to the caller; the driver never resynchronizes
//!    on its own.
//! 4. **Transport failure:** An I/O error on the connection. Fatal; the session
//!    must be re-established externally.

use std::fmt;
use std::io;

/// Errors reported by the driver.
///
/// Local errors (`MalformedCommand`, `UnrecognizedCommand`, `UnknownRegister`,
/// `NoImageLoaded`, `NotConfigured`) are detected before anything reaches the
/// wire; the driver never sends a half-built instruction word.
#[derive(Debug)]
pub enum DriverError {
    /// Wrong argument count or argument type for a known command.
    ///
    /// The associated value is the expected usage line.
    MalformedCommand(String),

    /// The command verb is not part of the command surface.
    ///
    /// The associated value is the offending verb.
    UnrecognizedCommand(String),

    /// A `READ_REG` token that is neither a known symbolic name nor a
    /// registered raw address.
    ///
    /// The associated value is the offending token.
    UnknownRegister(String),

    /// `WRITE_PIXELS` issued before a source image was loaded.
    NoImageLoaded,

    /// `READ_IMAGE` issued before `IMAGE_CONFIG` established the geometry.
    NotConfigured,

    /// A response line that is not exactly 32 binary characters.
    ///
    /// The associated value is the offending line. Recoverable only if the
    /// caller chooses to issue a fresh request.
    ProtocolDesync(String),

    /// I/O failure on the connection. Fatal; no retry is attempted.
    Transport(io::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::MalformedCommand(usage) => {
                write!(f, "malformed command, usage: {usage}")
            }
            DriverError::UnrecognizedCommand(verb) => {
                write!(f, "unrecognized command: {verb}")
            }
            DriverError::UnknownRegister(token) => {
                write!(f, "unknown register: {token}")
            }
            DriverError::NoImageLoaded => write!(f, "no image loaded"),
            DriverError::NotConfigured => {
                write!(f, "session not configured (run IMAGE_CONFIG first)")
            }
            DriverError::ProtocolDesync(line) => {
                write!(f, "protocol desync: expected 32 binary digits, got {line:?}")
            }
            DriverError::Transport(err) => write!(f, "transport failure: {err}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DriverError {
    fn from(err: io::Error) -> Self {
        DriverError::Transport(err)
    }
}
