//! Client-side driver for an FPGA image-downscaler co-simulation.
//!
//! This crate implements the host half of a hardware-in-the-loop image pipeline:
//! 1. **ISA:** Textual test commands encoded into fixed 32-bit instruction words.
//! 2. **Link:** A blocking, line-delimited request/response channel to the device.
//! 3. **Session:** Pixel streaming to the device and reconstruction of the
//!    downscaled result from 32-bit pixel-quad responses.
//! 4. **Raster:** Grayscale conversion at the edges (file in, file out).
//!
//! The device consumes one ASCII line per request (either 32 binary digits or a
//! short textual payload) and answers with exactly one line. The driver is
//! fully synchronous; there is never more than one request in flight.

/// Common value types (instruction words, pixel quads) and the error taxonomy.
pub mod common;
/// Session configuration (image geometry, downscale factor, processing mode).
pub mod config;
/// Command parsing, instruction encoding, and the device register directory.
pub mod isa;
/// Transport trait and the TCP line-protocol implementation.
pub mod link;
/// Grayscale raster loading and saving (the image-file collaborator).
pub mod raster;
/// Driver session: command dispatch, pixel streaming, image reconstruction.
pub mod session;

/// Error taxonomy shared by every layer of the driver.
pub use crate::common::error::DriverError;
/// Session configuration; build one from an `IMAGE_CONFIG` command or JSON.
pub use crate::config::SessionConfig;
/// Driver session over a transport; construct with `Session::connect` or `Session::new`.
pub use crate::session::Session;
