//! Textual command parsing.
//!
//! The command surface is a handful of uppercase verbs with positional
//! arguments. Parsing is strict: a wrong argument count or an argument that
//! fails its typed parse is a local [`DriverError::MalformedCommand`] and
//! nothing is transmitted. Unknown verbs fail with
//! [`DriverError::UnrecognizedCommand`].

use crate::common::error::DriverError;
use crate::config::{Mode, SessionConfig};
use crate::isa::regs;

/// Usage line for `IMAGE_CONFIG`.
pub const IMAGE_CONFIG_USAGE: &str =
    "IMAGE_CONFIG <width> <height> <scale> <mode> <debug> <simd_lanes>";

/// Usage line for `READ_REG`.
pub const READ_REG_USAGE: &str = "READ_REG <reg_name/reg_address>";

/// Usage line for `WRITE_PIXELS`.
pub const WRITE_PIXELS_USAGE: &str = "WRITE_PIXELS";

/// A parsed test command.
///
/// `Start` and `Step` carry no payload and encode identically; the device
/// distinguishes them by its current state, not by the bit pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Begin processing the streamed image.
    Start,
    /// Advance one processing step (debug mode).
    Step,
    /// Push image geometry, downscale factor, and mode to the device.
    ImageConfig(SessionConfig),
    /// Stream the loaded image as pixel-quad words.
    WritePixels,
    /// Read one device register; the resolved 8-bit address is carried here.
    ReadReg(u8),
    /// Trigger the downscaled-image readback protocol.
    ReadImage,
}

impl Command {
    /// Parses one line of command text.
    ///
    /// The verb is matched case-insensitively; arguments keep their case
    /// (register names are uppercase by convention anyway).
    pub fn parse(line: &str) -> Result<Self, DriverError> {
        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| DriverError::UnrecognizedCommand(String::new()))?
            .to_ascii_uppercase();
        let args: Vec<&str> = parts.collect();

        match verb.as_str() {
            "START" => expect_no_args(&args, "START").map(|()| Command::Start),
            "STEP" => expect_no_args(&args, "STEP").map(|()| Command::Step),
            "IMAGE_CONFIG" => parse_image_config(&args).map(Command::ImageConfig),
            "WRITE_PIXELS" => {
                expect_no_args(&args, WRITE_PIXELS_USAGE).map(|()| Command::WritePixels)
            }
            "READ_REG" => {
                if args.len() != 1 {
                    return Err(DriverError::MalformedCommand(READ_REG_USAGE.to_string()));
                }
                regs::resolve(args[0]).map(Command::ReadReg)
            }
            "READ_IMAGE" => expect_no_args(&args, "READ_IMAGE").map(|()| Command::ReadImage),
            other => Err(DriverError::UnrecognizedCommand(other.to_string())),
        }
    }
}

fn expect_no_args(args: &[&str], usage: &str) -> Result<(), DriverError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(DriverError::MalformedCommand(usage.to_string()))
    }
}

/// Parses the six positional `IMAGE_CONFIG` arguments and validates the
/// resulting configuration against the bit-field invariants.
fn parse_image_config(args: &[&str]) -> Result<SessionConfig, DriverError> {
    if args.len() != 6 {
        return Err(DriverError::MalformedCommand(IMAGE_CONFIG_USAGE.to_string()));
    }
    let malformed = || DriverError::MalformedCommand(IMAGE_CONFIG_USAGE.to_string());

    let width: u16 = args[0].parse().map_err(|_| malformed())?;
    let height: u16 = args[1].parse().map_err(|_| malformed())?;
    let scale: f32 = args[2].parse().map_err(|_| malformed())?;
    let mode = match args[3] {
        "0" => Mode::Sequential,
        "1" => Mode::Simd,
        _ => return Err(malformed()),
    };
    let debug = match args[4] {
        "0" => false,
        "1" => true,
        _ => return Err(malformed()),
    };
    let simd_lanes: u8 = args[5].parse().map_err(|_| malformed())?;

    let config = SessionConfig {
        width,
        height,
        scale,
        mode,
        debug,
        simd_lanes,
    };
    config.validate()?;
    Ok(config)
}
