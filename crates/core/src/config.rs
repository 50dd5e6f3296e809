//! Session configuration for the downscaler device.
//!
//! This module defines the configuration pushed to the device via the
//! `IMAGE_CONFIG` instruction. It provides:
//! 1. **Defaults:** Baseline peer address and downscale factor.
//! 2. **`SessionConfig`:** Image geometry, downscale factor, processing mode,
//!    debug flag, and SIMD lane count.
//! 3. **Validation:** Range checks mirroring the instruction bit-field widths.
//!
//! Configuration arrives either as the six positional `IMAGE_CONFIG` arguments
//! or deserialized from JSON (e.g. a `--config` file in the CLI).

use serde::Deserialize;

use crate::common::error::DriverError;

/// Default configuration constants for the driver.
pub mod defaults {
    /// Default device host.
    pub const HOST: &str = "127.0.0.1";

    /// Default device TCP port.
    pub const PORT: u16 = 2540;

    /// Default downscale factor applied to both dimensions.
    pub const SCALE: f32 = 0.5;

    /// Widest image dimension the 9-bit width/height fields can carry.
    pub const MAX_DIMENSION: u16 = 511;

    /// Largest SIMD lane count the 3-bit lane field can carry.
    pub const MAX_SIMD_LANES: u8 = 7;

    /// Inclusive bounds of the fractional downscale factor.
    pub const SCALE_RANGE: (f32, f32) = (0.5, 1.0);
}

/// Processing mode selected by bit 30 of the `IMAGE_CONFIG` word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Mode {
    /// One pixel at a time; the SIMD lane field is unused and must be zero.
    #[default]
    #[serde(alias = "sequential")]
    Sequential,
    /// Lane-parallel processing; the lane count travels in bits [10:8].
    #[serde(alias = "SIMD", alias = "simd")]
    Simd,
}

impl Mode {
    /// Returns the single configuration bit for this mode.
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            Mode::Sequential => 0,
            Mode::Simd => 1,
        }
    }
}

/// Session configuration mirroring the `IMAGE_CONFIG` bit layout.
///
/// Mutated only by an explicit configuration command; must be set before
/// image streaming or reconstruction is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// Source image width in pixels. Must fit in 9 bits.
    pub width: u16,
    /// Source image height in pixels. Must fit in 9 bits.
    pub height: u16,
    /// Fractional downscale factor in `[0.5, 1.0]`, carried on the wire as
    /// `trunc(scale * 100)` in 8 bits.
    pub scale: f32,
    /// Processing mode (bit 30).
    #[serde(default)]
    pub mode: Mode,
    /// Debug flag (bit 29).
    #[serde(default)]
    pub debug: bool,
    /// SIMD lane count. Must fit in 3 bits; zero in sequential mode.
    #[serde(default)]
    pub simd_lanes: u8,
}

impl SessionConfig {
    /// Checks every bit-field invariant of the `IMAGE_CONFIG` layout.
    ///
    /// Violations are reported as [`DriverError::MalformedCommand`] so a bad
    /// configuration is rejected locally and nothing reaches the wire.
    pub fn validate(&self) -> Result<(), DriverError> {
        let (lo, hi) = defaults::SCALE_RANGE;
        if self.width > defaults::MAX_DIMENSION || self.height > defaults::MAX_DIMENSION {
            return Err(DriverError::MalformedCommand(format!(
                "width and height must be 0..={}",
                defaults::MAX_DIMENSION
            )));
        }
        if !(lo..=hi).contains(&self.scale) {
            return Err(DriverError::MalformedCommand(format!(
                "scale must be in [{lo}, {hi}]"
            )));
        }
        if self.simd_lanes > defaults::MAX_SIMD_LANES {
            return Err(DriverError::MalformedCommand(format!(
                "simd_lanes must be 0..={}",
                defaults::MAX_SIMD_LANES
            )));
        }
        if self.mode == Mode::Sequential && self.simd_lanes != 0 {
            return Err(DriverError::MalformedCommand(
                "simd_lanes must be 0 in sequential mode".to_string(),
            ));
        }
        Ok(())
    }

    /// Target dimensions after downscaling: `floor(dim * scale)` per axis.
    pub fn output_dimensions(&self) -> (u32, u32) {
        let out_w = (f32::from(self.width) * self.scale) as u32;
        let out_h = (f32::from(self.height) * self.scale) as u32;
        (out_w, out_h)
    }

    /// Number of pixels the device will emit for this configuration.
    pub fn expected_pixels(&self) -> usize {
        let (out_w, out_h) = self.output_dimensions();
        out_w as usize * out_h as usize
    }

    /// The downscale factor as it travels on the wire.
    ///
    /// A truncating cast, not rounding: the device-side decoder expects the
    /// truncated value, so `0.57` may arrive as `56`.
    #[inline]
    pub fn scale_centiunits(&self) -> u8 {
        (self.scale * 100.0) as u8
    }
}
