//! Session Configuration Validation.
//!
//! The configuration mirrors the IMAGE_CONFIG bit fields, so validation
//! enforces the 9-bit dimensions, the [0.5, 1.0] scale window, and the 3-bit
//! SIMD lane count. Output geometry uses flooring, matching the device.

use downlink_core::DriverError;
use downlink_core::config::{Mode, SessionConfig};
use pretty_assertions::assert_eq;

fn base() -> SessionConfig {
    SessionConfig {
        width: 100,
        height: 80,
        scale: 0.5,
        mode: Mode::Sequential,
        debug: false,
        simd_lanes: 0,
    }
}

#[test]
fn valid_configuration_passes() {
    assert!(base().validate().is_ok());
    let simd = SessionConfig {
        mode: Mode::Simd,
        simd_lanes: 7,
        ..base()
    };
    assert!(simd.validate().is_ok());
}

#[test]
fn oversized_dimensions_fail() {
    let wide = SessionConfig { width: 512, ..base() };
    let tall = SessionConfig { height: 512, ..base() };
    assert!(matches!(
        wide.validate(),
        Err(DriverError::MalformedCommand(_))
    ));
    assert!(matches!(
        tall.validate(),
        Err(DriverError::MalformedCommand(_))
    ));
}

#[test]
fn scale_outside_window_fails() {
    for scale in [0.49, 1.01, 0.0, -0.5] {
        let cfg = SessionConfig { scale, ..base() };
        assert!(matches!(
            cfg.validate(),
            Err(DriverError::MalformedCommand(_))
        ));
    }
}

#[test]
fn simd_lanes_must_fit_three_bits() {
    let cfg = SessionConfig {
        mode: Mode::Simd,
        simd_lanes: 8,
        ..base()
    };
    assert!(matches!(
        cfg.validate(),
        Err(DriverError::MalformedCommand(_))
    ));
}

#[test]
fn sequential_mode_requires_zero_lanes() {
    let cfg = SessionConfig { simd_lanes: 2, ..base() };
    assert!(matches!(
        cfg.validate(),
        Err(DriverError::MalformedCommand(_))
    ));
}

#[test]
fn output_dimensions_floor() {
    let cfg = SessionConfig {
        width: 4,
        height: 2,
        ..base()
    };
    assert_eq!(cfg.output_dimensions(), (2, 1));
    assert_eq!(cfg.expected_pixels(), 2);

    let odd = SessionConfig {
        width: 5,
        height: 3,
        ..base()
    };
    // floor(2.5) = 2, floor(1.5) = 1
    assert_eq!(odd.output_dimensions(), (2, 1));
}

#[test]
fn zero_geometry_expects_zero_pixels() {
    let cfg = SessionConfig {
        width: 0,
        height: 0,
        ..base()
    };
    assert_eq!(cfg.expected_pixels(), 0);
}

#[test]
fn scale_centiunits_truncates() {
    let cfg = SessionConfig { scale: 0.999, ..base() };
    assert_eq!(cfg.scale_centiunits(), 99);
    let exact = SessionConfig { scale: 0.75, ..base() };
    assert_eq!(exact.scale_centiunits(), 75);
}

#[test]
fn deserializes_from_json() {
    let cfg: SessionConfig = serde_json::from_str(
        r#"{
            "width": 320,
            "height": 240,
            "scale": 0.75,
            "mode": "Simd",
            "debug": true,
            "simd_lanes": 4
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.mode, Mode::Simd);
    assert_eq!(cfg.width, 320);
    assert!(cfg.debug);
}

#[test]
fn deserialization_defaults_optional_fields() {
    let cfg: SessionConfig =
        serde_json::from_str(r#"{"width": 10, "height": 10, "scale": 0.5}"#).unwrap();
    assert_eq!(cfg.mode, Mode::Sequential);
    assert!(!cfg.debug);
    assert_eq!(cfg.simd_lanes, 0);
}
