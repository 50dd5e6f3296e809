//! Image Reconstruction.
//!
//! READ_IMAGE fetches whole pixel quads until the configured output size is
//! covered, truncates the overshoot, and reshapes row-major. A malformed
//! response is a desync and must never corrupt the accumulation buffer.

use downlink_core::isa::encode::READ_IMAGE_WORD;
use downlink_core::session::Outcome;
use downlink_core::{DriverError, Session};
use mockall::Sequence;
use pretty_assertions::assert_eq;

use crate::common::mocks::link::{MockLink, ScriptedLink};

/// The READ_IMAGE request as it appears on the wire.
fn read_image_wire() -> String {
    format!("{READ_IMAGE_WORD:032b}")
}

/// Drives IMAGE_CONFIG through the scripted link so the session has geometry.
fn configure(session: &mut Session<ScriptedLink>, width: u16, height: u16, scale: f32) {
    session
        .execute(&format!("IMAGE_CONFIG {width} {height} {scale} 0 0 0"))
        .unwrap();
}

#[test]
fn reconstruction_without_config_is_local_error() {
    let link = ScriptedLink::new(&[]);
    let mut session = Session::new(link.clone());

    assert!(matches!(
        session.read_image(),
        Err(DriverError::NotConfigured)
    ));
    assert!(link.sent().is_empty());
}

#[test]
fn single_quad_overshoot_is_truncated() {
    // 4x2 at scale 0.5: expected = 2x1 = 2 pixels; one quad [7,8,9,10] overshoots.
    let quad = format!("{:032b}", 0x0708_090Au32);
    let link = ScriptedLink::new(&["OK", &quad]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 4, 2, 0.5);

    let result = session.read_image().unwrap();
    assert_eq!(result.width, 2);
    assert_eq!(result.height, 1);
    assert_eq!(result.data, vec![7, 8]);

    // One configuration word, then exactly one READ_IMAGE request.
    let sent = link.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1], read_image_wire());
}

#[test]
fn mocked_transport_reconstruction() {
    let mut link = MockLink::new();
    let mut seq = Sequence::new();
    link.expect_request()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("CONFIG_OK".to_string()));
    link.expect_request()
        .withf(|line| line == format!("{READ_IMAGE_WORD:032b}"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(format!("{:032b}", 0x0708_090Au32)));

    let mut session = Session::new(link);
    session.execute("IMAGE_CONFIG 4 2 0.5 0 0 0").unwrap();

    match session.execute("READ_IMAGE").unwrap() {
        Outcome::Raster(result) => assert_eq!(result.data, vec![7, 8]),
        other => panic!("expected a raster, got {other:?}"),
    }
}

#[test]
fn multiple_quads_accumulate_in_order() {
    // 6x1 at scale 1.0: expected 6, needs two quads, truncates two samples.
    let first = format!("{:032b}", 0x0102_0304u32);
    let second = format!("{:032b}", 0x0506_0708u32);
    let link = ScriptedLink::new(&["OK", &first, &second]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 6, 1, 1.0);

    let result = session.read_image().unwrap();
    assert_eq!(result.data, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!((result.width, result.height), (6, 1));
}

#[test]
fn zero_expected_pixels_sends_no_request() {
    let link = ScriptedLink::new(&["OK"]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 0, 0, 0.5);

    let result = session.read_image().unwrap();
    assert!(result.is_empty());
    // Only the configuration word went out.
    assert_eq!(link.sent().len(), 1);
}

#[test]
fn short_response_is_desync() {
    let bad = "0".repeat(31);
    let link = ScriptedLink::new(&["OK", &bad]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 4, 2, 0.5);

    assert!(matches!(
        session.read_image(),
        Err(DriverError::ProtocolDesync(_))
    ));
}

#[test]
fn long_response_is_desync() {
    let bad = "1".repeat(33);
    let link = ScriptedLink::new(&["OK", &bad]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 4, 2, 0.5);

    assert!(matches!(
        session.read_image(),
        Err(DriverError::ProtocolDesync(_))
    ));
}

#[test]
fn non_binary_response_is_desync() {
    let bad = format!("{}x{}", "0".repeat(16), "0".repeat(15));
    let link = ScriptedLink::new(&["OK", &bad]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 4, 2, 0.5);

    assert!(matches!(
        session.read_image(),
        Err(DriverError::ProtocolDesync(_))
    ));
}

#[test]
fn desync_leaves_session_usable_with_fresh_buffer() {
    // First read desyncs; the retry starts from an empty accumulation buffer
    // and must not carry samples from the failed attempt.
    let bad = "OVERFLOW";
    let good = format!("{:032b}", 0x0708_090Au32);
    let link = ScriptedLink::new(&["OK", bad, &good]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 4, 2, 0.5);

    assert!(matches!(
        session.read_image(),
        Err(DriverError::ProtocolDesync(_))
    ));
    let result = session.read_image().unwrap();
    assert_eq!(result.data, vec![7, 8]);
}

#[test]
fn transport_failure_is_fatal_not_desync() {
    // Script exhausted mid-read models the peer dropping the connection.
    let link = ScriptedLink::new(&["OK"]);
    let mut session = Session::new(link.clone());
    configure(&mut session, 4, 2, 0.5);

    assert!(matches!(
        session.read_image(),
        Err(DriverError::Transport(_))
    ));
}
