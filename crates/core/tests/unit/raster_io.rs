//! Raster File I/O.
//!
//! Buffers persisted with `save_gray` must come back bit-identical through
//! `load_gray`, and the optional grayscale copy must mirror the load result.

use downlink_core::raster::{self, PixelBuffer, RasterError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let data = (0..width * height).map(|i| (i % 256) as u8).collect();
    PixelBuffer {
        data,
        width,
        height,
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.png");
    let buffer = gradient(8, 4);

    raster::save_gray(&buffer, &path).unwrap();
    let reloaded = raster::load_gray(&path, None).unwrap();

    assert_eq!(reloaded, buffer);
}

#[test]
fn gray_copy_matches_loaded_buffer() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.png");
    let copy = dir.path().join("gray.png");
    raster::save_gray(&gradient(6, 3), &source).unwrap();

    let loaded = raster::load_gray(&source, Some(&copy)).unwrap();
    let from_copy = raster::load_gray(&copy, None).unwrap();

    assert_eq!(from_copy, loaded);
}

#[test]
fn geometry_mismatch_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.png");
    let buffer = PixelBuffer {
        data: vec![0; 5],
        width: 4,
        height: 2,
    };

    match raster::save_gray(&buffer, &path) {
        Err(RasterError::Geometry {
            samples,
            width,
            height,
        }) => {
            assert_eq!((samples, width, height), (5, 4, 2));
        }
        other => panic!("expected a geometry error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_codec_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.png");

    assert!(matches!(
        raster::load_gray(&path, None),
        Err(RasterError::Codec(_))
    ));
}
