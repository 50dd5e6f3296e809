//! Grayscale raster loading and saving.
//!
//! The driver core treats images as plain byte arrays; this module is the
//! file-format collaborator at the edges. Any format the `image` crate can
//! decode is accepted and converted to 8-bit grayscale on the way in; results
//! are persisted as standard raster files on the way out.

use std::path::Path;

use image::GrayImage;
use tracing::debug;

/// An owned row-major sequence of 8-bit grayscale samples.
///
/// Represents either the source image streamed to the device or a
/// reconstructed downscale result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Row-major samples, `width * height` of them.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Number of samples in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Errors from the image-file collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Decoding or encoding failure in the underlying image library.
    #[error("image codec failure: {0}")]
    Codec(#[from] image::ImageError),

    /// Sample count does not match the stated dimensions.
    #[error("buffer of {samples} samples does not fit {width}x{height}")]
    Geometry {
        /// Samples present in the buffer.
        samples: usize,
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
    },
}

/// Loads an image file and converts it to 8-bit grayscale.
///
/// When `gray_copy` is given, the grayscale conversion is also persisted
/// there, mirroring what the device will see.
pub fn load_gray(path: &Path, gray_copy: Option<&Path>) -> Result<PixelBuffer, RasterError> {
    let gray = image::open(path)?.to_luma8();
    let (width, height) = gray.dimensions();
    debug!(path = %path.display(), width, height, "loaded source image");

    if let Some(copy) = gray_copy {
        gray.save(copy)?;
    }

    Ok(PixelBuffer {
        data: gray.into_raw(),
        width,
        height,
    })
}

/// Persists a pixel buffer as a grayscale raster file.
pub fn save_gray(buffer: &PixelBuffer, path: &Path) -> Result<(), RasterError> {
    let img = GrayImage::from_raw(buffer.width, buffer.height, buffer.data.clone()).ok_or(
        RasterError::Geometry {
            samples: buffer.len(),
            width: buffer.width,
            height: buffer.height,
        },
    )?;
    img.save(path)?;
    debug!(path = %path.display(), "saved raster");
    Ok(())
}
