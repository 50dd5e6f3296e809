//! Driver session: command dispatch, pixel streaming, image reconstruction.
//!
//! A `Session` owns the transport, the current configuration, and the loaded
//! source image for its whole lifetime. It provides:
//! 1. **Dispatch:** One textual command in, one [`Outcome`] out.
//! 2. **Streaming:** The loaded image serialized into ordered pixel-quad words.
//! 3. **Reconstruction:** Repeated `READ_IMAGE` requests accumulated into the
//!    downscaled output raster, with overshoot truncated.
//!
//! Exactly one request is in flight at any time; the session is the only
//! owner of the connection, so no locking discipline is needed.

use tracing::{debug, info};

use crate::common::error::DriverError;
use crate::common::word::{self, InstructionWord, QUAD_SIZE};
use crate::config::SessionConfig;
use crate::isa::{self, Command, encode};
use crate::link::{TcpLink, Transport};
use crate::raster::PixelBuffer;

/// Result of dispatching one command.
#[derive(Debug)]
pub enum Outcome {
    /// The device's single-line response (status token or register value).
    Response(String),
    /// Number of pixel-quad words streamed by `WRITE_PIXELS`.
    Streamed(usize),
    /// Reconstructed downscale result from `READ_IMAGE`.
    Raster(PixelBuffer),
}

/// A driver session over one persistent connection.
#[derive(Debug)]
pub struct Session<T: Transport> {
    link: T,
    config: Option<SessionConfig>,
    image: Option<PixelBuffer>,
}

impl Session<TcpLink> {
    /// Connects to the device and opens a fresh session.
    pub fn connect(host: &str, port: u16) -> Result<Self, DriverError> {
        Ok(Self::new(TcpLink::connect(host, port)?))
    }
}

impl<T: Transport> Session<T> {
    /// Wraps an established transport in a fresh session.
    pub fn new(link: T) -> Self {
        Self {
            link,
            config: None,
            image: None,
        }
    }

    /// Makes `image` the session's source image for subsequent streaming.
    pub fn load_image(&mut self, image: PixelBuffer) {
        info!(
            width = image.width,
            height = image.height,
            "source image loaded"
        );
        self.image = Some(image);
    }

    /// The configuration last pushed to the device, if any.
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// Parses and dispatches one line of command text.
    ///
    /// Local errors (malformed or unrecognized commands, unknown registers,
    /// missing preconditions) transmit nothing and leave the session usable.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, DriverError> {
        match Command::parse(line)? {
            Command::ImageConfig(config) => self.configure(config).map(Outcome::Response),
            Command::WritePixels => self.write_pixels().map(Outcome::Streamed),
            Command::ReadImage => self.read_image().map(Outcome::Raster),
            // Start, Step, ReadReg: plain word-for-line exchanges.
            command => {
                let Some(instruction) = isa::encode(&command) else {
                    return Err(DriverError::UnrecognizedCommand(line.to_string()));
                };
                self.link.request(&instruction.wire()).map(Outcome::Response)
            }
        }
    }

    /// Pushes a validated configuration to the device and records it.
    ///
    /// The configuration becomes the session's geometry for later
    /// reconstruction only after the device has acknowledged the word.
    pub fn configure(&mut self, config: SessionConfig) -> Result<String, DriverError> {
        config.validate()?;
        let word = encode::config_word(&config);
        debug!(fields = ?encode::unpack_config(word), "pushing configuration");
        let response = self.link.request(&word.wire())?;
        self.config = Some(config);
        Ok(response)
    }

    /// Streams the loaded image as ordered `WRITE_PIXELS` words.
    ///
    /// The flattened row-major bytes are chunked into quads; the final short
    /// quad is zero-padded on the right. Ordering determines pixel placement
    /// on the device, so words go out strictly in sequence.
    pub fn write_pixels(&mut self) -> Result<usize, DriverError> {
        let image = self.image.as_ref().ok_or(DriverError::NoImageLoaded)?;
        let mut sent = 0;
        for quad in image.data.chunks(QUAD_SIZE) {
            let bits = format!("{:032b}", word::pack_quad(quad));
            let _response = self.link.request(&format!("WRITE_PIXELS {bits}"))?;
            sent += 1;
        }
        info!(words = sent, "image streamed");
        Ok(sent)
    }

    /// Asks the device whether the streamed data has been consumed.
    ///
    /// Sends the fixed probe word (bit 31 clear, all other bits set) and
    /// returns the device's status line.
    pub fn confirm_write(&mut self) -> Result<String, DriverError> {
        self.link
            .request(&InstructionWord(encode::WRITE_ACK_WORD).wire())
    }

    /// Reconstructs the downscaled image from the device.
    ///
    /// Issues `READ_IMAGE` words until enough pixel quads have arrived to
    /// cover `floor(w*scale) * floor(h*scale)` samples, truncates the
    /// overshoot from the final quad, and reshapes row-major. With an
    /// expected pixel count of zero nothing is sent and an empty raster is
    /// returned.
    pub fn read_image(&mut self) -> Result<PixelBuffer, DriverError> {
        let config = self.config.ok_or(DriverError::NotConfigured)?;
        let (out_w, out_h) = config.output_dimensions();
        let expected = config.expected_pixels();

        let mut samples: Vec<u8> = Vec::with_capacity(expected + QUAD_SIZE);
        let request = InstructionWord(encode::READ_IMAGE_WORD).wire();

        while samples.len() < expected {
            let response = self.link.request(&request)?;
            // Validate before appending so a desync never corrupts the buffer.
            let quad = word::parse_response_word(&response)?;
            samples.extend_from_slice(&word::unpack_quad(quad));
        }
        samples.truncate(expected);

        info!(out_w, out_h, pixels = expected, "image reconstructed");
        Ok(PixelBuffer {
            data: samples,
            width: out_w,
            height: out_h,
        })
    }
}
