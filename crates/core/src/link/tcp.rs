//! Blocking TCP line transport.
//!
//! A single persistent stream connection carrying newline-terminated ASCII.
//! Reads go through a buffered reader so each `request` consumes exactly one
//! line; writes go straight to the socket and are flushed per request.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use tracing::{debug, trace};

use crate::common::error::DriverError;
use crate::link::Transport;

/// One persistent TCP connection to the device.
#[derive(Debug)]
pub struct TcpLink {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TcpLink {
    /// Connects to the device at `host:port`.
    ///
    /// The connection is established once; there is no automatic reconnect.
    pub fn connect(host: &str, port: u16) -> Result<Self, DriverError> {
        let stream = TcpStream::connect((host, port))?;
        let reader = BufReader::new(stream.try_clone()?);
        debug!(host, port, "connected to device");
        Ok(Self {
            reader,
            writer: stream,
        })
    }
}

impl Transport for TcpLink {
    fn request(&mut self, line: &str) -> Result<String, DriverError> {
        trace!(line, "tx");
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        let mut response = String::new();
        let n = self.reader.read_line(&mut response)?;
        if n == 0 {
            return Err(DriverError::Transport(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "device closed the connection",
            )));
        }
        let response = response.trim_end_matches(['\r', '\n']).to_string();
        trace!(line = %response, "rx");
        Ok(response)
    }
}
