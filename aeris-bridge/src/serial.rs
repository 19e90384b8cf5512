//! Serial port byte source

use std::io;
use std::time::Duration;

use aeris_core::traits::ByteSource;
use serial2::SerialPort;

/// Read timeout per pipeline tick
pub const READ_TIMEOUT: Duration = Duration::from_millis(250);

/// A serial port wired into the pipeline's [`ByteSource`] seam.
pub struct SerialSource {
    port: SerialPort,
}

impl SerialSource {
    /// Open `path` at `baud` with the pipeline's bounded read timeout.
    pub fn open(path: &str, baud: u32) -> io::Result<Self> {
        let mut port = SerialPort::open(path, baud)?;
        port.set_read_timeout(READ_TIMEOUT)?;
        Ok(Self { port })
    }
}

impl ByteSource for SerialSource {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // An empty interval is an idle tick, not a failure
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }
}
