//! # Serial Endpoint Abstraction
//!
//! The receiver state machine only needs three primitives from a serial
//! endpoint: how many bytes are waiting, reading up to a bound, and writing
//! a whole frame. `SerialPort` captures exactly that surface so production
//! code can run against `tokio_serial::SerialStream` while tests run
//! against an in-memory pipe ([`crate::transport::serial_mock::MockSerialPort`]).

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::SerialPort as _;

/// Async serial endpoint, abstracted for dependency injection in tests.
#[async_trait::async_trait]
pub trait SerialPort: Send {
    /// Number of bytes currently buffered and ready to read without
    /// blocking.
    fn in_waiting(&mut self) -> io::Result<usize>;

    /// Reads up to `buf.len()` bytes, returning as soon as at least one
    /// byte is available. May return `Ok(0)` if nothing is currently
    /// buffered; never blocks waiting for more.
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Writes the entire buffer in one operation.
    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Discards any buffered but unread input.
    fn flush_input(&mut self) -> io::Result<()>;
}

#[async_trait::async_trait]
impl SerialPort for tokio_serial::SerialStream {
    fn in_waiting(&mut self) -> io::Result<usize> {
        tokio_serial::SerialPort::bytes_to_read(self).map(|n| n as usize)
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        AsyncReadExt::read(self, buf).await
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        AsyncWriteExt::write_all(self, bytes).await?;
        AsyncWriteExt::flush(self).await
    }

    fn flush_input(&mut self) -> io::Result<()> {
        tokio_serial::SerialPort::clear(self, tokio_serial::ClearBuffer::Input)
    }
}

/// Opens a real serial port at `path` and `baud`, configured with the
/// 8-N-1 framing the peer expects and a short native read timeout (the
/// receiver's own `timeout_us` governs staleness; this just keeps a
/// blocking read from hanging the async runtime indefinitely).
pub fn open(path: &str, baud: u32) -> Result<tokio_serial::SerialStream, io::Error> {
    let builder = tokio_serial::new(path, baud)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .timeout(Duration::from_millis(10));
    tokio_serial::SerialPortBuilderExt::open_native_async(builder)
}
