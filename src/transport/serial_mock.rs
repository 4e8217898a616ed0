//! # Mock Serial Port
//!
//! An in-memory stand-in for [`crate::transport::serial::SerialPort`] used
//! by the transport facade's own tests and available to downstream crates
//! for deterministic integration tests against the receiver state machine.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use super::serial::SerialPort;

/// A bidirectional byte pipe: bytes queued with `queue_rx_data` are what
/// the transport will read; bytes the transport writes land in
/// `tx_buffer` for inspection.
#[derive(Clone, Default)]
pub struct MockSerialPort {
    tx_buffer: Arc<Mutex<Vec<u8>>>,
    rx_buffer: Arc<Mutex<VecDeque<u8>>>,
    next_error: Arc<Mutex<Option<io::ErrorKind>>>,
}

impl MockSerialPort {
    pub fn new() -> Self {
        MockSerialPort::default()
    }

    /// Queues bytes to be returned by subsequent reads.
    pub fn queue_rx_data(&self, data: &[u8]) {
        self.rx_buffer.lock().unwrap().extend(data);
    }

    /// Returns everything written to the port so far.
    pub fn get_tx_data(&self) -> Vec<u8> {
        self.tx_buffer.lock().unwrap().clone()
    }

    /// Clears both directions.
    pub fn clear(&self) {
        self.tx_buffer.lock().unwrap().clear();
        self.rx_buffer.lock().unwrap().clear();
    }

    /// Arranges for the next operation to fail with `kind`.
    pub fn set_next_error(&self, kind: io::ErrorKind) {
        *self.next_error.lock().unwrap() = Some(kind);
    }

    fn take_error(&self) -> Option<io::Error> {
        self.next_error.lock().unwrap().take().map(io::Error::from)
    }
}

#[async_trait::async_trait]
impl SerialPort for MockSerialPort {
    fn in_waiting(&mut self) -> io::Result<usize> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        Ok(self.rx_buffer.lock().unwrap().len())
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        let mut rx = self.rx_buffer.lock().unwrap();
        let n = rx.len().min(buf.len());
        for slot in buf.iter_mut().take(n) {
            *slot = rx.pop_front().unwrap();
        }
        Ok(n)
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.tx_buffer.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    fn flush_input(&mut self) -> io::Result<()> {
        self.rx_buffer.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_bytes_are_read_back() {
        let mut port = MockSerialPort::new();
        port.queue_rx_data(&[1, 2, 3]);
        assert_eq!(port.in_waiting().unwrap(), 3);
        let mut buf = [0u8; 2];
        assert_eq!(port.read(&mut buf).await.unwrap(), 2);
        assert_eq!(buf, [1, 2]);
        assert_eq!(port.in_waiting().unwrap(), 1);
    }

    #[tokio::test]
    async fn written_bytes_are_captured() {
        let mut port = MockSerialPort::new();
        port.write_all(&[9, 8, 7]).await.unwrap();
        assert_eq!(port.get_tx_data(), vec![9, 8, 7]);
    }

    #[tokio::test]
    async fn injected_error_surfaces_once() {
        let mut port = MockSerialPort::new();
        port.set_next_error(io::ErrorKind::BrokenPipe);
        let mut buf = [0u8; 1];
        assert!(port.read(&mut buf).await.is_err());
        port.queue_rx_data(&[5]);
        assert_eq!(port.read(&mut buf).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn flush_input_discards_queued_bytes() {
        let mut port = MockSerialPort::new();
        port.queue_rx_data(&[1, 2, 3]);
        port.flush_input().unwrap();
        assert_eq!(port.in_waiting().unwrap(), 0);
    }
}
