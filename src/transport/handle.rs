//! # Transport Facade
//!
//! [`PacketTransport`] owns one serial endpoint, one transmission buffer,
//! one reception buffer, and one residual carry-over, and exposes the
//! public `send`/`receive` surface described in §4.7. It is single-
//! threaded and non-reentrant (§5): callers needing to share an instance
//! across threads must serialize access externally.

use crate::buffers::{ReceptionBuffer, TransmissionBuffer};
use crate::clock::{Clock, SystemClock};
use crate::config::TransportConfig;
use crate::crc::CrcEngine;
use crate::error::TransportError;
use crate::transport::builder;
use crate::transport::receiver;
use crate::transport::residual::Residual;
use crate::transport::serial;
use crate::transport::serial::SerialPort;
use crate::transport::validator;

/// Running counters for observability, supplementing the core contract
/// in §4.7 — not part of the wire protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    pub packets_sent: u64,
    pub packets_received: u64,
    pub receive_errors: u64,
    pub crc_failures: u64,
    pub cobs_failures: u64,
    pub stale_timeouts: u64,
}

/// Owns one serial endpoint and the buffers/state around it.
pub struct PacketTransport<P, C = SystemClock>
where
    P: SerialPort,
    C: Clock,
{
    port: P,
    clock: C,
    config: TransportConfig,
    crc: CrcEngine,
    tx: TransmissionBuffer,
    rx: ReceptionBuffer,
    residual: Residual,
    stats: TransportStats,
}

impl<P: SerialPort> PacketTransport<P, SystemClock> {
    /// Builds a transport with the real system clock.
    pub fn new(port: P, config: TransportConfig) -> Result<Self, TransportError> {
        Self::with_clock(port, config, SystemClock::new())
    }
}

impl PacketTransport<tokio_serial::SerialStream, SystemClock> {
    /// Opens `path` at `baud` and wraps it in a transport using the
    /// default configuration, in one call.
    pub async fn connect(path: &str, baud: u32) -> Result<Self, TransportError> {
        Self::connect_with_config(path, baud, TransportConfig::default()).await
    }

    /// Opens `path` at `baud` and wraps it in a transport using `config`.
    pub async fn connect_with_config(
        path: &str,
        baud: u32,
        config: TransportConfig,
    ) -> Result<Self, TransportError> {
        let port = serial::open(path, baud).map_err(|_| TransportError::NotConnected)?;
        Self::new(port, config)
    }
}

impl<P, C> PacketTransport<P, C>
where
    P: SerialPort,
    C: Clock,
{
    /// Builds a transport with an injected clock — used in tests to make
    /// staleness timeouts deterministic.
    pub fn with_clock(port: P, config: TransportConfig, clock: C) -> Result<Self, TransportError> {
        config.validate()?;
        let crc = CrcEngine::new(config.crc);
        let rx_capacity =
            config.max_rx_payload_size as usize + 2 + config.crc.width.postamble_size();
        Ok(PacketTransport {
            port,
            clock,
            tx: TransmissionBuffer::with_capacity(config.max_tx_payload_size as usize),
            rx: ReceptionBuffer::with_capacity(rx_capacity),
            residual: Residual::new(),
            crc,
            config,
            stats: TransportStats::default(),
        })
    }

    pub fn stats(&self) -> TransportStats {
        self.stats
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Stages `payload` for the next `send()`.
    pub fn stage(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.tx.stage(payload)
    }

    /// The decoded payload from the most recent successful `receive()`.
    pub fn received_payload(&self) -> &[u8] {
        self.rx.as_slice()
    }

    /// True iff at least `min_rx_payload_size + framing_overhead` bytes
    /// are currently obtainable (residual plus serial input). Never reads.
    pub fn available(&mut self) -> Result<bool, TransportError> {
        let waiting = self
            .port
            .in_waiting()
            .map_err(|e| TransportError::ReadFailed(e.to_string()))?;
        let needed = self.config.min_rx_payload_size as usize + self.config.framing_overhead();
        Ok(self.residual.len() + waiting >= needed)
    }

    /// Resets the transmission buffer's staged length to zero.
    pub fn reset_tx(&mut self) {
        self.tx.reset();
    }

    /// Resets the reception buffer's decoded length to zero.
    pub fn reset_rx(&mut self) {
        self.rx.reset();
    }

    /// Builds and writes the staged payload as one packet.
    pub async fn send(&mut self) -> Result<bool, TransportError> {
        let packet = builder::build(self.tx.as_slice(), &self.config, &self.crc)?;
        self.port
            .write_all(&packet)
            .await
            .map_err(|e| TransportError::WriteFailed(e.to_string()))?;
        self.stats.packets_sent += 1;
        Ok(true)
    }

    /// Runs the receiver state machine and validator. Returns `true` iff
    /// a full, valid packet now sits in the reception buffer.
    pub async fn receive(&mut self) -> Result<bool, TransportError> {
        let outcome = receiver::receive(&mut self.port, &mut self.residual, &self.clock, &self.config).await;

        let (payload_size, framed) = match outcome {
            Ok(Some(pair)) => pair,
            Ok(None) => return Ok(false),
            Err(e) => {
                if matches!(e, TransportError::StaleSize | TransportError::StaleBody) {
                    self.stats.stale_timeouts += 1;
                }
                self.stats.receive_errors += 1;
                self.rx.reset();
                return Err(e);
            }
        };
        let _ = payload_size;

        match validator::validate(&framed, &self.config, &self.crc) {
            Ok(payload) => {
                self.rx.set_decoded(&payload)?;
                self.stats.packets_received += 1;
                Ok(true)
            }
            Err(e) => {
                if matches!(e, TransportError::CrcMismatch) {
                    self.stats.crc_failures += 1;
                }
                if matches!(e, TransportError::CobsDecodeFailed(_)) {
                    self.stats.cobs_failures += 1;
                }
                self.stats.receive_errors += 1;
                self.rx.reset();
                Err(e)
            }
        }
    }
}
