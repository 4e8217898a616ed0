//! # Transport Error Handling
//!
//! This module defines the error types that can occur anywhere in the
//! packet transport pipeline: COBS framing, CRC checksumming, and the
//! receiver state machine and transport facade built on top of them.

use thiserror::Error;

/// Errors raised by the COBS codec (`crate::cobs`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CobsError {
    /// The payload to encode was empty, or too short to decode.
    #[error("COBS payload too short")]
    PayloadTooShort,

    /// The payload to encode exceeded 254 bytes.
    #[error("COBS payload too long")]
    PayloadTooLong,

    /// The delimiter byte was found somewhere other than the final
    /// position of the encoded block.
    #[error("COBS delimiter misplaced")]
    DelimiterMisplaced,

    /// The overhead chain walked past the end of the buffer before
    /// reaching the delimiter.
    #[error("COBS data corrupted")]
    Corrupted,
}

/// Errors raised by the CRC engine (`crate::crc`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CrcError {
    /// The requested byte range did not fit in the supplied buffer.
    #[error("buffer too small for CRC operation: needed {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Errors surfaced by the packet builder, receiver state machine, packet
/// validator, and transport facade.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The serial endpoint is not open.
    #[error("serial port not connected")]
    NotConnected,

    /// `send()` was called with nothing staged in the transmission buffer.
    #[error("transmission buffer is empty")]
    EmptyPayload,

    /// The staged payload is larger than `max_tx_payload_size`.
    #[error("staged payload of {len} bytes exceeds the {max}-byte limit")]
    PayloadTooLarge { len: usize, max: usize },

    /// COBS encoding failed while building an outgoing packet.
    #[error("COBS encode failed: {0}")]
    EncodeFailed(#[from] CobsError),

    /// The underlying serial write failed.
    #[error("serial write failed: {0}")]
    WriteFailed(String),

    /// No start byte was located in the drained input, and
    /// `allow_start_byte_errors` is `true`.
    #[error("start byte not found in input stream")]
    StartByteNotFound,

    /// The size byte following the start byte was outside
    /// `[min_rx_payload_size, max_rx_payload_size]`.
    #[error("invalid payload size byte: {0}")]
    InvalidPayloadSize(u8),

    /// The inter-byte timeout elapsed while waiting for the size byte.
    #[error("timed out waiting for the packet size byte")]
    StaleSize,

    /// The inter-byte timeout elapsed while waiting for the packet body.
    #[error("timed out waiting for the packet body")]
    StaleBody,

    /// The CRC computed over the captured packet did not verify.
    #[error("CRC mismatch")]
    CrcMismatch,

    /// COBS decoding of a captured packet failed.
    #[error("COBS decode failed: {0}")]
    CobsDecodeFailed(CobsError),

    /// The underlying serial read failed.
    #[error("serial read failed: {0}")]
    ReadFailed(String),

    /// A CRC configuration or buffer-sizing error.
    #[error("CRC error: {0}")]
    Crc(#[from] CrcError),

    /// A configuration value violated an invariant documented in
    /// `TransportConfig::validate`.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),
}
