//! # packetlink-rs — a bidirectional, packet-oriented serial transport
//!
//! `packetlink-rs` exchanges length-prefixed binary payloads with a
//! microcontroller peer over a serial link. A packet on the wire is:
//!
//! ```text
//! [start_byte] [payload_size] [overhead] [COBS(payload)…] [delimiter] [CRC]
//! ```
//!
//! The crate is organized bottom-up:
//!
//! - [`cobs`] — Consistent Overhead Byte Stuffing encode/decode.
//! - [`crc`] — a table-driven, width-configurable CRC engine.
//! - [`buffers`] — fixed-capacity transmission/reception staging areas.
//! - [`transport`] — the packet builder, receiver state machine, packet
//!   validator, serial abstractions, and the [`transport::PacketTransport`]
//!   facade that ties them together.
//! - [`config`] — immutable per-transport configuration.
//! - [`clock`] — the monotonic microsecond clock the receiver's staleness
//!   timeout depends on.
//! - [`error`] — the error types raised anywhere in the pipeline.
//!
//! Out of scope: serial port enumeration, multiplexing, retransmission,
//! encryption, and any higher-level typed message marshalling — this
//! crate only deals in byte slices and payload sizes.

pub mod buffers;
pub mod clock;
pub mod cobs;
pub mod config;
pub mod crc;
pub mod error;
pub mod logging;
pub mod transport;

pub use config::{CrcConfig, CrcWidth, TransportConfig};
pub use error::{CobsError, CrcError, TransportError};
pub use logging::init_logger;
pub use transport::{PacketTransport, SerialPort, TransportStats};
