//! # Packet Builder
//!
//! Assembles a wire packet from a staged payload:
//!
//! ```text
//! [start_byte] [payload_size] [overhead] [COBS(payload, delim)...] [delim] [CRC]
//! ```
//!
//! The receive path always expects `payload_size` between `start_byte` and
//! the COBS overhead byte (§6); the builder emits it on send too, so both
//! directions share one framing layout.

use crate::cobs;
use crate::config::TransportConfig;
use crate::crc::CrcEngine;
use crate::error::TransportError;

/// Builds the full wire packet for `payload`.
pub fn build(
    payload: &[u8],
    config: &TransportConfig,
    crc: &CrcEngine,
) -> Result<Vec<u8>, TransportError> {
    if payload.is_empty() {
        return Err(TransportError::EmptyPayload);
    }
    if payload.len() > config.max_tx_payload_size as usize {
        return Err(TransportError::PayloadTooLarge {
            len: payload.len(),
            max: config.max_tx_payload_size as usize,
        });
    }

    let encoded = cobs::encode(payload, config.delimiter_byte)?;

    let mut packet = Vec::with_capacity(2 + encoded.len() + config.crc.width.postamble_size());
    packet.push(config.start_byte);
    packet.push(payload.len() as u8);
    packet.extend_from_slice(&encoded);
    crc.append(&encoded, &mut packet);
    Ok(packet)
}
