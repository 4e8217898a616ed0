//! # Packet Validator
//!
//! Takes the raw `[overhead][COBS payload][delim][CRC]` region the parser
//! captured, checks its CRC, and COBS-decodes it into the payload the
//! caller actually wants.

use crate::cobs;
use crate::config::TransportConfig;
use crate::crc::CrcEngine;
use crate::error::TransportError;
use crate::logging::log_warn;

/// Validates and decodes `framed` (as produced by
/// [`crate::transport::parser::Outcome::Done`]), returning the decoded
/// payload.
pub fn validate(
    framed: &[u8],
    config: &TransportConfig,
    crc: &CrcEngine,
) -> Result<Vec<u8>, TransportError> {
    if !crc.verify(framed)? {
        log_warn("CRC mismatch on received packet");
        return Err(TransportError::CrcMismatch);
    }

    let postamble = config.crc.width.postamble_size();
    let cobs_region = &framed[..framed.len() - postamble];
    cobs::decode(cobs_region, config.delimiter_byte).map_err(|e| {
        log_warn(&format!("COBS decode failed: {e}"));
        TransportError::CobsDecodeFailed(e)
    })
}
