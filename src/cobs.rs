//! # COBS Framing
//!
//! Consistent Overhead Byte Stuffing over a configurable delimiter byte.
//! Unlike a throughput-oriented COBS implementation, `decode` validates the
//! overhead chain it walks rather than trusting it, since the bytes it
//! consumes come off a wire and may be corrupted or truncated.
//!
//! An encoded block is `[overhead byte][stuffed payload][delimiter]`: the
//! delimiter never occurs inside the stuffed region, so a reader can always
//! find the end of a packet by scanning for it.

use crate::error::CobsError;

const MAX_RUN: usize = 0xFF;

/// Encodes `payload` (1 to 254 bytes) into a COBS block terminated by
/// `delimiter`.
pub fn encode(payload: &[u8], delimiter: u8) -> Result<Vec<u8>, CobsError> {
    if payload.is_empty() {
        return Err(CobsError::PayloadTooShort);
    }
    if payload.len() > 254 {
        return Err(CobsError::PayloadTooLong);
    }

    let mut out = Vec::with_capacity(payload.len() + 2);
    out.push(0);
    let mut code_index = 0usize;
    let mut code = 1u8;

    for &byte in payload {
        if byte == delimiter {
            out[code_index] = code;
            code_index = out.len();
            out.push(0);
            code = 1;
        } else {
            out.push(byte);
            code += 1;
            if code as usize == MAX_RUN {
                out[code_index] = code;
                code_index = out.len();
                out.push(0);
                code = 1;
            }
        }
    }
    out[code_index] = code;
    out.push(delimiter);
    Ok(out)
}

/// Decodes a COBS block produced by [`encode`], recovering the original
/// payload. `encoded` must include the trailing delimiter.
///
/// Returns `CobsError::Corrupted` if the overhead chain walks past the end
/// of the block, an overhead byte is zero, or the stuffed region contains a
/// literal `delimiter` byte (which `encode` never produces).
pub fn decode(encoded: &[u8], delimiter: u8) -> Result<Vec<u8>, CobsError> {
    if encoded.len() < 3 {
        return Err(CobsError::PayloadTooShort);
    }
    if encoded.len() > 256 {
        return Err(CobsError::PayloadTooLong);
    }
    if encoded[encoded.len() - 1] != delimiter {
        return Err(CobsError::DelimiterMisplaced);
    }

    let body = &encoded[..encoded.len() - 1];
    let mut out = Vec::with_capacity(body.len());
    let mut idx = 0usize;

    while idx < body.len() {
        let code = body[idx] as usize;
        if code == 0 {
            return Err(CobsError::Corrupted);
        }
        idx += 1;
        let run_len = code - 1;
        let end = idx + run_len;
        if end > body.len() {
            return Err(CobsError::Corrupted);
        }
        for &b in &body[idx..end] {
            if b == delimiter {
                return Err(CobsError::Corrupted);
            }
            out.push(b);
        }
        idx = end;
        if code != MAX_RUN && idx < body.len() {
            out.push(delimiter);
        }
    }

    Ok(out)
}
