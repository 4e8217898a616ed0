//! # Packet Receiver Parser
//!
//! A pure, resumable state machine: given whatever bytes are on hand and
//! the state left over from the previous call, it advances as far as it
//! can and reports either a terminal outcome or how many more bytes it
//! needs before it can make progress. None of this module touches the
//! serial port or a clock — [`crate::transport::receiver`] drives it.

use crate::config::TransportConfig;
use crate::error::TransportError;

/// Where the parser is within one packet's framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseState {
    /// Scanning for `start_byte`.
    NeedStart,
    /// Start located; the size byte has not arrived yet.
    NeedSize,
    /// Size known; accumulating `[overhead][COBS…][delim][CRC]`.
    NeedBody {
        payload_size: u8,
        total: usize,
        collected: Vec<u8>,
    },
}

impl Default for ParseState {
    fn default() -> Self {
        ParseState::NeedStart
    }
}

/// What one call to [`step`] accomplished.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    NeedStart,
    NeedSize,
    NeedBody(usize),
    /// A full `[overhead][COBS…][delim][CRC]` region, ready for the
    /// validator.
    Done { payload_size: u8, framed: Vec<u8> },
}

/// The result of one [`step`] call: what happened, the state to resume
/// from next time, and any bytes that weren't consumed.
#[derive(Debug)]
pub struct StepResult {
    pub outcome: Outcome,
    pub state: ParseState,
    pub leftover: Vec<u8>,
}

/// Advances `state` as far as `input` allows.
///
/// On `Done`, the caller should reset to `ParseState::NeedStart` before
/// the next packet (the returned `state` is already `NeedStart`). On an
/// `Err`, per §7 the caller discards `leftover` rather than trying to
/// resynchronize mid-packet.
pub fn step(
    mut state: ParseState,
    mut input: Vec<u8>,
    config: &TransportConfig,
) -> Result<StepResult, TransportError> {
    loop {
        match state {
            ParseState::NeedStart => match input.iter().position(|&b| b == config.start_byte) {
                Some(pos) => {
                    input.drain(..=pos);
                    state = ParseState::NeedSize;
                }
                None => {
                    if config.allow_start_byte_errors {
                        return Err(TransportError::StartByteNotFound);
                    }
                    return Ok(StepResult {
                        outcome: Outcome::NeedStart,
                        state: ParseState::NeedStart,
                        leftover: Vec::new(),
                    });
                }
            },
            ParseState::NeedSize => {
                if input.is_empty() {
                    return Ok(StepResult {
                        outcome: Outcome::NeedSize,
                        state: ParseState::NeedSize,
                        leftover: input,
                    });
                }
                let payload_size = input[0];
                input.drain(..1);
                if payload_size < config.min_rx_payload_size
                    || payload_size > config.max_rx_payload_size
                {
                    return Err(TransportError::InvalidPayloadSize(payload_size));
                }
                let total = payload_size as usize + 2 + config.crc.width.postamble_size();
                state = ParseState::NeedBody {
                    payload_size,
                    total,
                    collected: Vec::with_capacity(total),
                };
            }
            ParseState::NeedBody {
                payload_size,
                total,
                mut collected,
            } => {
                let need = total - collected.len();
                if input.len() >= need {
                    collected.extend_from_slice(&input[..need]);
                    let leftover = input[need..].to_vec();
                    return Ok(StepResult {
                        outcome: Outcome::Done {
                            payload_size,
                            framed: collected,
                        },
                        state: ParseState::NeedStart,
                        leftover,
                    });
                } else {
                    collected.extend_from_slice(&input);
                    let remaining = total - collected.len();
                    return Ok(StepResult {
                        outcome: Outcome::NeedBody(remaining),
                        state: ParseState::NeedBody {
                            payload_size,
                            total,
                            collected,
                        },
                        leftover: Vec::new(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrcConfig;

    fn config() -> TransportConfig {
        TransportConfig {
            start_byte: 0x81,
            crc: CrcConfig::default(),
            ..Default::default()
        }
    }

    #[test]
    fn discards_noise_before_start_byte() {
        let result = step(
            ParseState::NeedStart,
            vec![0xAA, 0xBB, 0x81],
            &config(),
        )
        .unwrap();
        assert_eq!(result.outcome, Outcome::NeedSize);
        assert!(result.leftover.is_empty());
    }

    #[test]
    fn reports_need_start_on_pure_noise() {
        let result = step(ParseState::NeedStart, vec![0xAA, 0xBB], &config()).unwrap();
        assert_eq!(result.outcome, Outcome::NeedStart);
    }

    #[test]
    fn start_byte_errors_propagate_when_enabled() {
        let mut cfg = config();
        cfg.allow_start_byte_errors = true;
        let err = step(ParseState::NeedStart, vec![0xAA, 0xBB], &cfg).unwrap_err();
        assert_eq!(err, TransportError::StartByteNotFound);
    }

    #[test]
    fn rejects_invalid_payload_size() {
        let err = step(ParseState::NeedSize, vec![0], &config()).unwrap_err();
        assert_eq!(err, TransportError::InvalidPayloadSize(0));
    }

    #[test]
    fn single_call_captures_whole_packet() {
        // payload_size=1, overhead(1)+delim(1)=2, CRC16 postamble=2 => total 4
        let framed = vec![1, 0xAA, 0x00, 0x11, 0x22];
        let result = step(ParseState::NeedStart, {
            let mut v = vec![0x81];
            v.extend_from_slice(&framed);
            v
        }, &config())
        .unwrap();
        match result.outcome {
            Outcome::Done { payload_size, framed } => {
                assert_eq!(payload_size, 1);
                assert_eq!(framed, vec![0xAA, 0x00, 0x11, 0x22]);
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert!(result.leftover.is_empty());
    }

    #[test]
    fn fragmented_arrival_resumes_across_calls() {
        let cfg = config();
        let r1 = step(ParseState::NeedStart, vec![0x81], &cfg).unwrap();
        assert_eq!(r1.outcome, Outcome::NeedSize);

        let r2 = step(r1.state, vec![1], &cfg).unwrap();
        assert_eq!(r2.outcome, Outcome::NeedBody(4));

        let r3 = step(r2.state, vec![0xAA, 0x00], &cfg).unwrap();
        assert_eq!(r3.outcome, Outcome::NeedBody(2));

        let r4 = step(r3.state, vec![0x11, 0x22, 0x99], &cfg).unwrap();
        match r4.outcome {
            Outcome::Done { payload_size, framed } => {
                assert_eq!(payload_size, 1);
                assert_eq!(framed, vec![0xAA, 0x00, 0x11, 0x22]);
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(r4.leftover, vec![0x99]);
    }

    #[test]
    fn leftover_after_done_starts_next_packet() {
        let cfg = config();
        let mut stream = vec![0x81, 1, 0xAA, 0x00, 0x11, 0x22];
        stream.push(0x81); // next packet's start byte, trailing noise
        let result = step(ParseState::NeedStart, stream, &cfg).unwrap();
        match result.outcome {
            Outcome::Done { .. } => {}
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(result.leftover, vec![0x81]);
    }
}
