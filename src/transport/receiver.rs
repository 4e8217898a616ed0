//! # Packet Receiver
//!
//! Drives [`crate::transport::parser`] against a [`SerialPort`] and a
//! [`Clock`], handling the inter-byte staleness timeout and the residual
//! carry-over between calls. One [`receive`] call performs at most one
//! successful parse: it returns `Ok(None)` when nothing is currently
//! obtainable, `Ok(Some(..))` on a captured frame, or an error.

use std::time::Duration;

use log::trace;

use crate::clock::Clock;
use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::logging::log_debug;
use crate::transport::parser::{self, Outcome, ParseState};
use crate::transport::residual::Residual;
use crate::transport::serial::SerialPort;

/// Polling granularity for the inter-byte staleness wait, per §5
/// (cooperative sleep, ≤100 µs).
const POLL_GRANULARITY_US: u64 = 100;

/// Attempts one full packet parse, returning the `(payload_size, framed)`
/// pair handed off to the validator.
pub async fn receive<P, C>(
    port: &mut P,
    residual: &mut Residual,
    clock: &C,
    config: &TransportConfig,
) -> Result<Option<(u8, Vec<u8>)>, TransportError>
where
    P: SerialPort,
    C: Clock,
{
    let mut state = ParseState::NeedStart;
    let mut pending = residual.drain_all();
    pending.extend(read_available(port).await?);

    loop {
        let stepped = match parser::step(state, pending, config) {
            Ok(r) => r,
            Err(e) => {
                residual.clear();
                return Err(e);
            }
        };

        match stepped.outcome {
            Outcome::NeedStart => {
                // No timeout applies before the start byte is found (§4.5);
                // absence of data is reported immediately.
                if !residual.is_empty() {
                    log_debug("dropping residual bytes, no start byte found");
                }
                residual.clear();
                return Ok(None);
            }
            Outcome::Done {
                payload_size,
                framed,
            } => {
                trace!("packet captured, {} leftover bytes", stepped.leftover.len());
                residual.set(stepped.leftover);
                return Ok(Some((payload_size, framed)));
            }
            Outcome::NeedSize => {
                trace!("start byte found, waiting for size byte");
                pending = wait_for_more(port, clock, config.timeout_us, TransportError::StaleSize)
                    .await
                    .map_err(|e| {
                        residual.clear();
                        e
                    })?;
                state = stepped.state;
            }
            Outcome::NeedBody(remaining) => {
                trace!("waiting for {remaining} more body bytes");
                pending = wait_for_more(port, clock, config.timeout_us, TransportError::StaleBody)
                    .await
                    .map_err(|e| {
                        residual.clear();
                        e
                    })?;
                state = stepped.state;
            }
        }
    }
}

/// Polls `port` until at least one more byte is available, or returns
/// `stale_err` once `timeout_us` has elapsed since this call began.
async fn wait_for_more<P, C>(
    port: &mut P,
    clock: &C,
    timeout_us: u64,
    stale_err: TransportError,
) -> Result<Vec<u8>, TransportError>
where
    P: SerialPort,
    C: Clock,
{
    let deadline = clock.now_us().saturating_add(timeout_us);
    loop {
        let avail = port
            .in_waiting()
            .map_err(|e| TransportError::ReadFailed(e.to_string()))?;
        if avail > 0 {
            return read_available(port).await;
        }
        if clock.now_us() >= deadline {
            return Err(stale_err);
        }
        tokio::time::sleep(Duration::from_micros(POLL_GRANULARITY_US)).await;
    }
}

async fn read_available<P: SerialPort>(port: &mut P) -> Result<Vec<u8>, TransportError> {
    let avail = port
        .in_waiting()
        .map_err(|e| TransportError::ReadFailed(e.to_string()))?;
    if avail == 0 {
        return Ok(Vec::new());
    }
    let mut buf = vec![0u8; avail];
    let n = port
        .read(&mut buf)
        .await
        .map_err(|e| TransportError::ReadFailed(e.to_string()))?;
    buf.truncate(n);
    Ok(buf)
}
