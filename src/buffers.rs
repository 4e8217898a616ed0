//! # Transmission and Reception Buffers
//!
//! Fixed-capacity byte buffers that track a high-water-mark "used length"
//! independently of the underlying storage, mirroring how a packet builder
//! stages an outgoing frame and a receiver accumulates an incoming one
//! without reallocating per packet.

use crate::error::TransportError;

/// A fixed-capacity staging area for an outgoing payload.
///
/// `used` marks how much of `storage` holds live payload bytes; `stage`
/// overwrites from the front and updates `used`, it never appends.
#[derive(Debug, Clone)]
pub struct TransmissionBuffer {
    storage: Vec<u8>,
    used: usize,
}

impl TransmissionBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        TransmissionBuffer {
            storage: vec![0u8; capacity],
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.used]
    }

    /// Writes `bytes` at offset `index`, succeeding iff `index + bytes.len()
    /// <= capacity()`. `used` is advanced to `max(used, index + bytes.len())`
    /// — writing earlier bytes again never shrinks the staged payload.
    pub fn write_at(&mut self, index: usize, bytes: &[u8]) -> Result<(), TransportError> {
        let end = index + bytes.len();
        if end > self.storage.len() {
            return Err(TransportError::PayloadTooLarge {
                len: end,
                max: self.storage.len(),
            });
        }
        self.storage[index..end].copy_from_slice(bytes);
        self.used = self.used.max(end);
        Ok(())
    }

    /// Stages `payload` for transmission, replacing whatever was staged
    /// before.
    pub fn stage(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.reset();
        self.write_at(0, payload)
    }

    /// Clears the staged payload without touching the backing storage.
    pub fn reset(&mut self) {
        self.used = 0;
    }
}

/// A fixed-capacity accumulation area for an incoming payload.
///
/// Bytes are appended one at a time as the receiver state machine
/// consumes them off the wire; `used` is the high-water mark reached by
/// the packet currently (or most recently) in progress.
#[derive(Debug, Clone)]
pub struct ReceptionBuffer {
    storage: Vec<u8>,
    used: usize,
}

impl ReceptionBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        ReceptionBuffer {
            storage: vec![0u8; capacity],
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.used]
    }

    /// Appends a single byte, growing `used` by one.
    ///
    /// Returns `PayloadTooLarge` if the buffer is already full; callers are
    /// expected to have validated the declared packet size against
    /// capacity before accumulating its body.
    pub fn push(&mut self, byte: u8) -> Result<(), TransportError> {
        if self.used >= self.storage.len() {
            return Err(TransportError::PayloadTooLarge {
                len: self.used + 1,
                max: self.storage.len(),
            });
        }
        self.storage[self.used] = byte;
        self.used += 1;
        Ok(())
    }

    /// Clears the accumulated payload without touching the backing
    /// storage.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Overwrites the buffer prefix with a validator's decoded payload,
    /// per §4.6: the raw framed packet is replaced in place by its
    /// decoded form.
    pub fn set_decoded(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if payload.len() > self.storage.len() {
            return Err(TransportError::PayloadTooLarge {
                len: payload.len(),
                max: self.storage.len(),
            });
        }
        self.storage[..payload.len()].copy_from_slice(payload);
        self.used = payload.len();
        Ok(())
    }
}
