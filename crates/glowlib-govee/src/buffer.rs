//! Transmit buffer with repeated-send reliability.
//!
//! The link to the device is lossy and carries no acknowledgements, so
//! each frame is queued several times; the device silently ignores
//! duplicates, and the redundancy raises delivery probability without a
//! request/ack/retry handshake.
//!
//! The buffer itself is a plain FIFO; the controller serializes access
//! to it (enqueue and drain never interleave inconsistently) and owns
//! the rollback discipline: a failed flush restores the entire drained
//! batch ahead of anything enqueued concurrently, so no frame is ever
//! silently dropped.

use std::collections::VecDeque;

use crate::frame::Frame;

/// Ordered queue of pending outbound frames.
#[derive(Debug, Default)]
pub struct TransmitBuffer {
    frames: VecDeque<Frame>,
}

impl TransmitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `repeat` copies of `frame` in request order.
    pub fn enqueue(&mut self, frame: Frame, repeat: usize) {
        for _ in 0..repeat {
            self.frames.push_back(frame.clone());
        }
    }

    /// Take ownership of the entire current content, leaving the buffer
    /// empty.
    pub fn take(&mut self) -> Vec<Frame> {
        self.frames.drain(..).collect()
    }

    /// Prepend a previously taken batch ahead of whatever has been
    /// enqueued since, preserving the batch's internal order.
    pub fn restore(&mut self, batch: Vec<Frame>) {
        for frame in batch.into_iter().rev() {
            self.frames.push_front(frame);
        }
    }

    /// Number of frames currently queued.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
