use bytes::{Buf, BytesMut};
use codelink_messages::{decode_message, DecodedMessage};

use crate::error::{FrameError, Result};
use crate::sequence::{SequenceCounter, SequenceGap};
use crate::{SEQUENCE_LEN, SIZE_PREFIX_LEN};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Configuration for frame reading and writing.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// One decoded incoming message, together with the loss signal raised by
/// the frame that carried it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    pub message: DecodedMessage,
    /// `Some` when the carrying frame's sequence number revealed that one
    /// or more prior frames never arrived.
    pub gap: Option<SequenceGap>,
}

/// Reassembles complete frames from a fed byte stream and decodes them.
///
/// The reader never blocks: [`FrameReader::read`] works on whatever bytes
/// have been fed so far and returns `Ok(None)` until a full frame is
/// buffered. The embedding I/O loop feeds bytes as they arrive and polls
/// again.
pub struct FrameReader {
    buf: BytesMut,
    /// Frame size already consumed from the buffer, awaiting its bytes.
    pending_frame_size: Option<usize>,
    counter: SequenceCounter,
    config: FrameConfig,
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReader {
    /// Create a frame reader with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a frame reader with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            pending_frame_size: None,
            counter: SequenceCounter::new(),
            config,
        }
    }

    /// Append bytes received from the channel.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of fed bytes not yet consumed by a complete frame.
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Attempt to produce exactly one message.
    ///
    /// Returns `Ok(None)` without consuming a frame when fewer bytes than
    /// a complete frame are buffered; a size prefix that has already been
    /// read stays cached for the next call. Once a full frame is
    /// available, runs loss detection, decodes the payload, and returns
    /// the message.
    pub fn read(&mut self) -> Result<Option<ReceivedMessage>> {
        let frame_size = match self.pending_frame_size {
            Some(size) => size,
            None => {
                if self.buf.len() < SIZE_PREFIX_LEN {
                    return Ok(None);
                }
                let declared = self.buf.get_u64_le();
                if (declared as usize) < SEQUENCE_LEN {
                    return Err(FrameError::TruncatedFrame {
                        size: declared,
                        min: SEQUENCE_LEN,
                    });
                }
                let payload_len = declared as usize - SEQUENCE_LEN;
                if payload_len > self.config.max_payload_size {
                    return Err(FrameError::PayloadTooLarge {
                        size: payload_len,
                        max: self.config.max_payload_size,
                    });
                }
                self.pending_frame_size = Some(declared as usize);
                declared as usize
            }
        };

        if self.buf.len() < frame_size {
            return Ok(None);
        }
        self.pending_frame_size = None;

        let sequence = self.buf.get_i64_le();
        let gap = self.counter.observe(sequence);
        if let Some(gap) = gap {
            tracing::warn!(
                expected = gap.expected,
                observed = gap.observed,
                "message(s) lost on channel"
            );
        }

        let payload = self.buf.split_to(frame_size - SEQUENCE_LEN);
        let message = decode_message(&payload)?;

        Ok(Some(ReceivedMessage { message, gap }))
    }

    /// Drain every complete frame currently buffered.
    ///
    /// Finite per invocation; safe to call again after feeding more bytes.
    pub fn read_all(&mut self) -> Result<Vec<ReceivedMessage>> {
        let mut messages = Vec::new();
        while let Some(received) = self.read()? {
            messages.push(received);
        }
        Ok(messages)
    }

    /// Reinitialize loss detection; the next observed sequence number
    /// becomes the new baseline. Used when the remote endpoint restarted.
    pub fn reset_sequence_counter(&mut self) {
        self.counter.reset();
    }

    /// Current reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
