use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};
use codelink_messages::{encode_message, TaggedMessage};

use crate::error::{FrameError, Result};
use crate::reader::FrameConfig;
use crate::SEQUENCE_LEN;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Encodes messages into frames and writes them to a byte-stream sink.
///
/// Carries its own monotonic sequence counter, starting at 0, independent
/// of the opposite direction of the channel. A frame is emitted as one
/// logical unit; concurrent writers to the same sink must be serialized by
/// the embedding application or framing is corrupted for every subsequent
/// frame.
pub struct FrameWriter<W> {
    inner: W,
    buf: BytesMut,
    sequence: i64,
    config: FrameConfig,
}

impl<W: Write> FrameWriter<W> {
    /// Create a frame writer with default configuration.
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a frame writer with explicit configuration.
    pub fn with_config(inner: W, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            sequence: 0,
            config,
        }
    }

    /// Encode and write one message as a complete frame.
    pub fn write(&mut self, message: &TaggedMessage) -> Result<()> {
        let mut payload = BytesMut::new();
        encode_message(message, &mut payload)?;

        if payload.len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }

        self.buf.clear();
        self.buf.put_u64_le((SEQUENCE_LEN + payload.len()) as u64);
        self.buf.put_i64_le(self.sequence);
        self.buf.extend_from_slice(&payload);
        self.sequence = self.sequence.wrapping_add(1);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Sequence number the next frame will carry.
    pub fn next_sequence(&self) -> i64 {
        self.sequence
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
