//! Length-prefixed, sequence-numbered message framing.
//!
//! Each direction of the channel carries frames of the form:
//! - An 8-byte little-endian frame size (everything after the size field)
//! - An 8-byte little-endian sequence number
//! - The message payload (see `codelink-messages`)
//!
//! Sequence numbers exist only to detect gaps — a mismatch is logged and
//! reported to the caller, never fatal. The frame boundary, once complete,
//! is trusted; a payload that fails to decode under a known tag is fatal
//! for the channel.
//!
//! [`FrameReader`] is a non-blocking poll over fed bytes; the surrounding
//! I/O event mechanism decides when to feed and re-poll. [`FrameWriter`]
//! writes to any `std::io::Write`.

pub mod error;
pub mod reader;
pub mod sequence;
pub mod writer;

pub use error::{FrameError, Result};
pub use reader::{FrameConfig, FrameReader, ReceivedMessage, DEFAULT_MAX_PAYLOAD};
pub use sequence::{SequenceCounter, SequenceGap};
pub use writer::FrameWriter;

/// Byte length of the `frame_size` field.
pub const SIZE_PREFIX_LEN: usize = 8;

/// Byte length of the `sequence_number` field.
pub const SEQUENCE_LEN: usize = 8;
