/// Errors that can occur while reading or writing frames.
///
/// Transient incompleteness (not enough bytes buffered yet) is not an
/// error; the reader returns `Ok(None)` for that. Detected message loss is
/// not an error either — it travels in [`crate::ReceivedMessage`].
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The declared frame size is too small to hold a sequence number.
    #[error("truncated frame (declared size {size} bytes, minimum {min})")]
    TruncatedFrame { size: u64, min: usize },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A structurally complete frame carried an undecodable payload.
    ///
    /// Fatal for the channel: byte alignment beyond this frame cannot be
    /// trusted, so the embedding application should tear the channel down.
    #[error("payload decode failed: {0}")]
    Codec(#[from] codelink_messages::CodecError),

    /// An I/O error occurred while writing a frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink closed before a complete frame was written.
    #[error("connection closed (incomplete frame write)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
