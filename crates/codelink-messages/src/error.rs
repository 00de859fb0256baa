/// Errors that can occur while encoding or decoding message payloads.
///
/// An unrecognized tag byte is deliberately NOT an error — see
/// [`crate::codec::DecodedMessage::Unknown`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload was empty; even tag-only messages carry one tag byte.
    #[error("empty message payload (missing tag byte)")]
    EmptyPayload,

    /// A message kind without a body carried trailing bytes.
    #[error("unexpected body ({len} bytes) for bodyless message tag {tag}")]
    UnexpectedBody { tag: u8, len: usize },

    /// The body of a known message kind failed to deserialize.
    #[error("malformed body for message tag {tag}: {source}")]
    MalformedBody {
        tag: u8,
        source: serde_json::Error,
    },

    /// A message body failed to serialize.
    #[error("failed to serialize message body: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
