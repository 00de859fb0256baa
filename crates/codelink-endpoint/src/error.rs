/// Errors that can occur while sending messages through a sink.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// Frame-level error from the underlying writer.
    #[error("frame error: {0}")]
    Frame(#[from] codelink_frame::FrameError),

    /// The sink is no longer able to accept messages.
    #[error("sink closed: {0}")]
    SinkClosed(String),
}

pub type Result<T> = std::result::Result<T, EndpointError>;
