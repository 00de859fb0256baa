//! Message dispatch and client fanout.
//!
//! This is the demultiplexing layer above the framing: decoded incoming
//! messages are routed to exactly one [`MessageHandler`] method by tag,
//! and outgoing messages can be broadcast to any number of registered
//! sinks through a [`ClientFanout`].

pub mod error;
pub mod fanout;
pub mod handler;

pub use error::{EndpointError, Result};
pub use fanout::{ClientFanout, MessageSink, SinkId};
pub use handler::{dispatch, DispatchOutcome, MessageHandler};
