use std::io::Write;
use std::sync::Mutex;

use codelink_frame::FrameWriter;
use codelink_messages::TaggedMessage;

use crate::error::Result;

/// Anything that can accept an outgoing message.
///
/// A [`FrameWriter`] over the channel's byte sink is the production
/// implementation; tests substitute recording sinks.
pub trait MessageSink {
    fn send(&mut self, message: &TaggedMessage) -> Result<()>;
}

impl<W: Write> MessageSink for FrameWriter<W> {
    fn send(&mut self, message: &TaggedMessage) -> Result<()> {
        self.write(message)?;
        Ok(())
    }
}

/// Handle identifying one registered sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

#[derive(Default)]
struct FanoutInner {
    sinks: Vec<(SinkId, Box<dyn MessageSink + Send>)>,
    next_id: u64,
}

/// Broadcasts outgoing messages to a dynamic set of registered sinks.
///
/// Decouples "one logical endpoint" from "one physical connection": a
/// backend talking to several observing frontends sends to the fanout and
/// every registered sink receives the message exactly once per send.
/// Registration and broadcast are serialized by an internal lock, so the
/// sink set may be mutated concurrently with a broadcast in progress.
#[derive(Default)]
pub struct ClientFanout {
    inner: Mutex<FanoutInner>,
}

impl ClientFanout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink; the returned handle removes it again.
    pub fn add_sink(&self, sink: Box<dyn MessageSink + Send>) -> SinkId {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = SinkId(inner.next_id);
        inner.next_id += 1;
        inner.sinks.push((id, sink));
        id
    }

    /// Remove a sink. Removing an id that is not registered is a no-op.
    pub fn remove_sink(&self, id: SinkId) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sinks.retain(|(sink_id, _)| *sink_id != id);
    }

    /// Number of currently registered sinks.
    pub fn sink_count(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sinks.len()
    }

    /// Forward `message` to every registered sink.
    ///
    /// Delivery is best effort per sink: a failing sink is warned and
    /// skipped, and the remaining sinks still receive the message.
    pub fn broadcast(&self, message: &TaggedMessage) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        for (id, sink) in &mut inner.sinks {
            if let Err(error) = sink.send(message) {
                tracing::warn!(sink_id = id.0, %error, "failed to deliver message to sink");
            }
        }
    }
}

impl MessageSink for ClientFanout {
    fn send(&mut self, message: &TaggedMessage) -> Result<()> {
        self.broadcast(message);
        Ok(())
    }
}
