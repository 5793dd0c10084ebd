//! Ordered accumulation of stream events into a document.

use crate::generation::GeneratedDocument;
use crate::types::StreamEvent;
use crate::Error;

/// Where the stream currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamState {
    /// Content frames may still arrive.
    Streaming,
    /// A `completed` frame arrived; the document is final.
    Completed { documentation_id: Option<String> },
    /// An `error` frame arrived; the partial content is kept for inspection.
    Failed { message: String },
}

/// Accumulates content chunks in arrival order.
///
/// Invariant: `content()` always equals the concatenation of every
/// `Content` event processed so far. Once a terminal event has been
/// processed, further events are rejected; a new generation requires a
/// fresh accumulator.
#[derive(Debug)]
pub struct DocumentAccumulator {
    content: String,
    state: StreamState,
    last_advisory: Option<(String, u64)>,
}

impl DocumentAccumulator {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            state: StreamState::Streaming,
            last_advisory: None,
        }
    }

    /// Process one stream event.
    pub fn process_event(&mut self, event: StreamEvent) -> Result<(), Error> {
        if self.is_terminal() {
            return Err(Error::streaming("event received after a terminal frame"));
        }

        match event {
            StreamEvent::Content { text } => self.content.push_str(&text),
            StreamEvent::RateLimited {
                message,
                retry_after_secs,
            } => {
                self.last_advisory = Some((message, retry_after_secs));
            }
            StreamEvent::Completed { documentation_id } => {
                self.state = StreamState::Completed { documentation_id };
            }
            StreamEvent::Error { message } => {
                self.state = StreamState::Failed { message };
            }
        }
        Ok(())
    }

    /// The text accumulated so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, StreamState::Streaming)
    }

    /// The most recent rate-limit advisory, if any was seen.
    pub fn last_advisory(&self) -> Option<(&str, u64)> {
        self.last_advisory
            .as_ref()
            .map(|(msg, secs)| (msg.as_str(), *secs))
    }

    /// Finalize into a complete document.
    ///
    /// Fails if the backend reported an error, or if the stream ended
    /// without any terminal frame (premature close).
    pub fn finalize(self) -> Result<GeneratedDocument, Error> {
        match self.state {
            StreamState::Completed { documentation_id } => Ok(GeneratedDocument {
                documentation_id,
                content: self.content,
            }),
            StreamState::Failed { message } => Err(Error::backend(message)),
            StreamState::Streaming => Err(Error::transport(
                "stream closed before a terminal frame arrived",
            )),
        }
    }
}

impl Default for DocumentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
