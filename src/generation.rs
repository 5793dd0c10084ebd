//! Generation results: raw event streams and buffered documents.

use crate::types::StreamEvent;
use crate::Error;
use futures_util::stream::Stream;
use std::pin::Pin;

/// A finished document returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Backend identifier used for refinement rounds, when provided.
    pub documentation_id: Option<String>,
    /// The full document text.
    pub content: String,
}

/// One generation in flight. The caller either consumes the raw event
/// stream or buffers it into a [`GeneratedDocument`].
///
/// Dropping the value cancels the fetch; no further events are delivered.
pub struct GenerationStream {
    stream: Pin<Box<dyn Stream<Item = Result<StreamEvent, Error>> + Send>>,
}

impl std::fmt::Debug for GenerationStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationStream").finish_non_exhaustive()
    }
}

impl GenerationStream {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<StreamEvent, Error>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Consume the generation as a raw event stream.
    pub fn stream(self) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, Error>> + Send>> {
        self.stream
    }

    /// Buffer the whole generation, accumulating content in arrival order.
    ///
    /// A `status: "error"` frame and a premature stream close both surface
    /// as errors; rate-limit advisories are informational and skipped.
    pub async fn collect(mut self) -> Result<GeneratedDocument, Error> {
        use futures_util::StreamExt;

        let mut accumulator = crate::accumulator::DocumentAccumulator::new();

        while let Some(event_result) = self.stream.next().await {
            let event = event_result?;
            let terminal = event.is_terminal();
            accumulator.process_event(event)?;
            if terminal {
                break;
            }
        }

        accumulator.finalize()
    }
}
