//! Events emitted while a generation stream is being consumed.

use serde::Deserialize;

/// Events that can be emitted during a documentation generation stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A chunk of document text to append, in arrival order.
    Content { text: String },
    /// Advisory only: the backend hit a rate limit and suggests waiting.
    /// The stream continues; retrying is the caller's decision.
    RateLimited {
        message: String,
        retry_after_secs: u64,
    },
    /// Terminal: the document is complete.
    Completed { documentation_id: Option<String> },
    /// Terminal: the backend reported a failure, surfaced verbatim.
    Error { message: String },
}

impl StreamEvent {
    /// Whether no further frames are expected after this event.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamEvent::Completed { .. } | StreamEvent::Error { .. }
        )
    }
}

/// A control frame as the backend encodes it: JSON with a `status`
/// discriminator. Payloads that do not parse into this shape are
/// literal document content.
#[derive(Debug, Deserialize)]
struct ControlFrame {
    status: String,
    message: Option<String>,
    retry_after: Option<u64>,
    documentation_id: Option<String>,
}

/// Classify one frame payload into a [`StreamEvent`].
///
/// Returns `None` for informational lifecycle statuses (e.g. `starting`)
/// that carry no document content and have no event mapping.
pub fn classify_frame(payload: &str) -> Option<StreamEvent> {
    let Ok(frame) = serde_json::from_str::<ControlFrame>(payload) else {
        return Some(StreamEvent::Content {
            text: payload.to_string(),
        });
    };

    match frame.status.as_str() {
        "completed" => Some(StreamEvent::Completed {
            documentation_id: frame.documentation_id,
        }),
        "error" => Some(StreamEvent::Error {
            message: frame.message.unwrap_or_else(|| "unknown error".to_string()),
        }),
        "rate_limit" => Some(StreamEvent::RateLimited {
            message: frame
                .message
                .unwrap_or_else(|| "rate limit exceeded".to_string()),
            retry_after_secs: frame.retry_after.unwrap_or(60),
        }),
        _ => None,
    }
}
