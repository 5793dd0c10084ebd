//! Stream adapter that turns a raw byte stream into `data: `-framed events.
//!
//! Frames are delimited by a blank line. Extraction happens on the byte
//! buffer, so a multi-byte UTF-8 sequence split across chunk boundaries is
//! only decoded once its frame is complete and is never corrupted.

use crate::Error;
use futures_util::{Stream, StreamExt};
use memchr::memmem;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Guard against a stream that never sends a frame separator.
const MAX_BUFFERED_BYTES: usize = 1_000_000;

const FRAME_SEPARATOR: &[u8] = b"\n\n";

/// One delimited unit of a streamed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Payload assembled from the frame's `data:` lines.
    pub data: String,
}

impl SseFrame {
    /// Parse a complete frame from its text form. Returns `None` when the
    /// frame carries no `data:` lines (comments, keep-alives).
    fn parse(frame_text: &str) -> Option<Self> {
        let mut data_lines = Vec::new();

        for line in frame_text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            if let Some((field, value)) = line.split_once(':') {
                if field == "data" {
                    data_lines.push(value.strip_prefix(' ').unwrap_or(value));
                }
                // Other SSE fields (event, id, retry) are not part of the
                // backend's framing and are ignored.
            }
        }

        if data_lines.is_empty() {
            return None;
        }

        Some(SseFrame {
            data: data_lines.join("\n"),
        })
    }
}

/// Adapter that buffers raw bytes and yields complete [`SseFrame`]s.
pub struct FrameStream<S> {
    inner: S,
    /// Bytes received but not yet assembled into a complete frame.
    buffer: Vec<u8>,
    /// Frames parsed and not yet yielded, in arrival order.
    ready: VecDeque<SseFrame>,
}

impl<S> FrameStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: Vec::new(),
            ready: VecDeque::new(),
        }
    }

    /// Extract every complete frame currently in the buffer.
    fn drain_complete_frames(&mut self) -> Result<(), Error> {
        let finder = memmem::Finder::new(FRAME_SEPARATOR);
        let mut start = 0;

        while let Some(pos) = finder.find(&self.buffer[start..]) {
            let frame_end = start + pos;
            let frame_text = std::str::from_utf8(&self.buffer[start..frame_end])
                .map_err(|e| Error::streaming(format!("invalid UTF-8 in frame: {e}")))?;

            if let Some(frame) = SseFrame::parse(frame_text) {
                self.ready.push_back(frame);
            }
            start = frame_end + FRAME_SEPARATOR.len();
        }

        if start > 0 {
            self.buffer.drain(..start);
        }
        Ok(())
    }

    /// Handle stream end: a trailing frame without the final blank line is
    /// still delivered.
    fn take_trailing_frame(&mut self) -> Option<SseFrame> {
        if self.buffer.is_empty() {
            return None;
        }
        let frame = std::str::from_utf8(&self.buffer)
            .ok()
            .and_then(|text| SseFrame::parse(text.trim()));
        self.buffer.clear();
        frame
    }
}

impl<S, E> Stream for FrameStream<S>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    type Item = Result<SseFrame, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Poll::Ready(Some(Ok(frame)));
            }

            let chunk = match ready!(self.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    return Poll::Ready(Some(Err(Error::transport(format!(
                        "stream read failed: {e}"
                    )))));
                }
                None => {
                    return Poll::Ready(self.take_trailing_frame().map(Ok));
                }
            };

            self.buffer.extend_from_slice(&chunk);
            if self.buffer.len() > MAX_BUFFERED_BYTES {
                self.buffer.clear();
                return Poll::Ready(Some(Err(Error::streaming(
                    "frame buffer exceeded maximum size",
                ))));
            }

            if let Err(e) = self.drain_complete_frames() {
                return Poll::Ready(Some(Err(e)));
            }
        }
    }
}

/// Extension trait to add frame parsing to byte streams.
pub trait FrameStreamExt: Stream {
    fn sse_frames(self) -> FrameStream<Self>
    where
        Self: Sized,
    {
        FrameStream::new(self)
    }
}

impl<S: Stream> FrameStreamExt for S {}
