// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_util::stream::{FusedStream, Stream};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::options::ParserOptions;
use crate::transform::LineTransform;
use crate::truthy::Truthy;

/// Lazy stream of records decoded from a stream of byte chunks.
///
/// Each poll hands out a queued record if there is one, and otherwise pulls
/// exactly one chunk from the source. When the source ends the carry is
/// flushed as a final line. An upstream error is yielded once and ends the
/// stream; whatever partial line was carried at that point is lost.
///
/// The stream is forward-only. Reading again needs a new source.
pub struct JsonLineStream<S, T> {
    source: Option<Pin<Box<S>>>,
    transform: LineTransform<T>,
}

// The source is boxed and the transform is never pinned.
impl<S, T> Unpin for JsonLineStream<S, T> {}

impl<S, T: DeserializeOwned + Truthy> JsonLineStream<S, T> {
    /// Parse `source` as JSON Lines with the default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParserOptions::json())
    }
}

impl<S, T: Truthy> JsonLineStream<S, T> {
    pub fn with_options(source: S, options: ParserOptions<T>) -> Self {
        Self { source: Some(Box::pin(source)), transform: LineTransform::new(options) }
    }

    pub fn transform(&self) -> &LineTransform<T> {
        &self.transform
    }
}

/// Shorthand for [`JsonLineStream::with_options`].
pub fn json_line_stream<S, T: Truthy>(
    source: S,
    options: ParserOptions<T>,
) -> JsonLineStream<S, T> {
    JsonLineStream::with_options(source, options)
}

impl<S, B, E, T> Stream for JsonLineStream<S, T>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    T: Truthy,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(record) = this.transform.next_record() {
                return Poll::Ready(Some(Ok(record)));
            }

            let Some(source) = this.source.as_mut() else {
                return Poll::Ready(None);
            };

            match ready!(source.as_mut().poll_next(cx)) {
                Some(Ok(chunk)) => {
                    this.transform.on_chunk(chunk.as_ref());
                }
                Some(Err(err)) => {
                    debug!("upstream failed, ending record stream");
                    this.source = None;
                    this.transform.abort();
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    this.source = None;
                    this.transform.finish();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.transform.pending();
        match self.source {
            Some(_) => (pending, None),
            None => (pending, Some(pending)),
        }
    }
}

impl<S, B, E, T> FusedStream for JsonLineStream<S, T>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    T: Truthy,
{
    fn is_terminated(&self) -> bool {
        self.source.is_none() && self.transform.pending() == 0
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
