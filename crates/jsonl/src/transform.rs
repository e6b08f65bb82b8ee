// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental line splitter and per-line record parser.
//!
//! Chunks are pushed in with [`LineTransform::on_chunk`]; the end of input is
//! signalled with [`LineTransform::finish`]. Parsed records queue up in
//! arrival order and are pulled out with [`LineTransform::next_record`].

use std::collections::vec_deque::{self, VecDeque};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::decode::Utf8Decoder;
use crate::error::ParseFailure;
use crate::options::{FalsyPolicy, ParserOptions, Settings};
use crate::truthy::Truthy;

/// Stateful newline-delimited JSON transform for a single stream.
///
/// Holds the UTF-8 decoder state and a carry buffer with the text after the
/// last `\n` seen. Between calls the carry holds at most one partial line.
pub struct LineTransform<T> {
    options: ParserOptions<T>,
    decoder: Utf8Decoder,
    carry: String,
    ready: VecDeque<T>,
    finished: bool,
}

impl<T: DeserializeOwned + Truthy> Default for LineTransform<T> {
    fn default() -> Self {
        Self::new(ParserOptions::json())
    }
}

impl<T: Truthy> LineTransform<T> {
    pub fn new(options: ParserOptions<T>) -> Self {
        Self {
            options,
            decoder: Utf8Decoder::new(),
            carry: String::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }

    /// Push one chunk of bytes. Returns how many records it queued.
    ///
    /// Chunks pushed after [`finish`](Self::finish) or [`abort`](Self::abort)
    /// are ignored.
    pub fn on_chunk(&mut self, chunk: &[u8]) -> usize {
        if self.finished {
            debug!(len = chunk.len(), "chunk after end of stream ignored");
            return 0;
        }

        let before = self.ready.len();
        // The carry never contains a delimiter, so only new text is scanned.
        let scan_from = self.carry.len();
        self.decoder.decode_into(chunk, &mut self.carry);

        let Some(last) = self.carry[scan_from..].rfind('\n').map(|i| scan_from + i) else {
            trace!(len = chunk.len(), carry = self.carry.len(), "chunk without delimiter");
            return 0;
        };

        let rest = self.carry.split_off(last + 1);
        let complete = std::mem::replace(&mut self.carry, rest);
        for line in complete[..last].split('\n') {
            self.publish(line);
        }

        let queued = self.ready.len() - before;
        trace!(len = chunk.len(), queued, carry = self.carry.len(), "chunk processed");
        queued
    }

    /// End of input. A non-empty carry is parsed as the final line.
    ///
    /// Returns how many records it queued. Calling it again is a no-op.
    pub fn finish(&mut self) -> usize {
        if self.finished {
            return 0;
        }
        self.finished = true;
        self.decoder.finish_into(&mut self.carry);
        if self.carry.is_empty() {
            return 0;
        }

        let before = self.ready.len();
        let line = std::mem::take(&mut self.carry);
        debug!(len = line.len(), "flushing final undelimited line");
        self.publish(&line);
        self.ready.len() - before
    }

    /// Upstream went away before end of input. The partial line in the carry
    /// cannot be completed and is discarded; queued records stay available.
    pub fn abort(&mut self) {
        if !self.carry.is_empty() {
            debug!(carry = self.carry.len(), "discarding partial line on abort");
        }
        self.finished = true;
        self.carry.clear();
        self.decoder.reset();
    }

    /// Push a chunk and take every record that is ready.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<T> {
        self.on_chunk(chunk);
        self.ready.drain(..).collect()
    }

    pub fn next_record(&mut self) -> Option<T> {
        self.ready.pop_front()
    }

    pub fn drain(&mut self) -> vec_deque::Drain<'_, T> {
        self.ready.drain(..)
    }

    /// Number of records queued and not yet taken.
    pub fn pending(&self) -> usize {
        self.ready.len()
    }

    /// Text carried over from the last chunk, waiting for its delimiter.
    pub fn carry(&self) -> &str {
        &self.carry
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn settings(&self) -> &Settings {
        &self.options.settings
    }

    fn publish(&mut self, line: &str) {
        match (self.options.parser)(line) {
            Ok(record) => {
                if self.options.settings.falsy == FalsyPolicy::Suppress && !record.is_truthy() {
                    trace!(len = line.len(), "falsy record suppressed");
                    return;
                }
                self.ready.push_back(record);
            }
            Err(error) => {
                debug!(len = line.len(), %error, "line failed to parse");
                if let Some(callback) = self.options.on_error.as_mut() {
                    callback(&ParseFailure::new(line, error));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
