// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use encoding_rs::{CoderResult, Decoder, UTF_8};
use tracing::trace;

/// Incremental UTF-8 decoder.
///
/// A multi-byte character split across two chunks is held back until the
/// rest of its bytes arrive. Malformed sequences decode to U+FFFD instead of
/// failing, so a corrupt byte only ever damages the line it sits in. A UTF-8
/// byte order mark at the very start of the input is dropped.
pub struct Utf8Decoder {
    inner: Decoder,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Decoder {
    pub fn new() -> Self {
        // Only the UTF-8 BOM is removed; a UTF-16 BOM must not switch encodings.
        Self { inner: UTF_8.new_decoder_with_bom_removal() }
    }

    /// Decode `chunk` and append the text to `out`.
    ///
    /// A trailing incomplete sequence is kept for the next call.
    pub fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        self.decode(chunk, out, false);
    }

    /// End of input: an unfinished sequence becomes a single U+FFFD.
    ///
    /// The decoder starts over afterwards.
    pub fn finish_into(&mut self, out: &mut String) {
        self.decode(&[], out, true);
        self.reset();
    }

    /// Drop any held-back bytes without emitting them.
    pub fn reset(&mut self) {
        self.inner = UTF_8.new_decoder_with_bom_removal();
    }

    fn decode(&mut self, mut src: &[u8], out: &mut String, last: bool) {
        loop {
            let needed = self
                .inner
                .max_utf8_buffer_length(src.len())
                .unwrap_or_else(|| src.len().saturating_add(4));
            out.reserve(needed);

            let (result, read, replaced) = self.inner.decode_to_string(src, out, last);
            if replaced {
                trace!(read, "replaced malformed UTF-8");
            }
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => return,
                CoderResult::OutputFull => continue,
            }
        }
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
