// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::options::ParserOptions;
use crate::transform::LineTransform;
use crate::truthy::Truthy;

/// Blocking counterpart of [`JsonLineStream`](crate::JsonLineStream): an
/// iterator of records read from a `std::io::Read`.
pub struct JsonLinesReader<R, T> {
    reader: R,
    transform: LineTransform<T>,
    buf: Vec<u8>,
    done: bool,
}

impl<T: DeserializeOwned + Truthy> JsonLinesReader<File, T> {
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read, T: DeserializeOwned + Truthy> JsonLinesReader<R, T> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::json())
    }
}

impl<R: Read, T: Truthy> JsonLinesReader<R, T> {
    pub fn with_options(reader: R, options: ParserOptions<T>) -> Self {
        let buf = vec![0u8; options.settings().capacity()];
        Self { reader, transform: LineTransform::new(options), buf, done: false }
    }

    /// Consumes the iterator and returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read, T: Truthy> Iterator for JsonLinesReader<R, T> {
    type Item = io::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.transform.next_record() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    self.transform.finish();
                }
                Ok(n) => {
                    self.transform.on_chunk(&self.buf[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!(error = %e, "read failed, ending record iterator");
                    self.done = true;
                    self.transform.abort();
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "blocking_tests.rs"]
mod tests;
