// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte sources backed by `AsyncRead`.

use std::path::Path;

use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::options::ParserOptions;
use crate::stream::JsonLineStream;
use crate::truthy::Truthy;

/// Record stream over an `AsyncRead`.
pub type ReaderJsonLines<R, T> = JsonLineStream<ReaderStream<R>, T>;

/// Read JSON Lines from any `AsyncRead`, in reads of at most
/// `options.settings().capacity()` bytes.
pub fn from_async_read<R, T>(reader: R, options: ParserOptions<T>) -> ReaderJsonLines<R, T>
where
    R: AsyncRead,
    T: Truthy,
{
    let capacity = options.settings().capacity();
    JsonLineStream::with_options(ReaderStream::with_capacity(reader, capacity), options)
}

/// Open a JSON Lines file.
pub async fn open<T: Truthy>(
    path: impl AsRef<Path>,
    options: ParserOptions<T>,
) -> std::io::Result<ReaderJsonLines<tokio::fs::File, T>> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    debug!(path = %path.display(), "opened json lines file");
    Ok(from_async_read(file, options))
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
