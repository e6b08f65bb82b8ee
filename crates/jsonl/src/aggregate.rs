// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use futures_util::stream::{Stream, TryStreamExt};
use tracing::debug;

use crate::options::ParserOptions;
use crate::stream::JsonLineStream;
use crate::truthy::Truthy;

/// Drain a record stream into a `Vec`, in arrival order.
///
/// Fails with the first upstream error; parse failures never reach here.
pub async fn collect_json_lines<St, T, E>(stream: St) -> Result<Vec<T>, E>
where
    St: Stream<Item = Result<T, E>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut records = Vec::new();
    while let Some(record) = stream.try_next().await? {
        records.push(record);
    }
    debug!(count = records.len(), "json lines drained");
    Ok(records)
}

/// Parse a whole chunk source into a `Vec` of records.
pub async fn json_lines<S, B, E, T>(source: S, options: ParserOptions<T>) -> Result<Vec<T>, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    T: Truthy,
{
    collect_json_lines(JsonLineStream::with_options(source, options)).await
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
