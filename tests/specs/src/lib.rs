// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness for end-to-end JSON Lines scenarios.
//!
//! Builds chunked byte sources (static, or fed by the test over a channel),
//! resolves on-disk fixtures, and records parse failures.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use jsonl_stream::ParserOptions;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

static TRACING_INIT: Once = Once::new();

/// Install a test subscriber. `RUST_LOG` overrides the default `warn` level.
/// Safe to call multiple times — only the first call has effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Resolve a file under `tests/specs/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// A source that yields the given chunks, then ends.
pub fn chunks(parts: &[&str]) -> impl Stream<Item = io::Result<Bytes>> {
    let items: Vec<io::Result<Bytes>> =
        parts.iter().map(|p| Ok(Bytes::copy_from_slice(p.as_bytes()))).collect();
    stream::iter(items)
}

/// Split `data` into chunks of `size` bytes, ignoring character boundaries.
pub fn byte_chunks(data: &[u8], size: usize) -> impl Stream<Item = io::Result<Bytes>> {
    let items: Vec<io::Result<Bytes>> =
        data.chunks(size.max(1)).map(|c| Ok(Bytes::copy_from_slice(c))).collect();
    stream::iter(items)
}

/// Write side of a source fed by the test while the consumer is running.
pub struct ChunkFeeder {
    tx: mpsc::Sender<io::Result<Bytes>>,
}

impl ChunkFeeder {
    pub async fn send(&self, chunk: &str) -> anyhow::Result<()> {
        self.tx
            .send(Ok(Bytes::copy_from_slice(chunk.as_bytes())))
            .await
            .map_err(|_| anyhow::anyhow!("consumer dropped"))
    }

    pub async fn fail(&self, err: io::Error) -> anyhow::Result<()> {
        self.tx.send(Err(err)).await.map_err(|_| anyhow::anyhow!("consumer dropped"))
    }

    /// End of stream.
    pub fn close(self) {}
}

pub fn feeder() -> (ChunkFeeder, ReceiverStream<io::Result<Bytes>>) {
    let (tx, rx) = mpsc::channel(4);
    (ChunkFeeder { tx }, ReceiverStream::new(rx))
}

/// Collects every line reported through `on_error`.
#[derive(Clone, Default)]
pub struct FailureLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON parser options that report failures into this log.
    pub fn options<T: DeserializeOwned>(&self) -> ParserOptions<T> {
        let lines = Arc::clone(&self.lines);
        ParserOptions::json().on_error(move |failure| {
            if let Ok(mut lines) = lines.lock() {
                lines.push(failure.line().to_owned());
            }
        })
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or_default()
    }
}
