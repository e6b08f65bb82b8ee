// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental JSON Lines decoding.
//!
//! Bytes arrive in chunks whose boundaries mean nothing; records are the
//! `\n`-delimited lines, each parsed on its own. A line that fails to parse
//! is reported to an optional callback and skipped, and a final line without
//! a trailing `\n` is still parsed once the input ends.
//!
//! - [`LineTransform`]: the push-based core (`on_chunk` / `finish`).
//! - [`JsonLineStream`]: lazy `Stream` of records over a chunk `Stream`.
//! - [`json_lines`] / [`collect_json_lines`]: drain everything into a `Vec`.
//! - [`from_async_read`] / [`open`]: sources backed by `AsyncRead` and files.
//! - [`JsonLinesReader`]: blocking `Iterator` over a `std::io::Read`.
//!
//! By default records that parse to a falsy value (`null`, `false`, `0`,
//! `NaN`, `""`) are dropped; see [`FalsyPolicy`].

pub mod aggregate;
pub mod blocking;
pub mod decode;
pub mod error;
pub mod options;
pub mod source;
pub mod stream;
pub mod transform;
pub mod truthy;

pub use aggregate::{collect_json_lines, json_lines};
pub use blocking::JsonLinesReader;
pub use error::ParseFailure;
pub use options::{FalsyPolicy, ParserOptions, Settings};
pub use source::{from_async_read, open, ReaderJsonLines};
pub use stream::{json_line_stream, JsonLineStream};
pub use transform::LineTransform;
pub use truthy::Truthy;
