// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// A line the parser rejected, paired with the raw text it was given.
///
/// The line excludes the `\n` delimiter but keeps everything else verbatim,
/// including a trailing `\r`.
#[derive(Debug)]
pub struct ParseFailure {
    line: String,
    error: anyhow::Error,
}

impl ParseFailure {
    pub fn new(line: impl Into<String>, error: anyhow::Error) -> Self {
        Self { line: line.into(), error }
    }

    /// Raw line text handed to the parser.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Error returned by the parser.
    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub fn into_parts(self) -> (String, anyhow::Error) {
        (self.line, self.error)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse line ({} bytes): {}", self.line.len(), self.error)
    }
}

impl std::error::Error for ParseFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
