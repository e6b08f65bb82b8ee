// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ParseFailure;

/// Parses one line of text into a record.
pub type LineParser<T> = Box<dyn FnMut(&str) -> anyhow::Result<T> + Send>;

/// Receives every line the parser rejects.
pub type ErrorCallback = Box<dyn FnMut(&ParseFailure) + Send>;

/// Default read buffer for reader-backed sources.
pub const DEFAULT_READ_CAPACITY: usize = 8 * 1024;

/// What to do with records that parse to a falsy value.
///
/// - `Suppress`: drop `null`, `false`, `0`, `NaN` and `""` records silently.
///   They are not reported as failures either.
/// - `Publish`: publish every record that parses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FalsyPolicy {
    #[default]
    Suppress,
    Publish,
}

impl fmt::Display for FalsyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suppress => f.write_str("suppress"),
            Self::Publish => f.write_str("publish"),
        }
    }
}

impl std::str::FromStr for FalsyPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suppress" => Ok(Self::Suppress),
            "publish" => Ok(Self::Publish),
            other => anyhow::bail!("invalid falsy policy: {other}"),
        }
    }
}

/// Plain-data knobs, loadable from a host application's config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub falsy: FalsyPolicy,
    /// Read buffer size in bytes for `AsyncRead` / `Read` sources.
    pub read_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { falsy: FalsyPolicy::default(), read_capacity: DEFAULT_READ_CAPACITY }
    }
}

impl Settings {
    /// Read buffer size, never zero.
    pub fn capacity(&self) -> usize {
        self.read_capacity.max(1)
    }
}

/// Per-stream configuration: the line parser, an optional failure callback,
/// and [`Settings`].
pub struct ParserOptions<T> {
    pub(crate) parser: LineParser<T>,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) settings: Settings,
}

impl<T: DeserializeOwned> ParserOptions<T> {
    /// Parse each line with `serde_json`.
    pub fn json() -> Self {
        Self::with_parser(|line| Ok(serde_json::from_str(line)?))
    }
}

impl<T: DeserializeOwned> Default for ParserOptions<T> {
    fn default() -> Self {
        Self::json()
    }
}

impl<T> ParserOptions<T> {
    pub fn with_parser<F>(parser: F) -> Self
    where
        F: FnMut(&str) -> anyhow::Result<T> + Send + 'static,
    {
        Self { parser: Box::new(parser), on_error: None, settings: Settings::default() }
    }

    /// Replace the line parser.
    pub fn parser<F>(mut self, parser: F) -> Self
    where
        F: FnMut(&str) -> anyhow::Result<T> + Send + 'static,
    {
        self.parser = Box::new(parser);
        self
    }

    /// Called once per line the parser rejects. Without a callback those
    /// failures are dropped.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ParseFailure) + Send + 'static,
    {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn falsy(mut self, policy: FalsyPolicy) -> Self {
        self.settings.falsy = policy;
        self
    }

    pub fn read_capacity(mut self, capacity: usize) -> Self {
        self.settings.read_capacity = capacity;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl<T> fmt::Debug for ParserOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("on_error", &self.on_error.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
