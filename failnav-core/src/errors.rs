// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by failnav.
//!
//! Tracking and navigation are total and never fail. Errors only arise at the edges: loading
//! configuration and setting up logging.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that occurred while loading failnav configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file at `{path}`")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The config file is not valid TOML, or has invalid values.
    #[error("failed to parse config file at `{path}`")]
    Parse {
        /// The path that failed to be parsed.
        path: Utf8PathBuf,

        /// The underlying TOML error.
        #[source]
        error: toml::de::Error,
    },

    /// An explicitly specified config file does not exist.
    #[error("config file not found at `{path}`")]
    FileNotFound {
        /// The path that was looked up.
        path: Utf8PathBuf,
    },
}

/// An error that occurred while parsing the log filter in `FAILNAV_LOG`.
#[derive(Debug, Error)]
#[error("invalid log filter `{value}`")]
pub struct LogFilterError {
    value: String,
    #[source]
    error: tracing_subscriber::filter::ParseError,
}

impl LogFilterError {
    pub(crate) fn new(
        value: impl Into<String>,
        error: tracing_subscriber::filter::ParseError,
    ) -> Self {
        Self {
            value: value.into(),
            error,
        }
    }

    /// The filter string that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}
