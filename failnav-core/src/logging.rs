// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log output for hosts that don't install their own `tracing` subscriber.
//!
//! failnav logs through `tracing`. Hosts that already have a subscriber don't need anything from
//! this module; others can call [`init_logging`] once at startup.

use crate::errors::LogFilterError;
use std::sync::Once;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// The environment variable that controls log output, in `tracing` target syntax (for example,
/// `debug` or `failnav_core::cursor=trace`).
pub const LOG_ENV: &str = "FAILNAV_LOG";

static INIT_LOGGER: Once = Once::new();

/// Installs a global subscriber that writes to stderr, filtered by [`LOG_ENV`].
///
/// Defaults to the `info` level if [`LOG_ENV`] is unset or empty. Calling this more than once,
/// or after another global subscriber was installed, has no further effect.
pub fn init_logging() -> Result<(), LogFilterError> {
    let level_str = std::env::var(LOG_ENV).unwrap_or_default();
    let targets = parse_log_targets(&level_str)?;

    INIT_LOGGER.call_once(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(targets);

        // Ignore the error: it only means the host installed a subscriber first.
        let _ = tracing_subscriber::registry().with(layer).try_init();
    });

    Ok(())
}

/// Parses a log filter. An empty filter means `info` for every target.
pub fn parse_log_targets(level_str: &str) -> Result<Targets, LogFilterError> {
    if level_str.is_empty() {
        Ok(Targets::new().with_default(LevelFilter::INFO))
    } else {
        level_str
            .parse()
            .map_err(|error| LogFilterError::new(level_str, error))
    }
}
