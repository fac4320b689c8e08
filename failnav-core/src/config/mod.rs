// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for failnav.
//!
//! Configuration is read from a `failnav.toml` file, typically placed next to the host's own
//! settings. Every key is optional: anything not specified falls back to the defaults embedded
//! in the crate (see `default-config.toml`).
//!
//! ```toml
//! [tracker]
//! scope = "leaves-only"
//! clear-on-run-start = true
//! ```
//!
//! Unknown keys are ignored with a warning.

mod imp;

pub use imp::*;
