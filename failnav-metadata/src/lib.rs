// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Serializable snapshots of hierarchical test results.
//!
//! A host that runs tests describes the outcome as a [`TestTreeSummary`]: a tree of suites and
//! tests, each with a [`TestNodeStatus`]. `failnav-core` consumes these snapshots to track which
//! tests are currently failing.
//!
//! With the `proptest1` feature, [`TestNodeStatus`] and [`TestTreeSummary`] implement
//! `proptest::arbitrary::Arbitrary`.

mod errors;
mod tree;

pub use errors::*;
pub use tree::*;
