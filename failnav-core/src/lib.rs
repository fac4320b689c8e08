// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Failed-test tracking and cyclic navigation.
//!
//! A host feeds the outcome of a hierarchical test run into a
//! [`ResultTracker`](tracker::ResultTracker), which maintains the ordered set of failing nodes. A
//! [`NavigationCursor`](cursor::NavigationCursor) then walks that set one node at a time,
//! wrapping around at the end, so that "go to next failure" can be pressed repeatedly.
//!
//! The tracker and cursor are plain owned values: a host creates them when a session starts,
//! drops them when it ends, and wraps them in a [`SharedSession`](session::SharedSession) if
//! several threads report results.

pub mod config;
pub mod cursor;
pub mod errors;
pub mod events;
pub mod listener;
pub mod locate;
pub mod logging;
pub mod node;
pub mod session;
#[cfg(test)]
mod test_helpers;
pub mod tracker;
