// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test-status events delivered by the host.

/// An event from the host's test runner.
///
/// Hosts that push events rather than calling tracker operations directly pass these to
/// [`ResultTracker::handle_event`](crate::tracker::ResultTracker::handle_event).
#[derive(Clone, Debug)]
pub enum TrackerEvent<N> {
    /// A new test run started.
    ///
    /// Clears the previous run's failures if
    /// [`clear_on_run_start`](crate::config::TrackerConfig::clear_on_run_start) is set, and is
    /// otherwise ignored.
    RunStarted,

    /// A suite finished. Carries the root of the complete test tree, which replaces the failing
    /// set.
    SuiteFinished(N),

    /// A single test finished, and no full tree is available. A defective test is appended to
    /// the failing set.
    TestFinished(N),
}

impl<N> TrackerEvent<N> {
    /// A short name for this kind of event, used in logs.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::RunStarted => "run-started",
            Self::SuiteFinished(_) => "suite-finished",
            Self::TestFinished(_) => "test-finished",
        }
    }
}
