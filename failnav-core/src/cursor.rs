// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cyclic navigation over the failing set.
//!
//! Repeatedly calling [`NavigationCursor::select_next`] visits every failing node exactly once
//! per cycle, in failing-set order, and then starts over. If the failing set changed since the
//! previous call, in content or in order, the cursor starts again from the first failure.

use crate::{
    locate::{Navigation, PathLocator},
    node::TestNode,
    tracker::ResultTracker,
};
use tracing::{debug, trace};

/// The state of a [`NavigationCursor`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CursorState {
    /// Nothing has been selected, or the failing set was empty on the last call.
    Empty,

    /// The node at this index of the last observed failing set was selected.
    Positioned(usize),
}

/// A wrap-around cursor into the failing set reported by a [`ResultTracker`].
#[derive(Clone, Debug)]
pub struct NavigationCursor<N> {
    state: CursorState,
    // The failing set that `state` indexes into.
    last_observed: Vec<N>,
}

impl<N: TestNode> NavigationCursor<N> {
    /// Creates a cursor in the [`Empty`](CursorState::Empty) state.
    pub fn new() -> Self {
        Self {
            state: CursorState::Empty,
            last_observed: Vec::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Returns the index of the last selected node, or `None` if nothing is selected.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            CursorState::Empty => None,
            CursorState::Positioned(index) => Some(index),
        }
    }

    /// Returns true if there is anything to navigate to.
    ///
    /// Hosts use this to enable or disable their "next failure" command.
    pub fn is_enabled(tracker: &ResultTracker<N>) -> bool {
        tracker.has_failures()
    }

    /// Selects the next failing node.
    ///
    /// Returns `None` if the tracker reports no failures. Otherwise, if the failing set is the
    /// same one the cursor last advanced over, moves one position forward, wrapping around at
    /// the end. If the set changed in any way, starts from its first node.
    pub fn select_next(&mut self, tracker: &ResultTracker<N>) -> Option<N> {
        self.advance(tracker.failed_tests())
    }

    /// Selects the next failing node like [`select_next`](Self::select_next), then asks
    /// `locator` for a handle to it.
    ///
    /// A node the locator can't find is still selected: the next call moves past it.
    pub fn navigate_next<L>(
        &mut self,
        tracker: &ResultTracker<N>,
        locator: &L,
    ) -> Navigation<N, L::Handle>
    where
        L: PathLocator<N>,
    {
        match self.select_next(tracker) {
            None => Navigation::NothingToNavigate,
            Some(node) => match locator.locate(&node) {
                Some(handle) => Navigation::Located { node, handle },
                None => {
                    debug!("selected `{}`, but the locator couldn't find it", node.name());
                    Navigation::Unlocated { node }
                }
            },
        }
    }

    /// Returns the cursor to the [`Empty`](CursorState::Empty) state.
    pub fn reset(&mut self) {
        self.state = CursorState::Empty;
        self.last_observed.clear();
    }

    fn advance(&mut self, failed_tests: Vec<N>) -> Option<N> {
        if failed_tests.is_empty() {
            self.reset();
            return None;
        }

        let index = match self.state {
            CursorState::Positioned(index) if self.is_last_observed(&failed_tests) => {
                (index + 1) % failed_tests.len()
            }
            CursorState::Positioned(_) => {
                debug!(
                    failed = failed_tests.len(),
                    "failing set changed, restarting from the first failure"
                );
                0
            }
            CursorState::Empty => 0,
        };

        let selected = failed_tests[index].clone();
        trace!(index, "selected `{}`", selected.name());
        self.state = CursorState::Positioned(index);
        self.last_observed = failed_tests;
        Some(selected)
    }

    fn is_last_observed(&self, failed_tests: &[N]) -> bool {
        self.last_observed.len() == failed_tests.len()
            && self
                .last_observed
                .iter()
                .zip(failed_tests)
                .all(|(a, b)| a.same_node(b))
    }
}

impl<N: TestNode> Default for NavigationCursor<N> {
    fn default() -> Self {
        Self::new()
    }
}
