// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change notifications for the failing set.
//!
//! Listeners registered with a [`ResultTracker`](crate::tracker::ResultTracker) are called
//! synchronously, in registration order, after every operation that changes the failing set.
//! Listeners must not call back into the tracker's mutating operations.

use crate::node::TestNode;
use debug_ignore::DebugIgnore;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::info;

/// Receives the tracker's state after every change.
///
/// Implemented for closures of the form `FnMut(bool, &[N])`.
pub trait TestStatusListener<N> {
    /// Called after the failing set changed.
    ///
    /// `has_failures` is true if and only if `failed_tests` is non-empty.
    fn on_test_status_changed(&mut self, has_failures: bool, failed_tests: &[N]);
}

impl<N, F> TestStatusListener<N> for F
where
    F: FnMut(bool, &[N]),
{
    fn on_test_status_changed(&mut self, has_failures: bool, failed_tests: &[N]) {
        self(has_failures, failed_tests)
    }
}

/// Identifies a registered listener, for use with
/// [`ResultTracker::unsubscribe`](crate::tracker::ResultTracker::unsubscribe).
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerId(u64);

/// The listeners registered with a tracker, in registration order.
#[derive(Debug)]
pub(crate) struct ListenerList<N> {
    next_id: u64,
    listeners: DebugIgnore<Vec<(ListenerId, Box<dyn TestStatusListener<N> + Send>)>>,
}

impl<N> ListenerList<N> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            listeners: DebugIgnore(Vec::new()),
        }
    }

    pub(crate) fn add(
        &mut self,
        listener: impl TestStatusListener<N> + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(&mut self, has_failures: bool, failed_tests: &[N]) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_test_status_changed(has_failures, failed_tests);
        }
    }
}

/// Tracks whether the most recent notification reported failures.
///
/// Hosts use this to decorate their UI, for example by highlighting a window border while any
/// test is failing. Register a clone with
/// [`ResultTracker::subscribe`](crate::tracker::ResultTracker::subscribe) and poll
/// [`has_failures`](Self::has_failures) from anywhere: all clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct FailureIndicator {
    has_failures: Arc<AtomicBool>,
}

impl FailureIndicator {
    /// Creates a new indicator in the "no failures" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the last notification reported failures.
    pub fn has_failures(&self) -> bool {
        self.has_failures.load(Ordering::Acquire)
    }
}

impl<N: TestNode> TestStatusListener<N> for FailureIndicator {
    fn on_test_status_changed(&mut self, has_failures: bool, failed_tests: &[N]) {
        let previous = self.has_failures.swap(has_failures, Ordering::AcqRel);
        match (previous, has_failures) {
            (false, true) => info!(
                failed = failed_tests.len(),
                "tests are failing, first failure: {}",
                failed_tests.first().map_or("<none>", |test| test.name()),
            ),
            (true, false) => info!("all tests passing"),
            _ => {}
        }
    }
}
