// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A tracker and cursor shared between threads.
//!
//! Hosts whose test-status events can arrive while a navigation request is being handled wrap
//! both in a [`SharedSession`]. Each operation takes one lock for its whole duration, which is
//! enough since every operation is short and synchronous.

use crate::{
    config::TrackerConfig,
    cursor::NavigationCursor,
    events::TrackerEvent,
    listener::{ListenerId, TestStatusListener},
    locate::{Navigation, PathLocator},
    node::TestNode,
    tracker::ResultTracker,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`ResultTracker`] and [`NavigationCursor`] behind a single mutex.
///
/// Cloning a session produces another handle to the same state.
///
/// Listeners are called while the lock is held. They must not call back into the session, or
/// they will deadlock.
#[derive(Debug)]
pub struct SharedSession<N> {
    inner: Arc<Mutex<SessionState<N>>>,
}

#[derive(Debug)]
struct SessionState<N> {
    tracker: ResultTracker<N>,
    cursor: NavigationCursor<N>,
}

impl<N: TestNode> SharedSession<N> {
    /// Starts a session with the given tracker configuration.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                tracker: ResultTracker::with_config(config),
                cursor: NavigationCursor::new(),
            })),
        }
    }

    /// See [`ResultTracker::update_from_snapshot`].
    pub fn update_from_snapshot(&self, root: &N) {
        self.lock().tracker.update_from_snapshot(root);
    }

    /// See [`ResultTracker::add_failed_test`].
    pub fn add_failed_test(&self, test: &N) {
        self.lock().tracker.add_failed_test(test);
    }

    /// See [`ResultTracker::clear_results`].
    pub fn clear_results(&self) {
        self.lock().tracker.clear_results();
    }

    /// See [`ResultTracker::handle_event`].
    pub fn handle_event(&self, event: TrackerEvent<N>) {
        self.lock().tracker.handle_event(event);
    }

    /// See [`ResultTracker::failed_tests`].
    pub fn failed_tests(&self) -> Vec<N> {
        self.lock().tracker.failed_tests()
    }

    /// See [`ResultTracker::has_failures`].
    pub fn has_failures(&self) -> bool {
        self.lock().tracker.has_failures()
    }

    /// See [`ResultTracker::subscribe`].
    pub fn subscribe(
        &self,
        listener: impl TestStatusListener<N> + Send + 'static,
    ) -> ListenerId {
        self.lock().tracker.subscribe(listener)
    }

    /// See [`ResultTracker::unsubscribe`].
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.lock().tracker.unsubscribe(id)
    }

    /// See [`NavigationCursor::select_next`].
    pub fn select_next(&self) -> Option<N> {
        let mut state = self.lock();
        let SessionState { tracker, cursor } = &mut *state;
        cursor.select_next(tracker)
    }

    /// See [`NavigationCursor::navigate_next`].
    ///
    /// The locator runs while the lock is held.
    pub fn navigate_next<L>(&self, locator: &L) -> Navigation<N, L::Handle>
    where
        L: PathLocator<N>,
    {
        let mut state = self.lock();
        let SessionState { tracker, cursor } = &mut *state;
        cursor.navigate_next(tracker, locator)
    }

    /// See [`NavigationCursor::is_enabled`].
    pub fn is_navigation_enabled(&self) -> bool {
        NavigationCursor::is_enabled(&self.lock().tracker)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState<N>> {
        // A panicking listener poisons the lock, but every operation finishes updating state
        // before notifying, so the state behind a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N> Clone for SharedSession<N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<N: TestNode> Default for SharedSession<N> {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
