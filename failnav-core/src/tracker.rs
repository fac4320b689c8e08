// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracking of the current set of failing tests.

use crate::{
    config::{FailingSetScope, TrackerConfig},
    events::TrackerEvent,
    listener::{ListenerId, ListenerList, TestStatusListener},
    node::{TestNode, all_tests},
};
use tracing::{debug, trace};

/// Owns the authoritative set of failing test nodes.
///
/// The failing set is ordered and duplicate-free. It is either replaced wholesale by
/// [`update_from_snapshot`](Self::update_from_snapshot), appended to by
/// [`add_failed_test`](Self::add_failed_test), or emptied by
/// [`clear_results`](Self::clear_results); it is never reordered.
///
/// A tracker lives for one session: create it when the session starts and drop it when the
/// session ends. Nothing is persisted.
#[derive(Debug)]
pub struct ResultTracker<N> {
    failed_tests: Vec<N>,
    has_failures: bool,
    config: TrackerConfig,
    listeners: ListenerList<N>,
}

impl<N: TestNode> ResultTracker<N> {
    /// Creates an empty tracker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Creates an empty tracker with the given configuration.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            failed_tests: Vec::new(),
            has_failures: false,
            config,
            listeners: ListenerList::new(),
        }
    }

    /// Returns the configuration this tracker was created with.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Replaces the failing set with the defective, not-in-progress nodes of the tree under
    /// `root`.
    ///
    /// Nodes are collected depth-first, children in their given order, with `root` itself
    /// considered first. With [`FailingSetScope::AllDefective`] suites are collected along with
    /// tests; with [`FailingSetScope::LeavesOnly`] only nodes without children are.
    pub fn update_from_snapshot(&mut self, root: &N) {
        self.failed_tests = if root.is_defect() {
            let scope = self.config.scope;
            all_tests(root)
                .filter(|node| node.is_defect() && !node.is_in_progress())
                .filter(|node| match scope {
                    FailingSetScope::AllDefective => true,
                    FailingSetScope::LeavesOnly => node.children().is_empty(),
                })
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        self.has_failures = !self.failed_tests.is_empty();

        debug!(
            failed = self.failed_tests.len(),
            "replaced failing set from snapshot of `{}`",
            root.name(),
        );
        self.notify();
    }

    /// Appends a single defective test to the failing set.
    ///
    /// Does nothing if `test` isn't defective, is still in progress, or is already in the failing
    /// set.
    pub fn add_failed_test(&mut self, test: &N) {
        if !test.is_defect() {
            trace!("ignoring non-defective test `{}`", test.name());
            return;
        }
        if test.is_in_progress() {
            trace!("ignoring in-progress test `{}`", test.name());
            return;
        }
        if self.failed_tests.iter().any(|failed| failed.same_node(test)) {
            trace!("test `{}` is already in the failing set", test.name());
            return;
        }

        self.failed_tests.push(test.clone());
        self.has_failures = true;

        debug!(
            failed = self.failed_tests.len(),
            "added `{}` to failing set",
            test.name(),
        );
        self.notify();
    }

    /// Empties the failing set.
    ///
    /// Listeners are notified on every call, even if the set was already empty.
    pub fn clear_results(&mut self) {
        self.failed_tests.clear();
        self.has_failures = false;

        debug!("cleared failing set");
        self.notify();
    }

    /// Applies an event from the host's test runner.
    pub fn handle_event(&mut self, event: TrackerEvent<N>) {
        trace!("handling {} event", event.kind_str());
        match event {
            TrackerEvent::RunStarted => {
                if self.config.clear_on_run_start {
                    self.clear_results();
                }
            }
            TrackerEvent::SuiteFinished(root) => self.update_from_snapshot(&root),
            TrackerEvent::TestFinished(test) => self.add_failed_test(&test),
        }
    }

    /// Returns a copy of the failing set, in order.
    pub fn failed_tests(&self) -> Vec<N> {
        self.failed_tests.clone()
    }

    /// Returns true if the failing set is non-empty.
    pub fn has_failures(&self) -> bool {
        self.has_failures
    }

    /// Registers a listener that is notified after every change to the failing set.
    pub fn subscribe(
        &mut self,
        listener: impl TestStatusListener<N> + Send + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregisters a listener. Returns false if it wasn't registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        self.listeners.notify(self.has_failures, &self.failed_tests);
    }
}

impl<N: TestNode> Default for ResultTracker<N> {
    fn default() -> Self {
        Self::new()
    }
}
