// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use camino_tempfile::tempdir;
use color_eyre::eyre::{Result, ensure};
use failnav_core::{
    config::{ConfigLocation, FailingSetScope, TrackerConfig},
    cursor::{CursorState, NavigationCursor},
    events::TrackerEvent,
    listener::FailureIndicator,
    locate::{Navigation, TreePathLocator},
    tracker::ResultTracker,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// `root(defect) -> [a(defect), b(defect, in progress), c(ok)]`.
fn defect_progress_ok() -> (HostNode, HostNode) {
    let a = HostNode::new("a", true, false, vec![]);
    let b = HostNode::new("b", true, true, vec![]);
    let c = HostNode::new("c", false, false, vec![]);
    let root = HostNode::new("root", true, false, vec![a.clone(), b, c]);
    (root, a)
}

#[test]
fn snapshot_then_cycle() -> Result<()> {
    test_init();

    let t1 = HostNode::new("t1", true, false, vec![]);
    let t2 = HostNode::new("t2", false, false, vec![]);
    let t3 = HostNode::new("t3", true, false, vec![]);
    let root = HostNode::new("root", true, false, vec![t1.clone(), t2, t3.clone()]);

    let mut tracker = ResultTracker::new();
    tracker.update_from_snapshot(&root);
    assert_eq!(tracker.failed_tests(), vec![root.clone(), t1.clone(), t3.clone()]);

    let mut cursor = NavigationCursor::new();
    let visited: Vec<_> = (0..4).filter_map(|_| cursor.select_next(&tracker)).collect();
    assert_eq!(names(&visited), vec!["root", "t1", "t3", "root"]);
    ensure!(
        cursor.state() == CursorState::Positioned(0),
        "cursor wrapped around to the first failure"
    );

    Ok(())
}

#[test]
fn in_progress_and_passing_nodes_are_excluded() {
    test_init();

    let (root, a) = defect_progress_ok();
    let mut tracker = ResultTracker::new();
    tracker.update_from_snapshot(&root);
    assert_eq!(tracker.failed_tests(), vec![root, a]);
}

#[test]
fn clear_is_idempotent() {
    test_init();

    let (root, _) = defect_progress_ok();
    let mut tracker = ResultTracker::new();
    tracker.clear_results();
    assert!(!tracker.has_failures());

    tracker.update_from_snapshot(&root);
    tracker.add_failed_test(&HostNode::new("late", true, false, vec![]));
    for _ in 0..2 {
        tracker.clear_results();
        assert!(!tracker.has_failures());
        assert!(tracker.failed_tests().is_empty());
    }
}

#[test]
fn manual_additions() {
    test_init();

    let x = HostNode::new("x", true, false, vec![]);
    let y = HostNode::new("y", false, false, vec![]);

    let mut tracker = ResultTracker::new();
    tracker.add_failed_test(&y);
    assert!(!tracker.has_failures(), "non-defective test is ignored");

    tracker.add_failed_test(&x);
    tracker.add_failed_test(&x);
    assert_eq!(tracker.failed_tests(), vec![x.clone()]);

    tracker.add_failed_test(&y);
    assert_eq!(tracker.failed_tests(), vec![x]);
}

#[test]
fn empty_tracker_never_advances() {
    test_init();

    let tracker = ResultTracker::<HostNode>::new();
    let mut cursor = NavigationCursor::new();
    for _ in 0..5 {
        assert_eq!(cursor.select_next(&tracker), None);
        assert_eq!(cursor.index(), None);
    }
}

#[test]
fn shrink_between_selections() {
    test_init();

    let t1 = HostNode::new("t1", true, false, vec![]);
    let t2 = HostNode::new("t2", true, false, vec![]);
    let t3 = HostNode::new("t3", true, false, vec![]);
    let root = HostNode::new("root", false, false, vec![t1.clone(), t2.clone(), t3.clone()]);

    let mut tracker = ResultTracker::new();
    for test in [&t1, &t2, &t3] {
        tracker.add_failed_test(test);
    }
    let mut cursor = NavigationCursor::new();
    for _ in 0..3 {
        cursor.select_next(&tracker);
    }

    // The rerun only reports t2 as failing.
    let rerun_t2 = HostNode::new("t2", true, false, vec![]);
    let rerun = HostNode::new("root", true, false, vec![rerun_t2.clone()]);
    tracker.update_from_snapshot(&rerun);
    assert_eq!(tracker.failed_tests().len(), 2);

    let selected = cursor.select_next(&tracker).expect("failures exist");
    assert_eq!(selected, rerun, "restarts at the first node of the new set");
    let selected = cursor.select_next(&tracker).expect("failures exist");
    assert_eq!(selected, rerun_t2);

    // The old tree is no longer tracked.
    let locator = TreePathLocator::new(root);
    match cursor.navigate_next(&tracker, &locator) {
        Navigation::Unlocated { node } => assert_eq!(node, rerun),
        other => panic!("old tree shouldn't contain the new node: {:?}", other.node()),
    }
}

#[test]
fn navigation_with_locator_and_indicator() {
    test_init();

    let deep = HostNode::new("deep", true, false, vec![]);
    let suite = HostNode::new("suite", true, false, vec![deep]);
    let root = HostNode::new("root", true, false, vec![suite]);

    let indicator = FailureIndicator::new();
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let mut tracker = ResultTracker::new();
    tracker.subscribe(indicator.clone());
    {
        let statuses = statuses.clone();
        tracker.subscribe(move |has_failures: bool, failed: &[HostNode]| {
            statuses.lock().unwrap().push((has_failures, failed.len()));
        });
    }

    tracker.handle_event(TrackerEvent::SuiteFinished(root.clone()));
    assert!(indicator.has_failures());
    assert!(NavigationCursor::is_enabled(&tracker));

    let locator = TreePathLocator::new(root);
    let mut cursor = NavigationCursor::new();
    let mut paths = Vec::new();
    for _ in 0..3 {
        match cursor.navigate_next(&tracker, &locator) {
            Navigation::Located { handle, .. } => paths.push(handle.to_string()),
            other => panic!("every failure is in the tree: {:?}", other.node()),
        }
    }
    assert_eq!(paths, vec!["root", "root > suite", "root > suite > deep"]);

    tracker.handle_event(TrackerEvent::SuiteFinished(HostNode::new(
        "root",
        false,
        false,
        vec![],
    )));
    assert!(!indicator.has_failures());
    assert!(!NavigationCursor::is_enabled(&tracker));
    assert_eq!(*statuses.lock().unwrap(), vec![(true, 3), (false, 0)]);
}

#[test]
fn config_file_controls_tracker() -> Result<()> {
    test_init();

    let temp_dir = tempdir()?;
    std::fs::write(
        temp_dir.path().join("failnav.toml"),
        indoc! {r#"
            [tracker]
            scope = "leaves-only"
            clear-on-run-start = true
        "#},
    )?;

    let config = TrackerConfig::from_location(ConfigLocation::Default(temp_dir.path()))?;
    assert_eq!(config.scope, FailingSetScope::LeavesOnly);

    let deep = HostNode::new("deep", true, false, vec![]);
    let suite = HostNode::new("suite", true, false, vec![deep.clone()]);
    let root = HostNode::new("root", true, false, vec![suite]);

    let mut tracker = ResultTracker::with_config(config);
    tracker.handle_event(TrackerEvent::SuiteFinished(root));
    assert_eq!(tracker.failed_tests(), vec![deep]);

    tracker.handle_event(TrackerEvent::RunStarted);
    ensure!(!tracker.has_failures(), "run start cleared failures");

    Ok(())
}
