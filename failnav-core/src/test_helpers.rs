// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::node::TestNode;
use std::sync::Arc;

/// A test node with explicitly set flags.
///
/// Unlike [`TestProxy`](crate::node::TestProxy), nothing is derived from a status: a node can be
/// defective and in progress at the same time, as hosts sometimes report for a test that failed
/// an assertion but hasn't returned yet.
#[derive(Clone, Debug)]
pub(crate) struct FakeNode {
    inner: Arc<FakeInner>,
}

#[derive(Debug)]
struct FakeInner {
    name: &'static str,
    is_defect: bool,
    is_in_progress: bool,
    children: Vec<FakeNode>,
}

impl FakeNode {
    pub(crate) fn leaf(name: &'static str, is_defect: bool, is_in_progress: bool) -> Self {
        Self::suite(name, is_defect, is_in_progress, Vec::new())
    }

    pub(crate) fn suite(
        name: &'static str,
        is_defect: bool,
        is_in_progress: bool,
        children: Vec<FakeNode>,
    ) -> Self {
        Self {
            inner: Arc::new(FakeInner {
                name,
                is_defect,
                is_in_progress,
                children,
            }),
        }
    }
}

impl TestNode for FakeNode {
    fn name(&self) -> &str {
        self.inner.name
    }

    fn is_defect(&self) -> bool {
        self.inner.is_defect
    }

    fn is_in_progress(&self) -> bool {
        self.inner.is_in_progress
    }

    fn children(&self) -> &[Self] {
        &self.inner.children
    }

    fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for FakeNode {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl Eq for FakeNode {}

/// `root(defect) -> [a(defect), b(defect, in progress), c(ok)]`.
pub(crate) fn mixed_tree() -> (FakeNode, FakeNode, FakeNode, FakeNode) {
    let a = FakeNode::leaf("a", true, false);
    let b = FakeNode::leaf("b", true, true);
    let c = FakeNode::leaf("c", false, false);
    let root = FakeNode::suite("root", true, false, vec![a.clone(), b.clone(), c.clone()]);
    (root, a, b, c)
}

/// `root(defect) -> [t1(defect), t2(ok), t3(defect)]`.
pub(crate) fn three_failures() -> (FakeNode, FakeNode, FakeNode) {
    let t1 = FakeNode::leaf("t1", true, false);
    let t2 = FakeNode::leaf("t2", false, false);
    let t3 = FakeNode::leaf("t3", true, false);
    let root = FakeNode::suite("root", true, false, vec![t1.clone(), t2, t3.clone()]);
    (root, t1, t3)
}

pub(crate) fn names<N: TestNode>(tests: &[N]) -> Vec<&str> {
    tests.iter().map(|test| test.name()).collect()
}
