// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test nodes: the tracker's read-only view of a host's test tree.
//!
//! The tracker never constructs or mutates nodes. It only needs the accessors on [`TestNode`],
//! plus a notion of identity: two handles to the same node compare equal through
//! [`TestNode::same_node`], while two structurally identical nodes from different runs do not.
//!
//! [`TestProxy`] is a ready-made implementation for hosts that describe their results as a
//! [`TestTreeSummary`].

use failnav_metadata::{TestNodeStatus, TestTreeSummary};
use smol_str::SmolStr;
use std::{fmt, sync::Arc};

/// A suite or test in a hierarchical test tree.
///
/// Implementors are expected to be cheap handles to host-owned nodes, so the tracker clones
/// them freely.
pub trait TestNode: Clone {
    /// The display name of this node.
    fn name(&self) -> &str;

    /// Returns true if this node or one of its descendants failed.
    fn is_defect(&self) -> bool;

    /// Returns true if this node hasn't finished executing.
    fn is_in_progress(&self) -> bool;

    /// The children of this node, in host order.
    fn children(&self) -> &[Self];

    /// Returns true if `self` and `other` refer to the same node.
    fn same_node(&self, other: &Self) -> bool;
}

/// Returns an iterator over `root` and all of its descendants, depth-first, visiting children in
/// their given order.
///
/// The host guarantees that its test tree is acyclic.
pub fn all_tests<N: TestNode>(root: &N) -> AllTests<'_, N> {
    AllTests { stack: vec![root] }
}

/// Pre-order iterator over a test tree.
///
/// Returned by [`all_tests`].
#[derive(Clone, Debug)]
pub struct AllTests<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: TestNode> Iterator for AllTests<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// A shared handle to an immutable node of a test tree.
///
/// Cloning a `TestProxy` produces another handle to the same node. Equality is identity: two
/// proxies are equal only if they are handles to the same node.
#[derive(Clone)]
pub struct TestProxy {
    inner: Arc<ProxyInner>,
}

struct ProxyInner {
    name: SmolStr,
    status: TestNodeStatus,
    // Computed once at construction, since children never change afterwards.
    is_defect: bool,
    children: Vec<TestProxy>,
}

impl TestProxy {
    /// Creates a test with no children.
    pub fn leaf(name: impl Into<SmolStr>, status: TestNodeStatus) -> Self {
        Self::suite(name, status, Vec::new())
    }

    /// Creates a suite with the given children.
    ///
    /// The suite is defective if its own status is a failure or if any child is defective.
    pub fn suite(
        name: impl Into<SmolStr>,
        status: TestNodeStatus,
        children: Vec<TestProxy>,
    ) -> Self {
        let is_defect = status.is_failure() || children.iter().any(|child| child.is_defect());
        Self {
            inner: Arc::new(ProxyInner {
                name: name.into(),
                status,
                is_defect,
                children,
            }),
        }
    }

    /// Builds a fresh tree of proxies from a snapshot.
    ///
    /// Every call produces new nodes, so proxies built from two snapshots never compare equal,
    /// even if the snapshots are identical.
    pub fn from_summary(summary: &TestTreeSummary) -> Self {
        let children = summary.children.iter().map(Self::from_summary).collect();
        Self::suite(summary.name.clone(), summary.status, children)
    }

    /// Converts this subtree back into a snapshot.
    pub fn to_summary(&self) -> TestTreeSummary {
        TestTreeSummary::suite(
            self.inner.name.clone(),
            self.inner.status,
            self.inner.children.iter().map(Self::to_summary).collect(),
        )
    }

    /// The node's own status, as reported by the host.
    pub fn status(&self) -> TestNodeStatus {
        self.inner.status
    }
}

impl TestNode for TestProxy {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn is_defect(&self) -> bool {
        self.inner.is_defect
    }

    fn is_in_progress(&self) -> bool {
        self.inner.status.is_in_progress()
    }

    fn children(&self) -> &[Self] {
        &self.inner.children
    }

    fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for TestProxy {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl Eq for TestProxy {}

impl fmt::Debug for TestProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestProxy")
            .field("name", &self.inner.name)
            .field("status", &self.inner.status)
            .field("is_defect", &self.inner.is_defect)
            .field("children", &self.inner.children.len())
            .finish()
    }
}
