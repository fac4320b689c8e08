// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::SnapshotError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The status of a single suite or test in a [`TestTreeSummary`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum TestNodeStatus {
    /// The node ran to completion and passed.
    Passed,

    /// The node ran to completion and one of its assertions failed.
    Failed,

    /// The node could not complete, for example because it panicked outside an assertion or
    /// timed out.
    Errored,

    /// The node was skipped.
    Ignored,

    /// The node is still executing.
    Running,

    /// The node was selected but hasn't started yet.
    NotRun,
}

impl TestNodeStatus {
    /// Returns true if this status counts as a failure of the node itself.
    ///
    /// A suite whose own status isn't a failure may still be defective through one of its
    /// descendants.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Errored)
    }

    /// Returns true if the node hasn't finished executing.
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// A snapshot of a suite or test, along with all of its descendants.
///
/// Children are kept in the order the host reports them in. That order is significant: it
/// determines the order in which failures are visited.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestTreeSummary {
    /// The name of this suite or test.
    pub name: SmolStr,

    /// The node's own status.
    pub status: TestNodeStatus,

    /// Child suites and tests, in host order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TestTreeSummary>,
}

impl TestTreeSummary {
    /// Creates a node with no children.
    pub fn leaf(name: impl Into<SmolStr>, status: TestNodeStatus) -> Self {
        Self {
            name: name.into(),
            status,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    pub fn suite(
        name: impl Into<SmolStr>,
        status: TestNodeStatus,
        children: Vec<TestTreeSummary>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            children,
        }
    }

    /// Parses a snapshot from its JSON representation.
    pub fn parse_json(json: impl AsRef<str>) -> Result<Self, SnapshotError> {
        serde_json::from_str(json.as_ref()).map_err(SnapshotError::Deserialize)
    }

    /// Serializes this snapshot to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Serialize)
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of nodes in this tree, including the root.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TestTreeSummary::node_count)
            .sum::<usize>()
    }
}

#[cfg(feature = "proptest1")]
mod proptest_impls {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for TestNodeStatus {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(Self::Passed),
                Just(Self::Failed),
                Just(Self::Errored),
                Just(Self::Ignored),
                Just(Self::Running),
                Just(Self::NotRun),
            ]
            .boxed()
        }
    }

    impl Arbitrary for TestTreeSummary {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            let leaf = ("[a-z_]{1,8}", any::<TestNodeStatus>())
                .prop_map(|(name, status)| TestTreeSummary::leaf(name, status));

            // Depth 4, at most 32 nodes, up to 4 children per suite.
            leaf.prop_recursive(4, 32, 4, |inner| {
                (
                    "[a-z_]{1,8}",
                    any::<TestNodeStatus>(),
                    prop::collection::vec(inner, 0..4),
                )
                    .prop_map(|(name, status, children)| {
                        TestTreeSummary::suite(name, status, children)
                    })
            })
            .boxed()
        }
    }
}
