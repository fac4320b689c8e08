// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning a selected node into something the host can navigate to.
//!
//! Hosts display test trees in their own widgets. Rather than reaching into those widgets, the
//! cursor asks a [`PathLocator`] supplied by the host for a handle to the selected node. A
//! locator that can't find the node returns `None`; the selection itself is unaffected.

use crate::node::TestNode;
use std::fmt;

/// Host capability: map a test node to a navigable handle.
pub trait PathLocator<N> {
    /// The handle type, for example a row in a tree widget.
    type Handle;

    /// Returns a handle to `node`, or `None` if it can't be found.
    fn locate(&self, node: &N) -> Option<Self::Handle>;
}

/// The outcome of [`NavigationCursor::navigate_next`](crate::cursor::NavigationCursor::navigate_next).
#[derive(Clone, Debug)]
pub enum Navigation<N, H> {
    /// There are no failing tests.
    NothingToNavigate,

    /// The next failing node was selected and located.
    Located {
        /// The selected node.
        node: N,

        /// The handle returned by the locator.
        handle: H,
    },

    /// The next failing node was selected, but the locator couldn't find it.
    Unlocated {
        /// The selected node.
        node: N,
    },
}

impl<N, H> Navigation<N, H> {
    /// Returns the selected node, if any.
    pub fn node(&self) -> Option<&N> {
        match self {
            Self::NothingToNavigate => None,
            Self::Located { node, .. } | Self::Unlocated { node } => Some(node),
        }
    }
}

/// The nodes from a tree's root down to a target node, inclusive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreePath<N> {
    // Never empty: the last element is the target.
    nodes: Vec<N>,
}

impl<N: TestNode> TreePath<N> {
    /// The nodes along the path, root first.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// The root of the path.
    pub fn root(&self) -> &N {
        &self.nodes[0]
    }

    /// The node this path leads to.
    pub fn target(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// The number of edges between the root and the target.
    pub fn depth(&self) -> usize {
        self.nodes.len() - 1
    }
}

impl<N: TestNode> fmt::Display for TreePath<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{}", node.name())?;
        }
        Ok(())
    }
}

/// A [`PathLocator`] that searches a test tree depth-first for the selected node.
///
/// Useful for hosts whose widgets address rows by their path from the root.
#[derive(Clone, Debug)]
pub struct TreePathLocator<N> {
    root: N,
}

impl<N: TestNode> TreePathLocator<N> {
    /// Creates a locator that searches the tree under `root`.
    pub fn new(root: N) -> Self {
        Self { root }
    }

    /// Replaces the tree to search, for example after a new run.
    pub fn set_root(&mut self, root: N) {
        self.root = root;
    }
}

impl<N: TestNode> PathLocator<N> for TreePathLocator<N> {
    type Handle = TreePath<N>;

    fn locate(&self, target: &N) -> Option<TreePath<N>> {
        let mut path: Vec<&N> = Vec::new();
        let mut stack = vec![(&self.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            // Drop the nodes of any subtree that was fully explored.
            path.truncate(depth);
            path.push(node);
            if node.same_node(target) {
                return Some(TreePath {
                    nodes: path.into_iter().cloned().collect(),
                });
            }
            stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }

        None
    }
}
