//! Heap-linked tree: every child pair is one exclusively owned allocation.

use tracing::instrument;

use crate::domain::error::DomainResult;
use crate::domain::tree::{BinaryTree, NodeBudget};

/// One vertex of a complete binary tree.
///
/// Children live in a single `Box` holding both subtrees, so a node has either
/// zero or exactly two children by construction.
#[derive(Debug)]
pub struct Node {
    value: u32,
    children: Option<Box<(Node, Node)>>,
}

impl Node {
    fn leaf() -> Self {
        Self {
            value: 0,
            children: None,
        }
    }

    fn make(depth: u32) -> Self {
        if depth == 0 {
            return Self::leaf();
        }
        Self {
            value: depth,
            children: Some(Box::new((Self::make(depth - 1), Self::make(depth - 1)))),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// `(left, right)` for an inner node, `None` for a leaf.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        self.children.as_deref().map(|(left, right)| (left, right))
    }

    fn check(&self) -> i64 {
        match self.children() {
            None => i64::from(self.value),
            Some((left, right)) => i64::from(self.value) + left.check() - right.check(),
        }
    }

    fn count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => 1 + left.count() + right.count(),
        }
    }
}

/// Complete binary tree of boxed nodes.
///
/// Allocation failure inside `Box::new` aborts the process through the global
/// allocator's error handler; the budget check in `build_within` runs first.
#[derive(Debug)]
pub struct BoxTree {
    root: Node,
}

impl BoxTree {
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl BinaryTree for BoxTree {
    #[instrument(level = "trace")]
    fn build_within(depth: u32, budget: NodeBudget) -> DomainResult<Self> {
        budget.admit(depth)?;
        Ok(Self {
            root: Node::make(depth),
        })
    }

    fn checksum(&self) -> i64 {
        self.root.check()
    }

    fn node_count(&self) -> usize {
        self.root.count()
    }

    fn depth(&self) -> u32 {
        self.root.value
    }
}
