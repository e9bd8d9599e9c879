use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{BinaryTree, NodeBudget};

/// Node stored inside a [`TreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaNode {
    /// Depth label assigned at construction
    value: u32,
    /// Offsets of the left and right child, None for leaves
    children: Option<(usize, usize)>,
}

impl ArenaNode {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn children(&self) -> Option<(usize, usize)> {
        self.children
    }
}

/// Complete binary tree stored in one pre-sized contiguous block.
///
/// Nodes are laid out in pre-order, so the root sits at offset 0 and every
/// subtree occupies a contiguous range. The block is reserved with a fallible
/// reservation; exhaustion surfaces as [`DomainError::ResourceExhausted`].
#[derive(Debug)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
}

impl TreeArena {
    pub const ROOT: usize = 0;

    pub fn get_node(&self, idx: usize) -> Option<&ArenaNode> {
        self.nodes.get(idx)
    }

    fn fill(nodes: &mut Vec<ArenaNode>, depth: u32) -> usize {
        let idx = nodes.len();
        nodes.push(ArenaNode {
            value: depth,
            children: None,
        });
        if depth > 0 {
            let left = Self::fill(nodes, depth - 1);
            let right = Self::fill(nodes, depth - 1);
            nodes[idx].children = Some((left, right));
        }
        idx
    }

    fn check(&self, idx: usize) -> i64 {
        let node = &self.nodes[idx];
        match node.children {
            None => i64::from(node.value),
            Some((left, right)) => i64::from(node.value) + self.check(left) - self.check(right),
        }
    }
}

impl BinaryTree for TreeArena {
    #[instrument(level = "trace")]
    fn build_within(depth: u32, budget: NodeBudget) -> DomainResult<Self> {
        let count = budget.admit(depth)?;
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(count)
            .map_err(|_| DomainError::ResourceExhausted {
                depth,
                nodes: count,
            })?;
        Self::fill(&mut nodes, depth);
        Ok(Self { nodes })
    }

    fn checksum(&self) -> i64 {
        self.check(Self::ROOT)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn depth(&self) -> u32 {
        self.nodes[Self::ROOT].value
    }
}
