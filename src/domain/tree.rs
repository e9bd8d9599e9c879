//! The tree engine contract shared by every tree representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Number of nodes in a complete binary tree of `depth`: `2^(depth+1) - 1`.
///
/// Returns `None` when the count does not fit in `usize`.
pub fn nodes_for_depth(depth: u32) -> Option<usize> {
    let shift = depth.checked_add(1)?;
    if shift >= usize::BITS {
        return None;
    }
    Some((1usize << shift) - 1)
}

/// Upper bound on the nodes a single tree may allocate.
///
/// The unlimited budget still rejects trees whose node count overflows `usize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeBudget {
    max_nodes: Option<usize>,
}

impl NodeBudget {
    pub fn unlimited() -> Self {
        Self { max_nodes: None }
    }

    pub fn limited(max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }

    /// Validate that a tree of `depth` fits, returning its node count.
    pub fn admit(&self, depth: u32) -> DomainResult<usize> {
        let nodes = nodes_for_depth(depth).ok_or(DomainError::NodeCountOverflow { depth })?;
        match self.max_nodes {
            Some(max) if nodes > max => Err(DomainError::ResourceExhausted { depth, nodes }),
            _ => Ok(nodes),
        }
    }
}

/// A complete binary tree whose node labels equal their depth.
///
/// Implementors own every node exclusively; `release` consumes the tree so a
/// second release cannot be expressed.
pub trait BinaryTree: Sized {
    /// Build a tree of `depth` within `budget`.
    fn build_within(depth: u32, budget: NodeBudget) -> DomainResult<Self>;

    /// Build a tree of `depth`; only node count overflow is rejected.
    fn build(depth: u32) -> DomainResult<Self> {
        Self::build_within(depth, NodeBudget::unlimited())
    }

    /// `value` for a leaf, `value + checksum(left) - checksum(right)` otherwise.
    fn checksum(&self) -> i64;

    fn node_count(&self) -> usize;

    /// Label of the root, which is the depth the tree was built with.
    fn depth(&self) -> u32;

    /// Destroy every node. Consuming `self` rules out a second release:
    ///
    /// ```compile_fail
    /// use rsbench::domain::{BinaryTree, BoxTree};
    ///
    /// let tree = BoxTree::build(2).unwrap();
    /// tree.release();
    /// tree.release();
    /// ```
    fn release(self) {
        drop(self)
    }
}

/// Selects the tree representation used by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    /// One heap allocation per child pair
    #[default]
    Boxed,
    /// One contiguous block per tree, children addressed by offset
    Arena,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Boxed => write!(f, "boxed"),
            TreeKind::Arena => write!(f, "arena"),
        }
    }
}

impl FromStr for TreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boxed" | "box" => Ok(TreeKind::Boxed),
            "arena" => Ok(TreeKind::Arena),
            other => Err(format!("unknown tree kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 3)]
    #[case(4, 31)]
    #[case(10, 2047)]
    fn nodes_for_depth_matches_closed_form(#[case] depth: u32, #[case] expected: usize) {
        assert_eq!(nodes_for_depth(depth), Some(expected));
    }

    #[test]
    fn nodes_for_depth_overflows_at_word_size() {
        assert!(nodes_for_depth(usize::BITS - 2).is_some());
        assert_eq!(nodes_for_depth(usize::BITS - 1), None);
        assert_eq!(nodes_for_depth(u32::MAX), None);
    }

    #[test]
    fn limited_budget_rejects_large_trees() {
        let budget = NodeBudget::limited(100);
        assert_eq!(budget.admit(5), Ok(63));
        assert_eq!(
            budget.admit(6),
            Err(DomainError::ResourceExhausted {
                depth: 6,
                nodes: 127
            })
        );
    }

    #[test]
    fn tree_kind_parses_case_insensitively() {
        assert_eq!("Arena".parse::<TreeKind>(), Ok(TreeKind::Arena));
        assert_eq!(" boxed ".parse::<TreeKind>(), Ok(TreeKind::Boxed));
        assert!("slab".parse::<TreeKind>().is_err());
    }
}
