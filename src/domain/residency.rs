//! Live-node accounting.
//!
//! Peak concurrent residency is the property the binary-trees benchmark
//! actually stresses. Trees held through a [`Residency`] add their node count
//! on acquisition and subtract it when the [`Resident`] guard is released or
//! dropped, so the ordering of phases becomes observable without measuring
//! bytes.

use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::tree::BinaryTree;

#[derive(Debug, Default)]
pub struct Residency {
    live: AtomicUsize,
    peak: AtomicUsize,
}

impl Residency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `tree` and count its nodes as live.
    pub fn hold<T: BinaryTree>(&self, tree: T) -> Resident<'_, T> {
        let nodes = tree.node_count();
        let live = self.live.fetch_add(nodes, Ordering::SeqCst) + nodes;
        self.peak.fetch_max(live, Ordering::SeqCst);
        Resident {
            tree: ManuallyDrop::new(tree),
            nodes,
            residency: self,
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Start a new measurement window: returns the peak of the window that
    /// just ended and lowers the peak to the current live count.
    pub fn take_peak(&self) -> usize {
        self.peak.swap(self.live(), Ordering::SeqCst)
    }

    fn forget(&self, nodes: usize) {
        self.live.fetch_sub(nodes, Ordering::SeqCst);
    }
}

/// A tree whose nodes are counted as live until the guard goes away.
#[derive(Debug)]
pub struct Resident<'a, T: BinaryTree> {
    tree: ManuallyDrop<T>,
    nodes: usize,
    residency: &'a Residency,
}

impl<T: BinaryTree> Resident<'_, T> {
    /// Destroy the tree through [`BinaryTree::release`] and stop counting
    /// its nodes. Consumes the guard, so a tree is released once:
    ///
    /// ```
    /// use rsbench::domain::{BinaryTree, BoxTree, Residency};
    ///
    /// let residency = Residency::new();
    /// let held = residency.hold(BoxTree::build(2).unwrap());
    /// held.release();
    /// assert_eq!(residency.live(), 0);
    /// ```
    ///
    /// ```compile_fail
    /// use rsbench::domain::{BinaryTree, BoxTree, Residency};
    ///
    /// let residency = Residency::new();
    /// let held = residency.hold(BoxTree::build(2).unwrap());
    /// held.release();
    /// held.release();
    /// ```
    pub fn release(self) {}
}

impl<T: BinaryTree> Deref for Resident<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.tree
    }
}

impl<T: BinaryTree> Drop for Resident<'_, T> {
    fn drop(&mut self) {
        // SAFETY: `tree` is taken exactly once, here, and never touched again.
        let tree = unsafe { ManuallyDrop::take(&mut self.tree) };
        tree.release();
        self.residency.forget(self.nodes);
    }
}
