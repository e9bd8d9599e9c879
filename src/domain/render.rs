/*
Rendering of small trees for inspection.

Both representations expose different child handles (references vs. offsets),
so each gets its own implementation of the shared trait.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::boxed::{BoxTree, Node};

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeRender for BoxTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(node: &Node) -> Tree<String> {
            let leaves: Vec<_> = node
                .children()
                .map(|(left, right)| vec![build_tree(left), build_tree(right)])
                .unwrap_or_default();
            Tree::new(node.value().to_string()).with_leaves(leaves)
        }

        build_tree(self.root())
    }
}

impl TreeRender for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &TreeArena, node_idx: usize, parent_tree: &mut Tree<String>) {
            if let Some((left, right)) = arena.get_node(node_idx).and_then(|n| n.children()) {
                for child_idx in [left, right] {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.value().to_string());
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.get_node(TreeArena::ROOT) {
            Some(root) => {
                let mut tree = Tree::new(root.value().to_string());
                build_tree(self, TreeArena::ROOT, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::BinaryTree;

    #[test]
    fn both_representations_render_identically() {
        let boxed = BoxTree::build(2).unwrap().to_tree_string().to_string();
        let arena = TreeArena::build(2).unwrap().to_tree_string().to_string();
        assert_eq!(boxed, arena);
        assert_eq!(boxed.lines().count(), 7);
        assert!(boxed.starts_with("2\n"));
    }
}
