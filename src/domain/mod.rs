//! Domain layer: the tree allocator/checksum engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod boxed;
pub mod error;
pub mod plan;
pub mod render;
pub mod residency;
pub mod tree;

pub use arena::{ArenaNode, TreeArena};
pub use boxed::{BoxTree, Node};
pub use error::{DomainError, DomainResult};
pub use plan::{Batch, DepthPlan, DEFAULT_MIN_DEPTH, DEPTH_LIMIT};
pub use render::TreeRender;
pub use residency::{Resident, Residency};
pub use tree::{nodes_for_depth, BinaryTree, NodeBudget, TreeKind};
