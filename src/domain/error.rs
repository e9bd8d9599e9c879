//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree engine's resource limits.
/// There is no recovery path for any of them: the run is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("resource exhausted: tree of depth {depth} needs {nodes} nodes")]
    ResourceExhausted { depth: u32, nodes: usize },

    #[error("resource exhausted: node count of a depth {depth} tree overflows usize")]
    NodeCountOverflow { depth: u32 },

    #[error("depth {depth} out of range (limit {limit})")]
    DepthOutOfRange { depth: u32, limit: u32 },
}

impl DomainError {
    /// True for every variant that means the allocator could not be satisfied.
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            DomainError::ResourceExhausted { .. } | DomainError::NodeCountOverflow { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
