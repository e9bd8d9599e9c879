//! Application layer: benchmark drivers
//!
//! This layer orchestrates the domain engine and owns the I/O boundary.

pub mod binary_trees;
pub mod error;
pub mod error_ext;
pub mod regex_redux;

pub use binary_trees::{BinaryTreesRunner, Phase, PhaseStats, ReportLine, RunOptions, RunSummary};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use regex_redux::{read_input, RegexRedux, RegexReport};
