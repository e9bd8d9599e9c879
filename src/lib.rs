//! rsbench: language benchmark programs
//!
//! - `binary-trees`: builds, checks and releases complete binary trees to
//!   stress allocator throughput and peak residency
//! - `regex-redux`: DNA variant counting and substitution over the `regex` crate
//!
//! # Architecture
//!
//! - `domain`: tree engine (representations, budget, depth plan, residency)
//! - `application`: benchmark drivers and the I/O boundary
//! - `cli`: argument parsing, dispatch, terminal output
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
