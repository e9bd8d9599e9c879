//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::domain::TreeKind;

/// Language benchmark programs: binary-trees allocation stress and regex-redux
#[derive(Parser, Debug)]
#[command(name = "rsbench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Report elapsed wall time on stderr
    #[arg(long, global = true)]
    pub time: bool,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "RSBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Runs binary-trees with configured defaults when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate, check and release complete binary trees
    BinaryTrees(BinaryTreesArgs),

    /// Count DNA variants and apply IUB substitutions
    RegexRedux {
        /// FASTA input (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Count variants in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// Print one small tree with its labels and checksum
    Tree {
        /// Tree depth (at most 6)
        depth: u32,
        /// Tree representation
        #[arg(short, long, value_enum)]
        kind: Option<TreeKind>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct BinaryTreesArgs {
    /// Benchmark parameter: max depth is max(N, min depth + 2)
    #[arg(allow_negative_numbers = true)]
    pub n: Option<i64>,

    /// Tree representation
    #[arg(short, long, value_enum)]
    pub kind: Option<TreeKind>,

    /// Build each depth's trees in parallel
    #[arg(short, long, overrides_with = "no_parallel")]
    pub parallel: bool,

    /// Build sequentially even when the config enables parallel runs
    #[arg(long, overrides_with = "parallel")]
    pub no_parallel: bool,

    /// First depth of the per-depth loop
    #[arg(long)]
    pub min_depth: Option<u32>,

    /// Refuse trees with more nodes than this
    #[arg(long)]
    pub max_nodes: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
