//! Command dispatch: resolves settings and runs the selected benchmark.

use std::io;
use std::path::Path;
use std::time::Instant;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{read_input, BinaryTreesRunner, RegexRedux, RunOptions};
use crate::cli::args::{BinaryTreesArgs, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, BinaryTreesConfig, Settings};
use crate::domain::{BinaryTree, BoxTree, DepthPlan, TreeArena, TreeKind, TreeRender};

/// Deepest tree the `tree` command will print.
pub const MAX_RENDER_DEPTH: u32 = 6;

impl BinaryTreesArgs {
    /// Layer command-line flags over the configured values.
    pub fn apply_to(&self, base: &BinaryTreesConfig) -> BinaryTreesConfig {
        BinaryTreesConfig {
            n: self.n.unwrap_or(base.n),
            min_depth: self.min_depth.unwrap_or(base.min_depth),
            kind: self.kind.unwrap_or(base.kind),
            parallel: !self.no_parallel && (self.parallel || base.parallel),
            max_nodes: self.max_nodes.or(base.max_nodes),
        }
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");

    let started = Instant::now();
    let (label, result) = match &cli.command {
        Some(Commands::BinaryTrees(args)) => ("binary-trees", _binary_trees(&settings, args)),
        None => (
            "binary-trees",
            _binary_trees(&settings, &BinaryTreesArgs::default()),
        ),
        Some(Commands::RegexRedux { file, parallel }) => (
            "regex-redux",
            _regex_redux(&settings, file.as_deref(), *parallel),
        ),
        Some(Commands::Tree { depth, kind }) => ("tree", _tree(&settings, *depth, *kind)),
        Some(Commands::Config { command }) => {
            ("config", _config(&settings, command, cli.config.as_deref()))
        }
        Some(Commands::Completion { shell }) => ("completion", _completion(*shell)),
    };
    if cli.time {
        output::elapsed(label, started.elapsed());
    }
    result
}

#[instrument(skip(settings))]
fn _binary_trees(settings: &Settings, args: &BinaryTreesArgs) -> CliResult<()> {
    let resolved = args.apply_to(&settings.binary_trees);
    debug!(?resolved, "binary-trees");
    let plan = DepthPlan::new(resolved.n, resolved.min_depth)?;
    let runner = BinaryTreesRunner::new(
        plan,
        RunOptions {
            parallel: resolved.parallel,
            budget: resolved.budget(),
        },
    );
    let summary = runner.run(resolved.kind, |line| output::info(line))?;
    debug!(hold_peak = summary.hold_peak(), "residency");
    Ok(())
}

#[instrument(skip(settings))]
fn _regex_redux(settings: &Settings, file: Option<&Path>, parallel: bool) -> CliResult<()> {
    let input = read_input(file)?;
    let redux = RegexRedux::new()?;
    let report = redux.run(&input, parallel || settings.regex_redux.parallel);
    output::info(&report);
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(settings: &Settings, depth: u32, kind: Option<TreeKind>) -> CliResult<()> {
    if depth > MAX_RENDER_DEPTH {
        return Err(CliError::InvalidArgs(format!(
            "tree depth {} exceeds {}",
            depth, MAX_RENDER_DEPTH
        )));
    }
    match kind.unwrap_or(settings.binary_trees.kind) {
        TreeKind::Boxed => show(BoxTree::build(depth)?),
        TreeKind::Arena => show(TreeArena::build(depth)?),
    }
    Ok(())
}

fn show<T: BinaryTree + TreeRender>(tree: T) {
    output::info(&tree.to_tree_string());
    output::action("nodes", &tree.node_count());
    output::action("check", &tree.checksum());
    tree.release();
}

fn _config(settings: &Settings, command: &ConfigCommands, config_file: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no home directory: global config disabled"),
            }
            if let Some(path) = config_file {
                output::action("file", &path.display());
            }
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
