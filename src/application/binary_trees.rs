//! Binary-trees benchmark driver.
//!
//! Sequencing is part of the observable contract because it determines peak
//! residency:
//!
//! 1. stretch tree (`max_depth + 1`): build, check, release
//! 2. long-lived tree (`max_depth`): build
//! 3. per-depth batches: build, check, release `iterations` trees each
//! 4. long-lived tree: check
//! 5. long-lived tree: release

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    Batch, BinaryTree, BoxTree, DepthPlan, DomainResult, NodeBudget, Residency, TreeArena,
    TreeKind,
};

/// One line of benchmark output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine {
    Stretch { depth: u32, check: i64 },
    Batch { iterations: u64, depth: u32, check: i64 },
    LongLived { depth: u32, check: i64 },
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Stretch { depth, check } => {
                write!(f, "stretch tree of depth {}\t check: {}", depth, check)
            }
            ReportLine::Batch {
                iterations,
                depth,
                check,
            } => write!(f, "{}\t trees of depth {}\t check: {}", iterations, depth, check),
            ReportLine::LongLived { depth, check } => {
                write!(f, "long lived tree of depth {}\t check: {}", depth, check)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stretch,
    LongLivedBuild,
    Batch { depth: u32 },
    LongLivedCheck,
    LongLivedRelease,
}

/// Residency observed while one phase ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStats {
    pub phase: Phase,
    /// Highest number of simultaneously live nodes during the phase
    pub peak_live_nodes: usize,
    /// Live nodes once the phase finished
    pub live_after: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: Vec<ReportLine>,
    /// Phases in execution order
    pub phases: Vec<PhaseStats>,
}

impl RunSummary {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseStats> {
        self.phases.iter().find(|s| s.phase == phase)
    }

    /// Highest residency of any per-depth batch, i.e. while the long-lived
    /// tree was held across the loop.
    pub fn hold_peak(&self) -> usize {
        self.phases
            .iter()
            .filter(|s| matches!(s.phase, Phase::Batch { .. }))
            .map(|s| s.peak_live_nodes)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Spread each batch over the rayon pool
    pub parallel: bool,
    pub budget: NodeBudget,
}

/// Runs the binary-trees benchmark for one depth plan.
#[derive(Debug, Clone)]
pub struct BinaryTreesRunner {
    plan: DepthPlan,
    options: RunOptions,
}

impl BinaryTreesRunner {
    pub fn new(plan: DepthPlan, options: RunOptions) -> Self {
        Self { plan, options }
    }

    /// Run with the representation selected by `kind`; `emit` sees every
    /// report line as soon as it is produced.
    pub fn run(
        &self,
        kind: TreeKind,
        emit: impl FnMut(&ReportLine),
    ) -> ApplicationResult<RunSummary> {
        match kind {
            TreeKind::Boxed => self.run_with::<BoxTree>(emit),
            TreeKind::Arena => self.run_with::<TreeArena>(emit),
        }
    }

    #[instrument(level = "debug", skip(self, emit), fields(plan = ?self.plan))]
    pub fn run_with<T: BinaryTree>(
        &self,
        mut emit: impl FnMut(&ReportLine),
    ) -> ApplicationResult<RunSummary> {
        let budget = self.options.budget;
        let residency = Residency::new();
        let mut summary = RunSummary::default();

        let mut finish = |summary: &mut RunSummary, phase: Phase, line: Option<ReportLine>| {
            if let Some(line) = line {
                emit(&line);
                summary.lines.push(line);
            }
            let stats = PhaseStats {
                phase,
                peak_live_nodes: residency.take_peak(),
                live_after: residency.live(),
            };
            debug!(?stats, "phase done");
            summary.phases.push(stats);
        };

        let depth = self.plan.stretch_depth();
        info!(depth, "stretch tree");
        let stretch = residency.hold(T::build_within(depth, budget)?);
        let line = ReportLine::Stretch {
            depth,
            check: stretch.checksum(),
        };
        stretch.release();
        finish(&mut summary, Phase::Stretch, Some(line));

        let depth = self.plan.long_lived_depth();
        info!(depth, "long-lived tree");
        let long_lived = residency.hold(T::build_within(depth, budget)?);
        finish(&mut summary, Phase::LongLivedBuild, None);

        for batch in self.plan.batches() {
            info!(depth = batch.depth, iterations = batch.iterations, "batch");
            let check = self.run_batch::<T>(batch, &residency)?;
            let line = ReportLine::Batch {
                iterations: batch.iterations,
                depth: batch.depth,
                check,
            };
            finish(&mut summary, Phase::Batch { depth: batch.depth }, Some(line));
        }

        let line = ReportLine::LongLived {
            depth,
            check: long_lived.checksum(),
        };
        finish(&mut summary, Phase::LongLivedCheck, Some(line));

        long_lived.release();
        finish(&mut summary, Phase::LongLivedRelease, None);

        Ok(summary)
    }

    fn run_batch<T: BinaryTree>(&self, batch: Batch, residency: &Residency) -> DomainResult<i64> {
        let budget = self.options.budget;
        let one = |_: u64| -> DomainResult<i64> {
            let tree = residency.hold(T::build_within(batch.depth, budget)?);
            let check = tree.checksum();
            tree.release();
            Ok(check)
        };

        if self.options.parallel {
            (0..batch.iterations)
                .into_par_iter()
                .map(one)
                .try_reduce(|| 0, |a, b| Ok(a + b))
        } else {
            (0..batch.iterations).map(one).sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_MIN_DEPTH;

    #[test]
    fn report_lines_use_benchmark_formats() {
        assert_eq!(
            ReportLine::Stretch { depth: 7, check: 7 }.to_string(),
            "stretch tree of depth 7\t check: 7"
        );
        assert_eq!(
            ReportLine::Batch {
                iterations: 64,
                depth: 4,
                check: 256
            }
            .to_string(),
            "64\t trees of depth 4\t check: 256"
        );
        assert_eq!(
            ReportLine::LongLived { depth: 6, check: 6 }.to_string(),
            "long lived tree of depth 6\t check: 6"
        );
    }

    #[test]
    fn emit_sees_lines_in_summary_order() {
        let plan = DepthPlan::new(0, DEFAULT_MIN_DEPTH).unwrap();
        let runner = BinaryTreesRunner::new(plan, RunOptions::default());
        let mut seen = Vec::new();
        let summary = runner
            .run(TreeKind::Boxed, |line| seen.push(*line))
            .unwrap();
        assert_eq!(seen, summary.lines);
        assert_eq!(seen.len(), 4);
    }
}
