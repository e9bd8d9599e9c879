//! Tests for the binary-trees driver: output, sequencing, residency

use rstest::rstest;

use rsbench::application::{
    ApplicationError, BinaryTreesRunner, Phase, ReportLine, RunOptions, RunSummary,
};
use rsbench::domain::{
    nodes_for_depth, DepthPlan, DomainError, NodeBudget, TreeKind, DEFAULT_MIN_DEPTH,
};
use rsbench::util::testing;

const EXPECTED_N10: &str = "\
stretch tree of depth 11\t check: 11
1024\t trees of depth 4\t check: 4096
256\t trees of depth 6\t check: 1536
64\t trees of depth 8\t check: 512
16\t trees of depth 10\t check: 160
long lived tree of depth 10\t check: 10";

fn run(n: i64, kind: TreeKind, options: RunOptions) -> RunSummary {
    let plan = DepthPlan::new(n, DEFAULT_MIN_DEPTH).unwrap();
    BinaryTreesRunner::new(plan, options)
        .run(kind, |_| {})
        .unwrap()
}

fn render(summary: &RunSummary) -> String {
    summary
        .lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================
// Depth plan
// ============================================================

#[test]
fn given_n_10_when_planning_then_matches_reference_scenario() {
    let plan = DepthPlan::new(10, DEFAULT_MIN_DEPTH).unwrap();
    assert_eq!(plan.min_depth(), 4);
    assert_eq!(plan.max_depth(), 10);
    assert_eq!(plan.stretch_depth(), 11);

    let batches: Vec<(u32, u64)> = plan.batches().map(|b| (b.depth, b.iterations)).collect();
    assert_eq!(batches, vec![(4, 1024), (6, 256), (8, 64), (10, 16)]);
}

// ============================================================
// Output
// ============================================================

#[rstest]
#[case(TreeKind::Boxed, false)]
#[case(TreeKind::Boxed, true)]
#[case(TreeKind::Arena, false)]
#[case(TreeKind::Arena, true)]
fn given_n_10_when_running_then_prints_reference_output(
    #[case] kind: TreeKind,
    #[case] parallel: bool,
) {
    testing::init_test_setup();
    let summary = run(
        10,
        kind,
        RunOptions {
            parallel,
            ..RunOptions::default()
        },
    );
    assert_eq!(render(&summary), EXPECTED_N10);
}

#[test]
fn given_n_below_minimum_when_running_then_uses_min_depth_plus_two() {
    let summary = run(1, TreeKind::Boxed, RunOptions::default());
    assert_eq!(
        summary.lines,
        vec![
            ReportLine::Stretch { depth: 7, check: 7 },
            ReportLine::Batch {
                iterations: 64,
                depth: 4,
                check: 256
            },
            ReportLine::Batch {
                iterations: 16,
                depth: 6,
                check: 96
            },
            ReportLine::LongLived { depth: 6, check: 6 },
        ]
    );
}

// ============================================================
// Sequencing and residency
// ============================================================

#[test]
fn given_run_when_finished_then_phases_follow_benchmark_order() {
    let summary = run(8, TreeKind::Arena, RunOptions::default());
    let phases: Vec<Phase> = summary.phases.iter().map(|s| s.phase).collect();
    assert_eq!(
        phases,
        vec![
            Phase::Stretch,
            Phase::LongLivedBuild,
            Phase::Batch { depth: 4 },
            Phase::Batch { depth: 6 },
            Phase::Batch { depth: 8 },
            Phase::LongLivedCheck,
            Phase::LongLivedRelease,
        ]
    );
}

#[test]
fn given_run_when_finished_then_every_node_was_released() {
    let summary = run(8, TreeKind::Boxed, RunOptions::default());
    let long_lived = nodes_for_depth(8).unwrap();

    let stretch = summary.phase(Phase::Stretch).unwrap();
    assert_eq!(stretch.peak_live_nodes, nodes_for_depth(9).unwrap());
    assert_eq!(stretch.live_after, 0);

    for depth in [4, 6, 8] {
        assert_eq!(summary.phase(Phase::Batch { depth }).unwrap().live_after, long_lived);
    }
    assert_eq!(summary.phases.last().unwrap().live_after, 0);
}

#[rstest]
fn given_long_lived_tree_when_looping_then_peak_exceeds_any_single_iteration(
    #[values(TreeKind::Boxed, TreeKind::Arena)] kind: TreeKind,
) {
    let summary = run(10, kind, RunOptions::default());
    let largest_iteration = nodes_for_depth(10).unwrap();

    assert!(summary.hold_peak() > largest_iteration);
    for depth in [4, 6, 8, 10] {
        let batch = summary.phase(Phase::Batch { depth }).unwrap();
        assert_eq!(
            batch.peak_live_nodes,
            nodes_for_depth(10).unwrap() + nodes_for_depth(depth).unwrap(),
            "sequential batch holds one temporary tree next to the long-lived one"
        );
    }
}

// ============================================================
// Failure
// ============================================================

#[test]
fn given_budget_below_stretch_tree_when_running_then_fails_before_output() {
    let plan = DepthPlan::new(4, DEFAULT_MIN_DEPTH).unwrap();
    let runner = BinaryTreesRunner::new(
        plan,
        RunOptions {
            parallel: false,
            budget: NodeBudget::limited(200),
        },
    );
    let mut printed = 0;
    let err = runner.run(TreeKind::Boxed, |_| printed += 1).unwrap_err();

    assert_eq!(printed, 0);
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::ResourceExhausted { depth: 7, nodes: 255 })
    ));
}

#[test]
fn given_budget_at_stretch_size_when_parallel_then_stretch_tree_decides() {
    let plan = DepthPlan::new(4, DEFAULT_MIN_DEPTH).unwrap();
    // the stretch tree (depth 7, 255 nodes) is the largest tree of the run
    let runner = BinaryTreesRunner::new(
        plan,
        RunOptions {
            parallel: true,
            budget: NodeBudget::limited(255),
        },
    );
    assert!(runner.run(TreeKind::Arena, |_| {}).is_ok());

    let runner = BinaryTreesRunner::new(
        plan,
        RunOptions {
            parallel: true,
            budget: NodeBudget::limited(254),
        },
    );
    let mut lines = Vec::new();
    assert!(runner.run(TreeKind::Arena, |l| lines.push(*l)).is_err());
    assert!(lines.is_empty());
}
