// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests that drive the public API end to end: trees are flattened, run with both
//! strategies, reported to in-memory writers, and aggregated.

use camino_tempfile::Utf8TempDir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};
use test_case::test_case;
use testtree_metadata::{CountsSummary, TestTreeExitCode};
use testtree_runner::{
    config::{ExecutionStrategy, TestThreads, TestTreeConfig},
    list::TestList,
    reporter::{Color, Counts, StatusLevel, TestReporterBuilder},
    runner::{TestHooks, TestRunnerBuilder},
    signal::Signal,
    test_filter::{NameMatch, TestFilterPatterns},
    test_tree::TestBody,
};

mod fixtures;

use fixtures::*;

fn without_elapsed(counts: Counts) -> Counts {
    Counts {
        elapsed: Duration::ZERO,
        ..counts
    }
}

fn run_to_string(
    strategy: ExecutionStrategy,
    status_level: StatusLevel,
    test_list: &TestList<'_>,
) -> (Counts, String) {
    let mut builder = TestRunnerBuilder::default();
    builder
        .set_strategy(strategy)
        .set_test_threads(TestThreads::Count(3));
    let runner = builder.build().expect("runner builds");

    let mut reporter = TestReporterBuilder::default()
        .set_status_level(status_level)
        .set_color(Color::Never)
        .build(Vec::new());
    let counts = runner
        .run(test_list, &mut reporter)
        .expect("writing to a Vec succeeds");
    let output = String::from_utf8(reporter.into_inner()).expect("output is valid UTF-8");
    (counts, output)
}

#[test]
fn flattened_names() {
    let tree = suite();
    let test_list = TestList::new(&tree);
    assert_eq!(test_list.names().collect::<Vec<_>>(), SUITE_NAMES);
}

#[test_case(ExecutionStrategy::Sequential ; "sequential")]
#[test_case(ExecutionStrategy::Parallel ; "parallel")]
fn full_run(strategy: ExecutionStrategy) {
    let tree = suite();
    let test_list = TestList::new(&tree);
    let (counts, output) = run_to_string(strategy, StatusLevel::Fail, &test_list);

    assert_eq!(without_elapsed(counts), Counts::new(4, 1, 2, 1, Duration::ZERO));
    assert_eq!(
        counts.exit_code(),
        TestTreeExitCode::TESTS_FAILED | TestTreeExitCode::TESTS_ERRORED
    );
    assert!(
        counts.elapsed >= Duration::from_millis(10),
        "elapsed {:?} includes the sleeping test",
        counts.elapsed
    );

    // Only failures are printed at this level.
    assert!(output.contains("FAIL"), "output: {output}");
    assert!(output.contains("parser/unicode"), "output: {output}");
    assert!(output.contains("unexpected end of input"), "output: {output}");
    assert!(
        output.contains("unexpected error: index out of bounds"),
        "output: {output}"
    );
    assert!(!output.contains("PASS"), "output: {output}");
    assert!(!output.contains("IGNORED"), "output: {output}");

    let summary_line = output.lines().last().expect("summary line is printed");
    assert!(
        summary_line.starts_with("7 tests run: 4 passed, 1 ignored, 2 failed, 1 errored ("),
        "summary line: {summary_line}"
    );
}

#[test]
fn sharded_counts_combine() {
    let tree = suite();
    let (full, _) = run_to_string(
        ExecutionStrategy::Sequential,
        StatusLevel::None,
        &TestList::new(&tree),
    );

    // Shard 1 runs the parser tests, shard 2 runs everything else.
    let shard_1 = TestFilterPatterns::new(vec!["parser/".to_owned()])
        .build()
        .expect("filter builds");
    let mut shard_2 = TestFilterPatterns::default();
    shard_2.skip("parser/", NameMatch::Substring);
    let shard_2 = shard_2.build().expect("filter builds");

    let mut summaries = Vec::new();
    for filter in [&shard_1, &shard_2] {
        let test_list = TestList::with_filter(&tree, filter);
        let (counts, _) = run_to_string(ExecutionStrategy::Parallel, StatusLevel::None, &test_list);

        // Each shard persists its counts as JSON.
        let mut json = Vec::new();
        CountsSummary::from(counts)
            .to_writer_pretty(&mut json)
            .expect("summary serializes");
        summaries.push(json);
    }

    let combined: Counts = summaries
        .iter()
        .map(|json| {
            Counts::from(CountsSummary::from_reader(json.as_slice()).expect("summary parses"))
        })
        .sum();

    assert_eq!(without_elapsed(combined), without_elapsed(full));
}

#[test]
fn filtered_tests_are_not_run() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tree = suite().wrap({
        let calls = calls.clone();
        move |body| {
            let calls = calls.clone();
            TestBody::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                body.call();
            })
        }
    });

    let mut patterns = TestFilterPatterns::default();
    patterns
        .include("smoke", NameMatch::Exact)
        .include("codec", NameMatch::Substring);
    let filter = patterns.build().expect("filter builds");
    let test_list = TestList::with_filter(&tree, &filter);
    assert_eq!(test_list.run_count(), 4);
    assert_eq!(test_list.skip_count(), 4);

    let (counts, _) = run_to_string(ExecutionStrategy::Sequential, StatusLevel::None, &test_list);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(without_elapsed(counts), Counts::new(2, 0, 1, 1, Duration::ZERO));
}

/// Hooks that check no two hook calls overlap.
#[derive(Default)]
struct OverlapDetector {
    in_hook: AtomicBool,
    overlaps: AtomicUsize,
    outcome_calls: usize,
}

impl OverlapDetector {
    fn enter(&self) {
        if self.in_hook.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        // Widen the window for another worker to enter.
        thread::sleep(Duration::from_millis(1));
        self.in_hook.store(false, Ordering::SeqCst);
    }
}

impl TestHooks for OverlapDetector {
    fn before_run(&mut self, _name: &str) {
        self.enter();
    }

    fn on_passed(&mut self, _name: &str, _elapsed: Duration) {
        self.enter();
        self.outcome_calls += 1;
    }

    fn on_ignored(&mut self, _name: &str, _reason: &str) {
        self.enter();
        self.outcome_calls += 1;
    }

    fn on_failed(&mut self, _name: &str, _message: &str, _elapsed: Duration) {
        self.enter();
        self.outcome_calls += 1;
    }

    fn on_exception(&mut self, _name: &str, _cause: &Signal, _elapsed: Duration) {
        self.enter();
        self.outcome_calls += 1;
    }
}

#[test]
fn parallel_hooks_do_not_overlap() {
    let tree = testtree_runner::list((0..32).map(|i| {
        testtree_runner::labeled(
            format!("t{i}"),
            testtree_runner::case(|| thread::sleep(Duration::from_millis(2))),
        )
    }));

    let mut builder = TestRunnerBuilder::default();
    builder
        .set_strategy(ExecutionStrategy::Parallel)
        .set_test_threads(TestThreads::Count(8));
    let runner = builder.build().expect("runner builds");

    let mut hooks = OverlapDetector::default();
    let records = runner.execute(&TestList::new(&tree), &mut hooks);

    assert_eq!(records.len(), 32);
    assert_eq!(hooks.outcome_calls, 32);
    assert_eq!(hooks.overlaps.load(Ordering::SeqCst), 0);
}

#[test]
fn profile_from_config_file() {
    let dir = Utf8TempDir::new().expect("tempdir created");
    std::fs::create_dir_all(dir.path().join(".config")).expect("config dir created");
    std::fs::write(
        dir.path().join(TestTreeConfig::CONFIG_PATH),
        indoc! {r#"
            [profile.ci]
            strategy = "parallel"
            test-threads = 2
            status-level = "all"
        "#},
    )
    .expect("config written");

    let config = TestTreeConfig::from_sources(dir.path(), None).expect("config is valid");
    let profile = config.profile("ci").expect("ci profile exists");

    let runner = TestRunnerBuilder::from_profile(&profile)
        .build()
        .expect("runner builds");
    assert_eq!(runner.strategy(), ExecutionStrategy::Parallel);

    let tree = suite();
    let mut reporter = TestReporterBuilder::default()
        .set_status_level(profile.status_level())
        .set_color(Color::Never)
        .build(Vec::new());
    let counts = runner
        .run(&TestList::new(&tree), &mut reporter)
        .expect("writing to a Vec succeeds");
    let output = String::from_utf8(reporter.into_inner()).expect("output is valid UTF-8");

    assert_eq!(counts.total(), SUITE_NAMES.len());
    for name in SUITE_NAMES {
        let starts = output
            .lines()
            .filter(|line| line.trim_start().starts_with("START") && line.ends_with(name))
            .count();
        assert_eq!(starts, 1, "one START line for {name} in:\n{output}");
    }
    assert!(
        output.contains("IGNORED             parser/nested/unsupported: needs a newer grammar"),
        "output: {output}"
    );
}
