// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{TestHooks, executor::Executor};
use crate::{
    classify::{Classify, SignalClassifier},
    config::{ExecutionStrategy, TestThreads, TestTreeProfile},
    errors::{RunError, TestRunnerBuildError, WriteEventError},
    list::TestList,
    outcome::RunRecord,
    reporter::{Counts, TestReporter, TestReporterBuilder},
    test_tree::Test,
};
use debug_ignore::DebugIgnore;
use std::{
    error::Error,
    io::{self, Write},
};
use tracing::{debug, error};

/// Test runner options.
#[derive(Debug, Default)]
pub struct TestRunnerBuilder {
    strategy: Option<ExecutionStrategy>,
    test_threads: Option<TestThreads>,
    classifier: Option<DebugIgnore<Box<dyn Classify>>>,
}

impl TestRunnerBuilder {
    /// Creates a builder with the strategy and thread count from a profile.
    pub fn from_profile(profile: &TestTreeProfile<'_>) -> Self {
        Self {
            strategy: Some(profile.strategy()),
            test_threads: Some(profile.test_threads()),
            classifier: None,
        }
    }

    /// Sets the execution strategy. Defaults to [`ExecutionStrategy::Sequential`].
    pub fn set_strategy(&mut self, strategy: ExecutionStrategy) -> &mut Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the number of tests to run simultaneously with the parallel strategy.
    pub fn set_test_threads(&mut self, test_threads: TestThreads) -> &mut Self {
        self.test_threads = Some(test_threads);
        self
    }

    /// Sets the policy that turns a test body's result into an outcome. Defaults to
    /// [`SignalClassifier::default()`].
    pub fn set_classifier(&mut self, classifier: impl Classify + 'static) -> &mut Self {
        self.classifier = Some(DebugIgnore(Box::new(classifier)));
        self
    }

    /// Creates a new test runner.
    ///
    /// For the parallel strategy, this creates the worker pool.
    pub fn build(self) -> Result<TestRunner, TestRunnerBuildError> {
        let strategy = self.strategy.unwrap_or_default();
        let test_threads = self.test_threads.unwrap_or_default();
        let executor = Executor::new(strategy, test_threads)?;
        let classifier = self
            .classifier
            .unwrap_or_else(|| DebugIgnore(Box::new(SignalClassifier::default())));

        Ok(TestRunner {
            classifier,
            executor,
        })
    }
}

/// Context for running tests.
///
/// Created using [`TestRunnerBuilder::build`].
#[derive(Debug)]
pub struct TestRunner {
    classifier: DebugIgnore<Box<dyn Classify>>,
    executor: Executor,
}

impl TestRunner {
    /// Returns the strategy this runner executes tests with.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.executor.strategy()
    }

    /// Runs every test in the list, calling `hooks` as tests start and finish.
    ///
    /// With the sequential strategy, records are returned in list order. With the parallel
    /// strategy, they are returned in completion order.
    pub fn execute<H>(&self, test_list: &TestList<'_>, hooks: &mut H) -> Vec<RunRecord>
    where
        H: TestHooks + Send,
    {
        self.executor.execute(test_list, &**self.classifier, hooks)
    }

    /// Runs every test in the list, reporting to `reporter`, and writes the summary line.
    ///
    /// Returns the aggregated counts. Test failures are reported through the counts, never as an
    /// error: the error case is reserved for output that couldn't be written.
    pub fn run<W>(
        &self,
        test_list: &TestList<'_>,
        reporter: &mut TestReporter<W>,
    ) -> Result<Counts, WriteEventError>
    where
        W: Write + Send,
    {
        let records = self.execute(test_list, reporter);
        let counts = Counts::aggregate(&records);
        debug!(
            strategy = %self.strategy(),
            passed = counts.passed,
            ignored = counts.ignored,
            failed = counts.failed,
            errored = counts.errored,
            "test run finished"
        );
        reporter.write_summary(&counts)?;
        Ok(counts)
    }
}

/// Flattens `tree` and runs it with `strategy` and the default classifier, calling `hooks` as
/// tests start and finish.
///
/// The parallel strategy uses one worker thread per logical CPU.
pub fn evaluate<H>(
    tree: &Test,
    hooks: &mut H,
    strategy: ExecutionStrategy,
) -> Result<Vec<RunRecord>, TestRunnerBuildError>
where
    H: TestHooks + Send,
{
    let mut builder = TestRunnerBuilder::default();
    builder.set_strategy(strategy);
    let runner = builder.build()?;

    Ok(runner.execute(&TestList::new(tree), hooks))
}

/// Runs `tree` sequentially, printing results to standard output, and returns the exit code.
///
/// The exit code is described by [`TestTreeExitCode`](testtree_metadata::TestTreeExitCode).
pub fn run(tree: &Test) -> i32 {
    let mut builder = TestRunnerBuilder::default();
    builder.set_strategy(ExecutionStrategy::Sequential);
    run_to_stdout(tree, builder, &TestReporterBuilder::default())
}

/// Runs `tree` in parallel, printing results to standard output, and returns the exit code.
///
/// Status lines from concurrently running tests are never interleaved.
pub fn run_parallel(tree: &Test) -> i32 {
    let mut builder = TestRunnerBuilder::default();
    builder.set_strategy(ExecutionStrategy::Parallel);
    run_to_stdout(tree, builder, &TestReporterBuilder::default())
}

/// Runs `tree` with the strategy, thread count and status level of a profile, printing results
/// to standard output, and returns the exit code.
pub fn run_with_profile(tree: &Test, profile: &TestTreeProfile<'_>) -> i32 {
    let mut reporter_builder = TestReporterBuilder::default();
    reporter_builder.set_status_level(profile.status_level());
    run_to_stdout(
        tree,
        TestRunnerBuilder::from_profile(profile),
        &reporter_builder,
    )
}

fn run_to_stdout(
    tree: &Test,
    runner_builder: TestRunnerBuilder,
    reporter_builder: &TestReporterBuilder,
) -> i32 {
    run_to_writer(tree, runner_builder, reporter_builder, io::stdout())
}

fn run_to_writer<W>(
    tree: &Test,
    runner_builder: TestRunnerBuilder,
    reporter_builder: &TestReporterBuilder,
    writer: W,
) -> i32
where
    W: Write + Send,
{
    let res = runner_builder
        .build()
        .map_err(RunError::from)
        .and_then(|runner| {
            let test_list = TestList::new(tree);
            let mut reporter = reporter_builder.build(writer);
            Ok(runner.run(&test_list, &mut reporter)?)
        });

    match res {
        Ok(counts) => counts.exit_code(),
        Err(err) => {
            error!(error = &err as &(dyn Error + 'static), "test run failed");
            err.exit_code()
        }
    }
}
