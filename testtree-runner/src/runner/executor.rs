// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two execution strategies.
//!
//! * Sequential: tests run one at a time on the calling thread, in flattened order.
//! * Parallel: one job per test is spawned onto a rayon pool. Records are returned in completion
//!   order, and hooks are serialized through [`SynchronizedHooks`].

use super::{SynchronizedHooks, TestHooks, evaluate_test};
use crate::{
    classify::Classify,
    config::{ExecutionStrategy, TestThreads},
    errors::TestRunnerBuildError,
    list::TestList,
    outcome::RunRecord,
};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

#[derive(Debug)]
pub(super) enum Executor {
    Sequential,
    Parallel {
        test_threads: usize,
        run_pool: ThreadPool,
    },
}

impl Executor {
    pub(super) fn new(
        strategy: ExecutionStrategy,
        test_threads: TestThreads,
    ) -> Result<Self, TestRunnerBuildError> {
        match strategy {
            ExecutionStrategy::Sequential => Ok(Self::Sequential),
            ExecutionStrategy::Parallel => {
                let test_threads = test_threads.compute();
                let run_pool = ThreadPoolBuilder::new()
                    .num_threads(test_threads)
                    .thread_name(|idx| format!("testtree-run-{idx}"))
                    .build()
                    .map_err(|error| TestRunnerBuildError::ThreadPool {
                        test_threads,
                        error,
                    })?;
                Ok(Self::Parallel {
                    test_threads,
                    run_pool,
                })
            }
        }
    }

    pub(super) fn strategy(&self) -> ExecutionStrategy {
        match self {
            Self::Sequential => ExecutionStrategy::Sequential,
            Self::Parallel { .. } => ExecutionStrategy::Parallel,
        }
    }

    pub(super) fn execute<H>(
        &self,
        test_list: &TestList<'_>,
        classifier: &dyn Classify,
        hooks: &mut H,
    ) -> Vec<RunRecord>
    where
        H: TestHooks + Send,
    {
        match self {
            Self::Sequential => {
                debug!(run_count = test_list.run_count(), "running tests sequentially");
                test_list
                    .iter_tests()
                    .map(|instance| evaluate_test(instance, classifier, &mut *hooks))
                    .collect()
            }
            Self::Parallel {
                test_threads,
                run_pool,
            } => {
                debug!(
                    run_count = test_list.run_count(),
                    test_threads, "running tests in parallel"
                );
                let hooks = SynchronizedHooks::new(hooks);
                let hooks = &hooks;
                let (run_sender, run_receiver) = crossbeam_channel::unbounded();

                run_pool.scope(|run_scope| {
                    for instance in test_list.iter_tests() {
                        let this_run_sender = run_sender.clone();
                        run_scope.spawn(move |_| {
                            let mut hooks = hooks;
                            let record = evaluate_test(instance, classifier, &mut hooks);
                            // The receiver outlives the scope, so this cannot fail.
                            let _ = this_run_sender.send(record);
                        });
                    }
                });

                // All jobs have completed once the scope returns. Dropping the last sender ends
                // the iteration below.
                drop(run_sender);
                run_receiver.into_iter().collect()
            }
        }
    }
}
