// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation of run records into [`Counts`].

use super::displayer::DisplayHhMmSs;
use crate::outcome::{OutcomeKind, RunRecord};
use std::{
    fmt, iter,
    ops::{Add, AddAssign},
    time::Duration,
};
use testtree_metadata::{CountsSummary, TestTreeExitCode};

/// Per-outcome totals for a run, or for part of a run.
///
/// Counts form a commutative monoid under [`combine`](Self::combine), with
/// [`Counts::default()`] as the identity. Aggregating any permutation of a set of records, or
/// aggregating any partition of it and combining the parts, produces the same value. This is what
/// lets shards be merged without re-running tests.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Counts {
    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that were ignored.
    pub ignored: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that errored.
    pub errored: usize,

    /// The sum of the elapsed times of all tests, regardless of outcome.
    pub elapsed: Duration,
}

impl Counts {
    /// Creates a new `Counts`.
    pub fn new(
        passed: usize,
        ignored: usize,
        failed: usize,
        errored: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            passed,
            ignored,
            failed,
            errored,
            elapsed,
        }
    }

    /// Returns the counts for a single run record.
    pub fn from_record(record: &RunRecord) -> Self {
        Self::from_kind(record.kind(), record.elapsed)
    }

    /// Returns the counts for a single test with the given outcome kind and elapsed time.
    pub fn from_kind(kind: OutcomeKind, elapsed: Duration) -> Self {
        let mut counts = Self {
            elapsed,
            ..Self::default()
        };
        match kind {
            OutcomeKind::Passed => counts.passed = 1,
            OutcomeKind::Ignored => counts.ignored = 1,
            OutcomeKind::Failed => counts.failed = 1,
            OutcomeKind::Errored => counts.errored = 1,
        }
        counts
    }

    /// Reduces a collection of run records to counts.
    pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a RunRecord>) -> Self {
        records.into_iter().map(Self::from_record).sum()
    }

    /// Combines two counts by summing every field independently.
    pub fn combine(self, other: Self) -> Self {
        Self {
            passed: self.passed + other.passed,
            ignored: self.ignored + other.ignored,
            failed: self.failed + other.failed,
            errored: self.errored + other.errored,
            elapsed: self.elapsed + other.elapsed,
        }
    }

    /// Returns the number of records these counts were computed from.
    pub fn total(&self) -> usize {
        self.passed + self.ignored + self.failed + self.errored
    }

    /// Returns the number of tests that ran to a verdict: passed, failed or errored.
    ///
    /// Ignored tests are reported separately and are not part of this number.
    pub fn run_count(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    /// Returns true if no test failed or errored.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Returns the process exit code for these counts.
    ///
    /// Bit 0 is set if any test failed, and bit 1 is set if any test errored.
    pub fn exit_code(&self) -> i32 {
        TestTreeExitCode::from_counts(self.failed, self.errored)
    }

    /// Returns the summary line, including its trailing newline.
    pub fn summary_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tests run: {} passed, {} ignored, {} failed, {} errored ({})",
            self.run_count(),
            self.passed,
            self.ignored,
            self.failed,
            self.errored,
            DisplayHhMmSs(self.elapsed),
        )
    }
}

impl Add for Counts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl iter::Sum for Counts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::combine)
    }
}

impl<'a> iter::Sum<&'a Counts> for Counts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Counts> for CountsSummary {
    fn from(counts: Counts) -> Self {
        Self {
            total: counts.total(),
            passed: counts.passed,
            ignored: counts.ignored,
            failed: counts.failed,
            errored: counts.errored,
            elapsed: counts.elapsed,
        }
    }
}

impl From<CountsSummary> for Counts {
    fn from(summary: CountsSummary) -> Self {
        Self {
            passed: summary.passed,
            ignored: summary.ignored,
            failed: summary.failed,
            errored: summary.errored,
            elapsed: summary.elapsed,
        }
    }
}
