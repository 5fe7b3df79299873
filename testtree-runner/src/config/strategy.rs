// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ExecutionStrategyParseError;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// How to run the tests in a [`TestList`](crate::list::TestList).
///
/// Both strategies produce the same [`Counts`](crate::reporter::Counts) for the same tree and
/// classifier. They differ in ordering and concurrency.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionStrategy {
    /// Run tests one at a time on the calling thread, in flattened order. Run records are returned
    /// in the same order.
    #[default]
    Sequential,

    /// Run tests concurrently on a pool of worker threads. Run records are returned in completion
    /// order.
    Parallel,
}

impl ExecutionStrategy {
    /// Returns string representations of all known variants.
    pub fn variants() -> [&'static str; 2] {
        ["sequential", "parallel"]
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for ExecutionStrategy {
    type Err = ExecutionStrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            other => Err(ExecutionStrategyParseError::new(other)),
        }
    }
}
