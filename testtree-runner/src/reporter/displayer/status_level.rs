// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status levels: filters for which per-test statuses are displayed.
//!
//! Status levels play a role that's similar to log levels in typical loggers.

use crate::{errors::StatusLevelParseError, outcome::OutcomeKind};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Status level to show in the reporter output.
///
/// Status levels are incremental: each level causes all the statuses listed above it to be output.
/// For example, [`Ignore`](Self::Ignore) implies [`Pass`](Self::Pass) and [`Fail`](Self::Fail).
///
/// The summary line is printed at every level.
#[derive(Copy, Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum StatusLevel {
    /// No per-test output.
    None,

    /// Only output failed and errored tests.
    Fail,

    /// Output passing tests in addition to all variants above.
    #[default]
    Pass,

    /// Output ignored tests in addition to all variants above.
    Ignore,

    /// Output a line as each test starts, in addition to all variants above.
    All,
}

impl StatusLevel {
    /// Returns string representations of all known variants.
    pub fn variants() -> [&'static str; 5] {
        ["none", "fail", "pass", "ignore", "all"]
    }

    /// Returns the lowest level at which a finished test of this kind is displayed.
    pub fn for_outcome(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Failed | OutcomeKind::Errored => Self::Fail,
            OutcomeKind::Passed => Self::Pass,
            OutcomeKind::Ignored => Self::Ignore,
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Fail => "fail",
            Self::Pass => "pass",
            Self::Ignore => "ignore",
            Self::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for StatusLevel {
    type Err = StatusLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "fail" => Ok(Self::Fail),
            "pass" => Ok(Self::Pass),
            "ignore" => Ok(Self::Ignore),
            "all" => Ok(Self::All),
            other => Err(StatusLevelParseError::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn levels_are_ordered() {
        let levels: Vec<StatusLevel> = StatusLevel::variants()
            .iter()
            .map(|s| s.parse().expect("known variant"))
            .collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
        assert_eq!(StatusLevel::default(), StatusLevel::Pass);
    }

    #[proptest]
    fn outcomes_shown_at_all(kind: OutcomeKind) {
        assert!(StatusLevel::for_outcome(kind) > StatusLevel::None);
        assert!(StatusLevel::for_outcome(kind) <= StatusLevel::All);
    }

    #[test]
    fn unknown_level() {
        let err = "loud".parse::<StatusLevel>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognized value for status-level: loud\n(known values: none, fail, pass, ignore, all)"
        );
    }
}
