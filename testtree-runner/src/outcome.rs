// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test outcomes and per-test run records.

use crate::signal::Signal;
use chrono::{DateTime, Local};
use std::{fmt, time::Duration};

/// The classified result of running a single test body.
#[derive(Debug)]
pub enum Outcome {
    /// The body returned normally.
    Passed,

    /// The body marked itself as ignored.
    Ignored {
        /// The reason given by the body.
        reason: String,
    },

    /// The body raised a recognized assertion failure.
    Failed {
        /// The failure message.
        message: String,
    },

    /// The body raised a signal that was not recognized as an ignore or a failure.
    Errored {
        /// The original signal, kept in full for inspection.
        cause: Signal,
    },
}

impl Outcome {
    /// Returns the kind of this outcome.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Passed => OutcomeKind::Passed,
            Self::Ignored { .. } => OutcomeKind::Ignored,
            Self::Failed { .. } => OutcomeKind::Failed,
            Self::Errored { .. } => OutcomeKind::Errored,
        }
    }

    /// Returns the message associated with this outcome, if any.
    ///
    /// For [`Errored`](Self::Errored) outcomes this is the message of the underlying signal.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Passed => None,
            Self::Ignored { reason } => Some(reason.clone()),
            Self::Failed { message } => Some(message.clone()),
            Self::Errored { cause } => Some(cause.message().into_owned()),
        }
    }
}

/// The kind of an [`Outcome`], without any associated data.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum OutcomeKind {
    /// See [`Outcome::Passed`].
    Passed,

    /// See [`Outcome::Ignored`].
    Ignored,

    /// See [`Outcome::Failed`].
    Failed,

    /// See [`Outcome::Errored`].
    Errored,
}

impl OutcomeKind {
    /// Returns true if this kind counts towards a successful run.
    pub fn is_success(self) -> bool {
        match self {
            Self::Passed | Self::Ignored => true,
            Self::Failed | Self::Errored => false,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.pad("PASS"),
            Self::Ignored => f.pad("IGNORED"),
            Self::Failed => f.pad("FAIL"),
            Self::Errored => f.pad("ERROR"),
        }
    }
}

/// The record of a single test having been run.
#[derive(Debug)]
pub struct RunRecord {
    /// The qualified name of the test.
    pub name: String,

    /// The classified outcome.
    pub outcome: Outcome,

    /// The wall-clock time at which the body started running.
    pub start_time: DateTime<Local>,

    /// How long the body took to run.
    pub elapsed: Duration,
}

impl RunRecord {
    /// Returns the kind of this record's outcome.
    pub fn kind(&self) -> OutcomeKind {
        self.outcome.kind()
    }
}
