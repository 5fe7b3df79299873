// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::SummaryError;
use serde::{Deserialize, Serialize};
use std::{io, time::Duration};

/// Serializable per-outcome counts for a run, or for one shard of a run.
///
/// Shards can write this out as JSON and a coordinator can read the summaries back and merge them
/// without re-running any tests.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CountsSummary {
    /// The total number of tests run. Always the sum of the other counts.
    pub total: usize,

    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that were ignored.
    pub ignored: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that errored.
    pub errored: usize,

    /// The total time spent running test bodies.
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl CountsSummary {
    /// Parses a summary from a JSON string, checking that the recorded total is consistent.
    pub fn parse_json(json: impl AsRef<str>) -> Result<Self, SummaryError> {
        let summary: Self = serde_json::from_str(json.as_ref()).map_err(SummaryError::Deserialize)?;
        summary.validate()
    }

    /// Reads a summary from the given reader.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, SummaryError> {
        let summary: Self = serde_json::from_reader(reader).map_err(SummaryError::Deserialize)?;
        summary.validate()
    }

    /// Serializes this summary as pretty-printed JSON to the given writer.
    pub fn to_writer_pretty(&self, writer: impl io::Write) -> Result<(), SummaryError> {
        serde_json::to_writer_pretty(writer, self).map_err(SummaryError::Serialize)
    }

    fn validate(self) -> Result<Self, SummaryError> {
        // Counts come from outside the process, so they may not add up at all.
        let computed = [self.ignored, self.failed, self.errored]
            .into_iter()
            .try_fold(self.passed, usize::checked_add)
            .ok_or(SummaryError::CountsOverflow {
                recorded: self.total,
            })?;
        if computed != self.total {
            return Err(SummaryError::TotalMismatch {
                recorded: self.total,
                computed,
            });
        }
        Ok(self)
    }
}
