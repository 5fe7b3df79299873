// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{error, fmt};

/// An error that occurs while reading or writing a [`CountsSummary`](crate::CountsSummary).
#[derive(Debug)]
pub enum SummaryError {
    /// The summary could not be deserialized from JSON.
    Deserialize(serde_json::Error),

    /// The summary could not be serialized to JSON, or the output could not be written.
    Serialize(serde_json::Error),

    /// The counts in the summary disagree with its recorded total.
    TotalMismatch {
        /// The total recorded in the summary.
        recorded: usize,

        /// The sum of the individual counts.
        computed: usize,
    },

    /// The individual counts in the summary add up to more than `usize::MAX`.
    CountsOverflow {
        /// The total recorded in the summary.
        recorded: usize,
    },
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Deserialize(_) => write!(f, "parsing counts summary JSON failed"),
            Self::Serialize(_) => write!(f, "writing counts summary JSON failed"),
            Self::TotalMismatch { recorded, computed } => write!(
                f,
                "counts summary records {recorded} tests, but its counts add up to {computed}"
            ),
            Self::CountsOverflow { recorded } => write!(
                f,
                "counts summary records {recorded} tests, but its counts overflow when added up"
            ),
        }
    }
}

impl error::Error for SummaryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Deserialize(err) | Self::Serialize(err) => Some(err),
            Self::TotalMismatch { .. } | Self::CountsOverflow { .. } => None,
        }
    }
}
