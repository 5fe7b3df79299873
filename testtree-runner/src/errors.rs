// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by testtree.
//!
//! Test outcomes are never errors: a failing or panicking test body becomes a
//! [`RunRecord`](crate::outcome::RunRecord). The errors here describe problems with the engine's
//! own setup and output.

use crate::{config::ExecutionStrategy, reporter::StatusLevel};
use camino::Utf8PathBuf;
use config::ConfigError;
use std::io;
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse testtree config at `{config_file}`")]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// The requested profile was not found in the config.
#[derive(Clone, Debug, Error)]
#[error("profile `{profile}` not found (known profiles: {})", .all_profiles.join(", "))]
pub struct ProfileNotFound {
    profile: String,
    all_profiles: Vec<String>,
}

impl ProfileNotFound {
    pub(crate) fn new(
        profile: impl Into<String>,
        all_profiles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut all_profiles: Vec<_> = all_profiles.into_iter().map(|s| s.into()).collect();
        all_profiles.sort_unstable();
        Self {
            profile: profile.into(),
            all_profiles,
        }
    }
}

/// An error that occurs while parsing a
/// [`TestThreads`](crate::config::TestThreads) value from a string.
#[derive(Clone, Debug, Error)]
#[error("unrecognized value for test-threads: {input}")]
pub struct TestThreadsParseError {
    /// The input that failed to parse.
    pub input: String,
}

impl TestThreadsParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurs while parsing an [`ExecutionStrategy`] value from a string.
#[derive(Clone, Debug, Error)]
#[error(
    "unrecognized value for strategy: {input}\n(known values: {})",
    ExecutionStrategy::variants().join(", ")
)]
pub struct ExecutionStrategyParseError {
    input: String,
}

impl ExecutionStrategyParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurs while parsing a [`StatusLevel`] value from a string.
#[derive(Clone, Debug, Error)]
#[error(
    "unrecognized value for status-level: {input}\n(known values: {})",
    StatusLevel::variants().join(", ")
)]
pub struct StatusLevelParseError {
    input: String,
}

impl StatusLevelParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurs while compiling a [`TestFilter`](crate::test_filter::TestFilter).
#[derive(Debug, Error)]
#[error("error building test filter")]
pub struct TestFilterBuildError {
    #[from]
    error: aho_corasick::BuildError,
}

/// An error that occurs while building a [`TestRunner`](crate::runner::TestRunner).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestRunnerBuildError {
    /// The worker pool for the parallel strategy could not be created.
    #[error("error creating worker pool with {test_threads} threads")]
    ThreadPool {
        /// The number of threads requested.
        test_threads: usize,

        /// The underlying error.
        #[source]
        error: rayon::ThreadPoolBuildError,
    },
}

/// An error that occurs while writing a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[from] io::Error),
}

/// An error that occurs while running a test tree end to end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// The runner could not be set up.
    #[error("error setting up test runner")]
    Build(#[from] TestRunnerBuildError),

    /// The report could not be written.
    #[error("error writing test report")]
    Write(#[from] WriteEventError),
}

impl RunError {
    /// Returns the documented exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Build(_) => testtree_metadata::TestTreeExitCode::SETUP_ERROR,
            Self::Write(_) => testtree_metadata::TestTreeExitCode::WRITE_OUTPUT_ERROR,
        }
    }
}
