// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for testtree runs.
///
/// The low two bits form a bitmask describing the outcome of the tests themselves:
///
/// | code | meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | every test passed or was ignored          |
/// | 1    | at least one test failed                  |
/// | 2    | at least one test errored                 |
/// | 3    | tests both failed and errored             |
///
/// Codes outside that range describe problems with the engine rather than with the tests.
pub enum TestTreeExitCode {}

impl TestTreeExitCode {
    /// No test failed or errored.
    pub const OK: i32 = 0;

    /// Bit set if one or more tests failed.
    pub const TESTS_FAILED: i32 = 1;

    /// Bit set if one or more tests errored.
    pub const TESTS_ERRORED: i32 = 2;

    /// The runner could not be set up, for example because its worker pool could not be created.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing the report to its output produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// Computes the exit code for a run with the given number of failed and errored tests.
    pub fn from_counts(failed: usize, errored: usize) -> i32 {
        let mut code = Self::OK;
        if failed > 0 {
            code |= Self::TESTS_FAILED;
        }
        if errored > 0 {
            code |= Self::TESTS_ERRORED;
        }
        code
    }
}
