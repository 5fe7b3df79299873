// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints per-test status lines and the run summary to a writer.

use super::{DisplayBracketedDuration, StatusLevel};
use crate::{
    errors::WriteEventError,
    helpers::{NameStyles, write_test_name},
    outcome::OutcomeKind,
    reporter::Counts,
    runner::TestHooks,
    signal::Signal,
};
use owo_colors::{OwoColorize, Style};
use serde::Deserialize;
use std::{
    io::{self, Write},
    time::Duration,
};
use tracing::warn;

/// Whether to colorize output.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    /// Colorize if the stream supports it.
    #[default]
    Auto,

    /// Always colorize.
    Always,

    /// Never colorize.
    Never,
}

impl Color {
    /// Determines whether output should be colorized based on whether the given stream supports
    /// this.
    pub fn should_colorize(self, stream: supports_color::Stream) -> bool {
        match self {
            Self::Auto => supports_color::on_cached(stream).is_some(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Test reporter builder.
#[derive(Debug, Default)]
pub struct TestReporterBuilder {
    status_level: Option<StatusLevel>,
    color: Color,
}

impl TestReporterBuilder {
    /// Sets the conditions under which per-test statuses are displayed.
    pub fn set_status_level(&mut self, status_level: StatusLevel) -> &mut Self {
        self.status_level = Some(status_level);
        self
    }

    /// Sets whether output is colorized. [`Color::Auto`] checks standard output.
    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Creates a new test reporter writing to the given output.
    pub fn build<W: Write>(&self, writer: W) -> TestReporter<W> {
        let mut styles = Box::<Styles>::default();
        if self.color.should_colorize(supports_color::Stream::Stdout) {
            styles.colorize();
        }

        TestReporter {
            status_level: self.status_level.unwrap_or_default(),
            styles,
            writer,
            error: None,
        }
    }
}

/// Functionality to report test results to a writer.
///
/// `TestReporter` implements [`TestHooks`], printing a status line for each test whose outcome is
/// at or below the configured [`StatusLevel`]. Hooks can't return errors, so the first write error
/// is stored and returned from [`write_summary`](Self::write_summary) or
/// [`finish`](Self::finish). Nothing else is written after an error.
pub struct TestReporter<W> {
    status_level: StatusLevel,
    styles: Box<Styles>,
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> TestReporter<W> {
    /// Returns the status level for this reporter.
    pub fn status_level(&self) -> StatusLevel {
        self.status_level
    }

    /// Writes the summary line for the run, then flushes the output.
    ///
    /// Returns the first error encountered while writing, including errors from earlier status
    /// lines.
    pub fn write_summary(&mut self, counts: &Counts) -> Result<(), WriteEventError> {
        if self.error.is_none() {
            let res = self
                .writer
                .write_all(counts.summary_line().as_bytes())
                .and_then(|()| self.writer.flush());
            self.record_result(res);
        }
        self.finish()
    }

    /// Returns the first error encountered while writing, if any, and clears it.
    pub fn finish(&mut self) -> Result<(), WriteEventError> {
        match self.error.take() {
            Some(error) => Err(WriteEventError::Io(error)),
            None => Ok(()),
        }
    }

    /// Consumes the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn should_display(&self, level: StatusLevel) -> bool {
        self.error.is_none() && self.status_level >= level
    }

    fn write_status_line(
        &mut self,
        kind: Option<OutcomeKind>,
        name: &str,
        elapsed: Option<Duration>,
    ) -> io::Result<()> {
        let (status, style) = match kind {
            Some(OutcomeKind::Passed) => ("PASS", self.styles.pass),
            Some(OutcomeKind::Ignored) => ("IGNORED", self.styles.ignore),
            Some(OutcomeKind::Failed) => ("FAIL", self.styles.fail),
            Some(OutcomeKind::Errored) => ("ERROR", self.styles.error),
            None => ("START", self.styles.start),
        };
        write!(self.writer, "{:>12} ", status.style(style))?;

        match elapsed {
            Some(elapsed) => write!(self.writer, "{} ", DisplayBracketedDuration(elapsed))?,
            // Keep names aligned with lines that carry a duration.
            None => write!(self.writer, "{:12}", "")?,
        }

        write_test_name(name, &self.styles.names, &mut self.writer)
    }

    fn write_message(&mut self, prefix: &str, message: &str) -> io::Result<()> {
        for line in message.lines() {
            writeln!(
                self.writer,
                "{:>12} {}{}",
                "",
                prefix.style(self.styles.message),
                line
            )?;
        }
        Ok(())
    }

    fn record_result(&mut self, res: io::Result<()>) {
        if let Err(error) = res {
            warn!("error writing test report: {error}");
            self.error.get_or_insert(error);
        }
    }
}

impl<W: Write> TestHooks for TestReporter<W> {
    fn before_run(&mut self, name: &str) {
        if !self.should_display(StatusLevel::All) {
            return;
        }
        let res = self
            .write_status_line(None, name, None)
            .and_then(|()| writeln!(self.writer));
        self.record_result(res);
    }

    fn on_passed(&mut self, name: &str, elapsed: Duration) {
        if !self.should_display(StatusLevel::for_outcome(OutcomeKind::Passed)) {
            return;
        }
        let res = self
            .write_status_line(Some(OutcomeKind::Passed), name, Some(elapsed))
            .and_then(|()| writeln!(self.writer));
        self.record_result(res);
    }

    fn on_ignored(&mut self, name: &str, reason: &str) {
        if !self.should_display(StatusLevel::for_outcome(OutcomeKind::Ignored)) {
            return;
        }
        let res = self
            .write_status_line(Some(OutcomeKind::Ignored), name, None)
            .and_then(|()| {
                if reason.is_empty() {
                    writeln!(self.writer)
                } else {
                    writeln!(self.writer, ": {reason}")
                }
            });
        self.record_result(res);
    }

    fn on_failed(&mut self, name: &str, message: &str, elapsed: Duration) {
        if !self.should_display(StatusLevel::for_outcome(OutcomeKind::Failed)) {
            return;
        }
        let res = self
            .write_status_line(Some(OutcomeKind::Failed), name, Some(elapsed))
            .and_then(|()| writeln!(self.writer))
            .and_then(|()| self.write_message("", message));
        self.record_result(res);
    }

    fn on_exception(&mut self, name: &str, cause: &Signal, elapsed: Duration) {
        if !self.should_display(StatusLevel::for_outcome(OutcomeKind::Errored)) {
            return;
        }
        let message = cause.message();
        let res = self
            .write_status_line(Some(OutcomeKind::Errored), name, Some(elapsed))
            .and_then(|()| writeln!(self.writer))
            .and_then(|()| self.write_message("unexpected error: ", &message));
        self.record_result(res);
    }
}

impl<W> std::fmt::Debug for TestReporter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestReporter")
            .field("status_level", &self.status_level)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Styles {
    pass: Style,
    ignore: Style,
    fail: Style,
    error: Style,
    start: Style,
    message: Style,
    names: NameStyles,
}

impl Styles {
    fn colorize(&mut self) {
        self.pass = Style::new().green().bold();
        self.ignore = Style::new().yellow().bold();
        self.fail = Style::new().red().bold();
        self.error = Style::new().magenta().bold();
        self.start = Style::new().bold();
        self.message = Style::new().dimmed();
        self.names.colorize();
    }
}
