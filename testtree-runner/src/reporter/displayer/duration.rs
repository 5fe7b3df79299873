// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{fmt, time::Duration};

/// Displays a duration as `hh:mm:ss`, with a `.fff` millisecond suffix if the duration has a
/// fractional part of at least one millisecond.
///
/// Hours are not wrapped at 24.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisplayHhMmSs(pub(crate) Duration);

impl fmt::Display for DisplayHhMmSs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0.as_secs();
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;

        write!(f, "{hours:02}:{mins:02}:{secs:02}")?;
        let millis = self.0.subsec_millis();
        if millis > 0 {
            write!(f, ".{millis:03}")?;
        }
        Ok(())
    }
}

/// Displays a duration in seconds, right-aligned within brackets.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisplayBracketedDuration(pub(crate) Duration);

impl fmt::Display for DisplayBracketedDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // * > means right-align.
        // * 8 is the number of characters to pad to.
        // * .3 means print three digits after the decimal point.
        write!(f, "[{:>8.3?}s]", self.0.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Duration::ZERO => "00:00:00" ; "zero")]
    #[test_case(Duration::from_secs(20) => "00:00:20" ; "seconds")]
    #[test_case(Duration::from_secs(27 * 60) => "00:27:00" ; "minutes")]
    #[test_case(Duration::from_secs(3 * 3600 + 62) => "03:01:02" ; "hours")]
    #[test_case(Duration::from_secs(30 * 3600) => "30:00:00" ; "past a day")]
    #[test_case(Duration::from_millis(1_005) => "00:00:01.005" ; "millis")]
    #[test_case(Duration::from_micros(999) => "00:00:00" ; "below a millisecond")]
    fn hh_mm_ss(duration: Duration) -> String {
        DisplayHhMmSs(duration).to_string()
    }

    #[test]
    fn bracketed() {
        assert_eq!(
            DisplayBracketedDuration(Duration::from_millis(1_500)).to_string(),
            "[   1.500s]"
        );
    }
}
