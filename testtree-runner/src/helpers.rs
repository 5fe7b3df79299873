// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::list::NAME_SEPARATOR;
use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

/// Styles for qualified test names.
#[derive(Clone, Debug, Default)]
pub(crate) struct NameStyles {
    pub(crate) parent_path: Style,
    pub(crate) test_name: Style,
}

impl NameStyles {
    pub(crate) fn colorize(&mut self) {
        self.parent_path = Style::new().cyan();
        self.test_name = Style::new().blue().bold();
    }
}

/// Splits a qualified name into the labels of its ancestors and its own label.
pub(crate) fn split_test_name(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once(NAME_SEPARATOR) {
        Some((parent_path, trailing)) => (Some(parent_path), trailing),
        None => (None, name),
    }
}

/// Writes a qualified test name, highlighting its last label.
pub(crate) fn write_test_name(
    name: &str,
    styles: &NameStyles,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let (parent_path, trailing) = split_test_name(name);
    if let Some(parent_path) = parent_path {
        write!(
            writer,
            "{}{}",
            parent_path.style(styles.parent_path),
            NAME_SEPARATOR.style(styles.parent_path)
        )?;
    }
    write!(writer, "{}", trailing.style(styles.test_name))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("" => (None, "") ; "anonymous")]
    #[test_case("a" => (None, "a") ; "single label")]
    #[test_case("a/b/c" => (Some("a/b"), "c") ; "nested")]
    #[test_case("a//c" => (Some("a/"), "c") ; "empty label")]
    fn split(name: &str) -> (Option<&str>, &str) {
        split_test_name(name)
    }

    #[test]
    fn write_plain() {
        let mut out = Vec::new();
        write_test_name("outer/inner/leaf", &NameStyles::default(), &mut out)
            .expect("writing to a Vec succeeds");
        assert_eq!(String::from_utf8(out).expect("valid UTF-8"), "outer/inner/leaf");
    }
}
