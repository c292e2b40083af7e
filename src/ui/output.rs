//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Reports go to stdout; messages and warnings go to stderr. Quiet mode
//! suppresses everything except errors and the report itself when JSON is
//! requested.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
}

impl Verbosity {
    /// Create verbosity from the `--quiet` flag.
    ///
    /// `--debug` only affects diagnostic logging (see [`crate::logging`]).
    pub fn from_flags(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a machine-readable payload (always shown).
pub fn emit(payload: impl Display) {
    println!("{}", payload);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items, one per line.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a labelled list, or `label: (none)` when it is empty.
pub fn labelled_list<T: Display>(label: &str, items: &[T], verbosity: Verbosity) {
    if items.is_empty() {
        print(format!("{label}: (none)"), verbosity);
    } else {
        print(format!("{label}:"), verbosity);
        print(format_list(items, "  "), verbosity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags() {
        assert_eq!(Verbosity::from_flags(true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false), Verbosity::Normal);
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_list(&["a", "b"], "  - "), "  - a\n  - b");
        assert_eq!(format_list::<&str>(&[], "  - "), "");
    }
}
