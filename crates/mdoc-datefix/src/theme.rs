//! Color theme for consistent output

use colored::*;

/// Color for success messages
pub fn success(msg: &str) -> ColoredString {
    msg.green()
}

/// Color for error messages
pub fn error(msg: &str) -> ColoredString {
    msg.red()
}

/// Color for warning messages
pub fn warning(msg: &str) -> ColoredString {
    msg.yellow()
}

/// Color for info messages
pub fn info(msg: &str) -> ColoredString {
    msg.cyan()
}

/// Highlight a date value
pub fn date(value: &str) -> ColoredString {
    value.bold()
}

/// Symbol and label for a file's DateTime consistency
pub fn consistency(consistent: bool) -> (ColoredString, ColoredString) {
    if consistent {
        (success_symbol().green(), success("consistent"))
    } else {
        (info_symbol().cyan(), info("needs fixing"))
    }
}

/// Symbol for success
pub fn success_symbol() -> &'static str {
    "✓"
}

/// Symbol for error
pub fn error_symbol() -> &'static str {
    "✗"
}

/// Symbol for warning
pub fn warning_symbol() -> &'static str {
    "⚠"
}

/// Symbol for info
pub fn info_symbol() -> &'static str {
    "→"
}
