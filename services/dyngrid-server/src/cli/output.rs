//! Terminal rendering helpers shared by the CLI commands
//!
//! Colors come from `colored`, which honors NO_COLOR.

use serde_json::Value;

/// Palette for grid output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Section titles and table headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Column identifiers
    pub fn column(s: &str) -> ColoredString {
        s.cyan()
    }

    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Record counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Secondary detail such as the echo token
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Plain-text form of an output cell; null cells print as nothing
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Printed to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Table header line
pub fn print_header(columns: &str) {
    println!("{}", colors::label(columns));
}
