//! Terminal output formatting with colors
//!
//! Benchmark results go to stdout uncolored; diagnostics go to stderr.
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::time::Duration;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print labelled value (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print plain output (no color, for benchmark result lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print elapsed wall time to stderr
pub fn elapsed(label: &str, elapsed: Duration) {
    eprintln!("{} {}: {:.3}s", "⏱".dimmed(), label, elapsed.as_secs_f64());
}
