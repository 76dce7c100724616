use colored::Colorize;
use std::io::{self, Write};

pub const VERBOSE_ENV: &str = "APT_CHECK_VERBOSE";

pub fn enabled() -> bool {
    std::env::var_os(VERBOSE_ENV).is_some()
}

/// Print a `[VERBOSE]` line on stdout when verbose mode is on.
///
/// stderr carries the count report, so tracing must never go there.
pub fn trace(message: impl AsRef<str>) {
    if enabled() {
        let _ = writeln!(io::stdout().lock(), "{} {}", "[VERBOSE]".dimmed(), message.as_ref());
    }
}
