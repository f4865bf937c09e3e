//! Status-line output: one glyph per outcome, coloured like the rest of the CLI.

use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";
const FG_GREY: &str = "\x1b[90m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_SKIP: &str = "⏭️";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

/// Per-item failures go to stdout with the rest of the run; only fatal
/// errors reach stderr through `main`.
pub fn error<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

pub fn skip<T: fmt::Display>(msg: T) {
    println!("{}{}  {}{}", FG_GREY, ICON_SKIP, msg, RESET);
}

/// Verification line: `✓ msg` or `✗ msg`, indented under a header.
pub fn check<T: fmt::Display>(ok: bool, msg: T) {
    if ok {
        println!("  {}✓{} {}", FG_GREEN, RESET, msg);
    } else {
        println!("  {}✗{} {}", FG_RED, RESET, msg);
    }
}

/// Section header framed by a rule line.
pub fn header<T: fmt::Display>(msg: T) {
    let rule = "=".repeat(60);
    println!("{}{}{}\n{}\n{}{}", FG_BLUE, BOLD, rule, msg, rule, RESET);
}

/// Closing rule for a section opened with `header`.
pub fn rule() {
    println!("{}{}{}", FG_BLUE, "=".repeat(60), RESET);
}
