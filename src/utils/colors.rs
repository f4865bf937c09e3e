/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Pending count colour: zero is green, anything waiting is yellow.
pub fn color_for_pending(pending: i64) -> &'static str {
    if pending > 0 { YELLOW } else { GREEN }
}
