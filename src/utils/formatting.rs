//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthChar;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Cut `s` to at most `max` display columns, appending `...` when cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();

    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            out.push_str("...");
            return out;
        }
        width += w;
        out.push(ch);
    }

    out
}

pub fn human_bytes(n: u64) -> String {
    const KB: f64 = 1024.0;
    let f = n as f64;
    if f >= KB * KB {
        format!("{:.1} MB", f / (KB * KB))
    } else if f >= KB {
        format!("{:.1} KB", f / KB)
    } else {
        format!("{n} B")
    }
}

pub fn usd(price: f64) -> String {
    format!("${price:.2}")
}
