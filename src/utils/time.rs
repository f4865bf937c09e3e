//! Timestamp helpers: every record and commit message uses local time.

use chrono::Local;

/// ISO-8601 local timestamp with microseconds, e.g. `2026-02-16T09:30:12.123456`.
pub fn iso_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

pub fn today_ymd() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Minute-resolution stamp used in commit messages.
pub fn commit_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

pub fn banner_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
