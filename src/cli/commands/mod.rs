pub mod carousel;
pub mod check;
pub mod config;
pub mod import;
pub mod init;
pub mod log;
pub mod silver;
pub mod status;

use crate::config::Config;
use crate::db::initialize::open_initialized;
use crate::db::log::ttlog;
use crate::ui::messages::warning;

/// Record an operation in the local log. Never fatal.
pub(crate) fn record(cfg: &Config, operation: &str, target: &str, message: &str) {
    let result = open_initialized(&cfg.local_db_path())
        .and_then(|pool| ttlog(&pool.conn, operation, target, message));
    if let Err(e) = result {
        warning(format!("Failed to write internal log: {e}"));
    }
}
